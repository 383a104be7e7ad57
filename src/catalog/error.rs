//! Catalog build errors.

use thiserror::Error;

/// Errors that abort a catalog build. A failed build never publishes a catalog.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The dataset could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset line could not be parsed.
    #[error("malformed dataset at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// Two entries share the same name.
    #[error("duplicate entry name {0:?}")]
    DuplicateName(String),

    /// The entry stream exceeds the addressable record count.
    #[error("too many entries ({0})")]
    TooManyEntries(usize),
}

impl BuildError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        BuildError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
