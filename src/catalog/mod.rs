//! Catalog: the compiled pattern index plus its capability records.
//!
//! # Data Flow
//! ```text
//! Build (once per dataset generation):
//!     ordered Entry stream (ini.rs or in-memory)
//!     → record store insert (name → RecordId)
//!     → case fold + compile pattern
//!     → pattern index insert (Expression → RecordId, stream order)
//!     → Freeze as immutable Catalog
//!
//! Lookup:
//!     folded user agent
//!     → PatternIndex::find
//!     → RecordStore::resolve
//!     → Return: resolved Capabilities or None
//! ```
//!
//! # Design Decisions
//! - A build either yields a complete catalog or an error, never a partial one
//! - No incremental updates: a new dataset means a new catalog
//! - Reads need no locks; only first-time record resolution synchronises

pub mod entry;
pub mod error;
pub mod ini;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

pub use entry::Entry;
pub use error::BuildError;
pub use ini::IniEntries;

use crate::pattern::{compile, fold_case, fold_case_into, PatternIndex, PatternIndexBuilder};
use crate::record::{Capabilities, CapabilityRecord, RecordId, RecordStore};

/// Size figures of a built catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub entries: usize,
    pub shards: usize,
    pub fuzzy: usize,
}

/// Immutable pattern index and record store built from one entry stream.
#[derive(Debug, Default)]
pub struct Catalog {
    index: PatternIndex,
    records: RecordStore,
    version: Option<String>,
}

impl Catalog {
    /// Build from entries ordered most specific first.
    pub fn build<I>(entries: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Entry>,
    {
        Self::try_build(entries.into_iter().map(Ok))
    }

    /// Build from a fallible entry stream. The first error aborts the build.
    pub fn try_build<I>(entries: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Result<Entry, BuildError>>,
    {
        let started = Instant::now();
        let entries = entries.into_iter();
        let (hint, _) = entries.size_hint();

        let mut index = PatternIndexBuilder::with_capacity(hint);
        let mut records = RecordStore::with_capacity(hint);
        let mut folded = Vec::new();

        for entry in entries {
            let Entry {
                name,
                pattern,
                properties,
            } = entry?;

            let record = CapabilityRecord::from_properties(
                name,
                properties.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            );
            let id = records.insert(record)?;

            folded.clear();
            fold_case_into(&pattern, &mut folded);
            index
                .insert(compile(&folded), id)
                .ok_or(BuildError::TooManyEntries(index.len()))?;
        }

        records.shrink_to_fit();
        let catalog = Self {
            index: index.finish(),
            records,
            version: None,
        };

        tracing::info!(
            entries = catalog.len(),
            shards = catalog.index.shard_count(),
            fuzzy = catalog.index.fuzzy_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog built"
        );
        Ok(catalog)
    }

    /// Build from a browscap ini stream, taking the version from the dataset.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, BuildError> {
        let mut entries = IniEntries::new(reader);
        let catalog = Self::try_build(entries.by_ref())?;
        Ok(catalog.with_version(entries.take_version()))
    }

    /// Build from a browscap ini file.
    pub fn from_path(path: &Path) -> Result<Self, BuildError> {
        tracing::debug!(path = %path.display(), "Reading dataset");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Dataset version, when the source declared one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            entries: self.len(),
            shards: self.index.shard_count(),
            fuzzy: self.index.fuzzy_count(),
        }
    }

    pub fn index(&self) -> &PatternIndex {
        &self.index
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn record(&self, name: &str) -> Option<&CapabilityRecord> {
        self.records.by_name(name)
    }

    /// Record of the best match for an already folded user agent.
    pub fn find_id(&self, folded: &[u8]) -> Option<RecordId> {
        self.index.find(folded)
    }

    /// Resolved capabilities of `id`.
    ///
    /// # Panics
    /// If `id` does not belong to this catalog.
    pub fn resolve(&self, id: RecordId) -> &Capabilities {
        self.records.resolve(id)
    }

    /// Resolved capabilities for an already folded user agent.
    pub fn find(&self, folded: &[u8]) -> Option<&Capabilities> {
        self.find_id(folded).map(|id| self.resolve(id))
    }

    /// Resolved capabilities for a raw user agent.
    pub fn lookup(&self, user_agent: &str) -> Option<&Capabilities> {
        self.find(&fold_case(user_agent))
    }
}
