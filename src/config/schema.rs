//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from toml files.
//! Every table and field has a default so an empty file is a valid config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BrowscapConfig {
    /// Dataset location and reload behaviour.
    pub data: DataConfig,

    /// Lookup tuning.
    pub lookup: LookupConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Dataset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the browscap ini file.
    pub ini_path: PathBuf,

    /// Rebuild the catalog when the file changes.
    pub watch: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ini_path: PathBuf::from("browscap.ini"),
            watch: false,
        }
    }
}

/// Scratch buffer pool used to normalise user agents.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Maximum number of idle buffers kept for reuse.
    pub pool_capacity: usize,

    /// Initial byte capacity of a fresh buffer.
    pub buffer_capacity: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 64,
            buffer_capacity: 256,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "browscap=info".to_string(),
        }
    }
}
