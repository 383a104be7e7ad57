//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BrowscapConfig (validated, immutable)
//!
//! Dataset reload:
//!     watcher.rs detects a change to data.ini_path
//!     → Browscap::init_from_file(path, force = true)
//!     → atomic swap of Arc<Catalog>
//!     → lookups observe the new catalog
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::BrowscapConfig;
pub use schema::DataConfig;
pub use schema::LookupConfig;
pub use schema::ObservabilityConfig;
