//! Service facade: owns the installed catalog and answers lookups.
//!
//! # Data Flow
//! ```text
//! Init / reload:
//!     dataset (file or entries)
//!     → Catalog::build (off to the side, old catalog still serving)
//!     → atomic swap of Arc<Catalog>
//!     → old catalog dropped when its last in-flight lookup finishes
//!
//! Lookup:
//!     user agent
//!     → pool.rs scratch buffer (case fold)
//!     → Catalog::find_id + resolve
//!     → BrowserMatch (keeps its catalog generation alive)
//! ```
//!
//! # Design Decisions
//! - One explicitly owned facade instead of process-wide globals
//! - Readers never lock: they load an `Arc` snapshot through `arc-swap`
//! - Builds are serialised; a failed build leaves the current catalog in place
//! - "Not initialized" is an error, "no match" is `Ok(None)`

pub mod pool;

use std::fmt;
use std::ops::Deref;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use thiserror::Error;

pub use pool::{BufferPool, PooledBuffer};

use crate::catalog::{BuildError, Catalog, Entry};
use crate::config::LookupConfig;
use crate::observability::metrics::{self, LookupOutcome};
use crate::pattern::fold_case_into;
use crate::record::{Capabilities, RecordId};

/// Errors surfaced by the service facade.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No catalog has been installed yet.
    #[error("browscap is not initialized")]
    NotInitialized,

    /// Building a new catalog failed; the previous one (if any) is still installed.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Owner of the current catalog generation.
pub struct Browscap {
    current: ArcSwapOption<Catalog>,
    pool: BufferPool,
    build_lock: Mutex<()>,
}

impl Browscap {
    pub fn new() -> Self {
        Self::with_pool(BufferPool::default())
    }

    pub fn with_pool(pool: BufferPool) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            pool,
            build_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &LookupConfig) -> Self {
        Self::with_pool(BufferPool::new(config.pool_capacity, config.buffer_capacity))
    }

    pub fn is_initialized(&self) -> bool {
        self.current.load().is_some()
    }

    /// Snapshot of the installed catalog.
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.current.load_full()
    }

    /// Version of the installed dataset.
    pub fn current_version(&self) -> Option<String> {
        let guard = self.current.load();
        let current: &Option<Arc<Catalog>> = &guard;
        current
            .as_deref()
            .and_then(Catalog::version)
            .map(str::to_string)
    }

    /// Build and install a catalog unless one is installed and `force` is false.
    ///
    /// Returns whether a new catalog was installed.
    pub fn init_with<F>(&self, force: bool, build: F) -> Result<bool, ServiceError>
    where
        F: FnOnce() -> Result<Catalog, BuildError>,
    {
        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !force && self.is_initialized() {
            tracing::debug!("Catalog already installed, skipping init");
            return Ok(false);
        }

        match build() {
            Ok(catalog) => {
                metrics::record_reload(true);
                self.replace(catalog);
                Ok(true)
            }
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(error = %e, "Catalog build failed, keeping current catalog");
                Err(e.into())
            }
        }
    }

    /// Build from a browscap ini file.
    pub fn init_from_file(&self, path: &Path, force: bool) -> Result<bool, ServiceError> {
        self.init_with(force, || Catalog::from_path(path))
    }

    /// Build from an in-memory entry list.
    pub fn init_from_entries<I>(
        &self,
        entries: I,
        version: Option<String>,
        force: bool,
    ) -> Result<bool, ServiceError>
    where
        I: IntoIterator<Item = Entry>,
    {
        self.init_with(force, || {
            Catalog::build(entries).map(|catalog| catalog.with_version(version))
        })
    }

    /// Install `catalog`, returning the previous generation.
    ///
    /// Lookups already running keep the generation they started with.
    pub fn replace(&self, catalog: Catalog) -> Option<Arc<Catalog>> {
        let entries = catalog.len();
        let version = catalog.version().unwrap_or("unknown").to_string();
        let previous = self.current.swap(Some(Arc::new(catalog)));

        metrics::record_catalog_entries(entries);
        tracing::info!(
            entries,
            version = %version,
            replaced = previous.is_some(),
            "Catalog installed"
        );
        previous
    }

    /// Uninstall the current catalog.
    pub fn clear(&self) -> Option<Arc<Catalog>> {
        self.current.swap(None)
    }

    /// Classify `user_agent`.
    ///
    /// `Err(NotInitialized)` without a catalog, `Ok(None)` when nothing matches.
    pub fn lookup(&self, user_agent: &str) -> Result<Option<BrowserMatch>, ServiceError> {
        let Some(catalog) = self.current.load_full() else {
            metrics::record_lookup(LookupOutcome::Uninitialized);
            return Err(ServiceError::NotInitialized);
        };

        let id = {
            let mut folded = self.pool.acquire();
            fold_case_into(user_agent, &mut folded);
            catalog.find_id(&folded)
        };

        let Some(id) = id else {
            metrics::record_lookup(LookupOutcome::Miss);
            tracing::trace!(user_agent, "No match");
            return Ok(None);
        };

        catalog.resolve(id);
        metrics::record_lookup(LookupOutcome::Hit);
        Ok(Some(BrowserMatch { catalog, id }))
    }
}

impl Default for Browscap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Browscap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browscap")
            .field("initialized", &self.is_initialized())
            .field("version", &self.current_version())
            .field("pool", &self.pool)
            .finish()
    }
}

/// A lookup result holding on to the catalog generation it came from.
#[derive(Clone)]
pub struct BrowserMatch {
    catalog: Arc<Catalog>,
    id: RecordId,
}

impl BrowserMatch {
    /// Name of the matched record (the dataset section).
    pub fn name(&self) -> &str {
        self.catalog
            .records()
            .get(self.id)
            .map(|record| record.name())
            .unwrap_or_default()
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.catalog.resolve(self.id)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

impl Deref for BrowserMatch {
    type Target = Capabilities;
    fn deref(&self) -> &Self::Target {
        self.capabilities()
    }
}

impl fmt::Debug for BrowserMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserMatch")
            .field("name", &self.name())
            .field("capabilities", self.capabilities())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(browser: &str) -> Vec<Entry> {
        vec![
            Entry::section("Mozilla/5.0*").with_property("Browser", browser),
            Entry::section("*").with_property("Browser", "Default Browser"),
        ]
    }

    #[test]
    fn test_uninitialized_lookup() {
        let service = Browscap::new();
        assert!(!service.is_initialized());
        assert!(matches!(service.lookup("Mozilla/5.0"), Err(ServiceError::NotInitialized)));
        assert_eq!(service.current_version(), None);
    }

    #[test]
    fn test_init_and_lookup() {
        let service = Browscap::new();
        assert!(service.init_from_entries(entries("Firefox"), Some("1".into()), false).unwrap());
        assert_eq!(service.current_version().as_deref(), Some("1"));

        let hit = service.lookup("Mozilla/5.0 (X11)").unwrap().unwrap();
        assert_eq!(hit.browser, "Firefox");
        assert_eq!(hit.name(), "Mozilla/5.0*");
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let service = Browscap::new();
        service
            .init_from_entries(vec![Entry::section("Opera*")], None, false)
            .unwrap();
        assert!(service.lookup("curl/8.0").unwrap().is_none());
    }

    #[test]
    fn test_init_without_force_keeps_catalog() {
        let service = Browscap::new();
        service.init_from_entries(entries("Firefox"), Some("1".into()), false).unwrap();
        assert!(!service.init_from_entries(entries("Chrome"), Some("2".into()), false).unwrap());
        assert_eq!(service.current_version().as_deref(), Some("1"));

        assert!(service.init_from_entries(entries("Chrome"), Some("2".into()), true).unwrap());
        assert_eq!(service.current_version().as_deref(), Some("2"));
        assert_eq!(service.lookup("Mozilla/5.0").unwrap().unwrap().browser, "Chrome");
    }

    #[test]
    fn test_failed_build_keeps_previous_catalog() {
        let service = Browscap::new();
        service.init_from_entries(entries("Firefox"), Some("1".into()), false).unwrap();

        let mut broken = entries("Chrome");
        broken.push(Entry::section("*"));
        let err = service.init_from_entries(broken, Some("2".into()), true).unwrap_err();
        assert!(matches!(err, ServiceError::Build(BuildError::DuplicateName(_))));

        assert_eq!(service.current_version().as_deref(), Some("1"));
        assert_eq!(service.lookup("Mozilla/5.0").unwrap().unwrap().browser, "Firefox");
    }

    #[test]
    fn test_match_outlives_replace() {
        let service = Browscap::new();
        service.init_from_entries(entries("Firefox"), None, false).unwrap();
        let hit = service.lookup("Mozilla/5.0").unwrap().unwrap();

        let previous = service.replace(Catalog::build(entries("Chrome")).unwrap());
        assert!(previous.is_some());
        assert_eq!(hit.browser, "Firefox");
        assert_eq!(service.lookup("Mozilla/5.0").unwrap().unwrap().browser, "Chrome");
    }

    #[test]
    fn test_clear() {
        let service = Browscap::new();
        service.init_from_entries(entries("Firefox"), None, false).unwrap();
        assert!(service.clear().is_some());
        assert!(matches!(service.lookup("Mozilla/5.0"), Err(ServiceError::NotInitialized)));
    }

    #[test]
    fn test_lookup_returns_buffer_to_pool() {
        let service = Browscap::with_pool(BufferPool::new(1, 8));
        service.init_from_entries(entries("Firefox"), None, false).unwrap();
        service.lookup("Mozilla/5.0").unwrap();
        service.lookup("nothing").unwrap();
        assert_eq!(service.pool.idle(), 1);
    }
}
