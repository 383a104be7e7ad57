//! Dataset file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::service::Browscap;

/// A watcher that rebuilds the catalog when the dataset file changes.
pub struct DataWatcher {
    path: PathBuf,
    service: Arc<Browscap>,
}

impl DataWatcher {
    /// Create a new DataWatcher for `path`, reloading into `service`.
    pub fn new(path: &Path, service: Arc<Browscap>) -> Self {
        Self {
            path: path.to_path_buf(),
            service,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for reloads to happen.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let service = self.service;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Dataset change detected, rebuilding catalog...");
                        reload(&service, &path);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Dataset watcher started");
        Ok(watcher)
    }
}

/// Force a rebuild from `path`. Failures keep the current catalog.
pub fn reload(service: &Browscap, path: &Path) -> bool {
    match service.init_from_file(path, true) {
        Ok(_) => {
            tracing::info!(version = ?service.current_version(), "Catalog reloaded");
            true
        }
        Err(e) => {
            tracing::error!("Failed to reload dataset: {}. Keeping current catalog.", e);
            false
        }
    }
}
