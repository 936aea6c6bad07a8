//! Configuration file watcher for hot reload.
//!
//! Every accepted change is a complete, validated snapshot. A file that
//! fails to load is reported and the previous snapshot stays in force.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::loader::{load_config, ResolvedConfig};
use crate::interceptor::hooks::RequestLogger;

/// Watches one config file and publishes reloaded snapshots.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<ResolvedConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end of its updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ResolvedConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Dropping the returned handle stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let updates = self.updates;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    reload(&path, &updates)
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, updates: &mpsc::UnboundedSender<ResolvedConfig>) {
    match load_config(path) {
        Ok(resolved) => {
            tracing::info!(
                enabled = resolved.logging.enabled(),
                logging_level = %resolved.logging.level(),
                "Config reloaded"
            );
            // A closed receiver means the service is shutting down.
            let _ = updates.send(resolved);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config, keeping current snapshot");
        }
    }
}

/// Rebuild the logger for every snapshot received and swap it in.
pub fn spawn_reloader(
    logger: Arc<ArcSwap<RequestLogger>>,
    mut updates: mpsc::UnboundedReceiver<ResolvedConfig>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(resolved) = updates.recv().await {
            let sink = resolved.service.request_logger.sink.build();
            logger.store(Arc::new(RequestLogger::new(resolved.logging, sink)));
        }
    })
}
