//! Configuration file watcher for hot reload.
//!
//! Editors usually emit several modify/create events for one save. Events
//! are coalesced until the file has been quiet for [`SETTLE_WINDOW`], then
//! the file is loaded once. A reload that yields the config already in use
//! is not forwarded, so the route table is only rebuilt on real changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::thread;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;

/// Quiet period required after the last file event before reloading.
pub const SETTLE_WINDOW: Duration = Duration::from_millis(250);

/// A watcher that monitors the route configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    current: RouterConfig,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, seeded with the config currently served.
    ///
    /// Returns the watcher and a receiver for validated, changed configs.
    pub fn new(
        path: &Path,
        current: &RouterConfig,
    ) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                current: current.clone(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file.
    ///
    /// Reloads run on a dedicated thread that exits once the returned
    /// handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (event_tx, event_rx) = std_mpsc::channel::<()>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = event_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?self.path, "Config watcher started");

        let path = self.path;
        let tx = self.update_tx;
        let mut filter = ReloadFilter::new(self.current);
        thread::spawn(move || {
            while let Some(coalesced) = settle(&event_rx, SETTLE_WINDOW) {
                tracing::info!(path = ?path, events = coalesced, "Route config change detected, reloading");
                match load_config(&path) {
                    Ok(new_config) => match filter.accept(new_config) {
                        Some(changed) => {
                            if tx.send(changed).is_err() {
                                break;
                            }
                        }
                        None => tracing::debug!("Route config unchanged, skipping reload"),
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to reload route config, keeping current table");
                    }
                }
            }
            tracing::debug!("Config watcher stopped");
        });

        Ok(watcher)
    }
}

/// Block for one event, then absorb follow-ups until `window` passes quietly.
///
/// Returns the number of events absorbed, or `None` once the sender is gone.
fn settle(events: &std_mpsc::Receiver<()>, window: Duration) -> Option<usize> {
    events.recv().ok()?;
    let mut count = 1;
    loop {
        match events.recv_timeout(window) {
            Ok(()) => count += 1,
            Err(_) => return Some(count),
        }
    }
}

/// Drops reloads that produce the config already being served.
struct ReloadFilter {
    last: RouterConfig,
}

impl ReloadFilter {
    fn new(current: RouterConfig) -> Self {
        Self { last: current }
    }

    fn accept(&mut self, candidate: RouterConfig) -> Option<RouterConfig> {
        if candidate == self.last {
            return None;
        }
        self.last = candidate.clone();
        Some(candidate)
    }
}
