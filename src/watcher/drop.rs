//! Drop folder watcher feeding the ingestion queue.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

use super::error::WatchError;
use super::settle::SettleQueue;
use crate::config::WatchConfig;

/// Watches the drop folder and releases settled PDFs to the worker queue.
///
/// Key behavior:
/// - Only create, modify and remove events for `.pdf` paths are tracked
/// - A new file must stay quiet for the settle window before release
/// - Released paths are sent to the queue in arrival order
pub struct DropWatcher {
    /// Folder under watch.
    drop_dir: PathBuf,
    /// Settle tracking for mid-write files.
    settle: SettleQueue,
    /// Hand-off to the ingestion worker.
    queue: mpsc::Sender<PathBuf>,
    /// Channel receiver for raw file events.
    event_rx: mpsc::Receiver<notify::Result<Event>>,
    /// The actual file watcher (kept alive by storing it).
    _watcher: notify::RecommendedWatcher,
}

impl DropWatcher {
    /// Create a watcher for the configured drop folder.
    ///
    /// The folder is not watched until [`watch`](Self::watch) runs.
    pub fn new(config: &WatchConfig, queue: mpsc::Sender<PathBuf>) -> Result<Self, WatchError> {
        // Bridge notify's callback thread into the async loop
        let (tx, rx) = mpsc::channel(100);
        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.blocking_send(res);
        })?;

        Ok(Self {
            drop_dir: config.drop_dir.clone(),
            settle: SettleQueue::new(config.settle_ms),
            queue,
            event_rx: rx,
            _watcher: watcher,
        })
    }

    /// Watch the drop folder until the event source or the queue closes.
    pub async fn watch(mut self) -> Result<(), WatchError> {
        self._watcher
            .watch(&self.drop_dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: self.drop_dir.clone(),
                reason: e.to_string(),
            })?;

        crate::log_event!("watcher", "watching", "{}", self.drop_dir.display());

        loop {
            let timeout = sleep(Duration::from_millis(100));
            tokio::pin!(timeout);

            tokio::select! {
                // Handle incoming file events
                event = self.event_rx.recv() => {
                    match event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => {
                            let err = WatchError::EventError {
                                details: e.to_string(),
                            };
                            tracing::warn!("[watcher] {err}");
                        }
                        None => return Err(WatchError::ChannelClosed),
                    }
                }

                // Release settled files in arrival order
                _ = &mut timeout => {
                    for path in self.settle.take_ready() {
                        crate::debug_event!("watcher", "settled", "{}", path.display());
                        if self.queue.send(path).await.is_err() {
                            return Err(WatchError::ChannelClosed);
                        }
                    }
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        for path in event.paths {
            if !is_pdf(&path) {
                continue;
            }
            match event.kind {
                EventKind::Create(_) => {
                    crate::debug_event!("watcher", "created", "{}", path.display());
                    self.settle.record(path);
                }
                EventKind::Modify(_) => {
                    // Only reset files we saw arrive; edits to already
                    // archived-and-forgotten paths are not arrivals
                    if self.settle.contains(&path) {
                        self.settle.record(path);
                    }
                }
                EventKind::Remove(_) => {
                    self.settle.remove(&path);
                }
                _ => {}
            }
        }
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
