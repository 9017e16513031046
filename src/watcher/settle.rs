//! Settle tracking for files arriving in the drop folder.
//!
//! A freshly created PDF may still be mid-write by the producing process.
//! Each path must stay quiet for the settle window before it is released
//! for ingestion.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indexmap::IndexMap;

/// Tracks arriving files until they have settled.
///
/// Entries keep their arrival order. [`take_ready`](Self::take_ready) only
/// releases from the front, so a path that is still being written holds back
/// every later arrival and downstream processing never reorders documents.
#[derive(Debug)]
pub struct SettleQueue {
    /// Pending arrivals: path -> last write timestamp.
    pending: IndexMap<PathBuf, Instant>,
    /// How long a file must stay quiet before release.
    duration: Duration,
}

impl SettleQueue {
    /// Create a settle queue with the given window in milliseconds.
    pub fn new(settle_ms: u64) -> Self {
        Self {
            pending: IndexMap::new(),
            duration: Duration::from_millis(settle_ms),
        }
    }

    /// Record a write to a path.
    ///
    /// Resets the settle timer. A path recorded earlier keeps its arrival
    /// position.
    pub fn record(&mut self, path: PathBuf) {
        self.pending.insert(path, Instant::now());
    }

    /// Forget a path, e.g. when the file is deleted before settling.
    pub fn remove(&mut self, path: &Path) {
        self.pending.shift_remove(path);
    }

    /// Whether a path is currently settling.
    pub fn contains(&self, path: &Path) -> bool {
        self.pending.contains_key(path)
    }

    /// Release paths from the front that have settled, in arrival order.
    pub fn take_ready(&mut self) -> Vec<PathBuf> {
        let now = Instant::now();
        let mut ready = Vec::new();

        while let Some((_, last_write)) = self.pending.first() {
            if now.duration_since(*last_write) < self.duration {
                break;
            }
            if let Some((path, _)) = self.pending.shift_remove_index(0) {
                ready.push(path);
            }
        }

        ready
    }

    /// Check if any paths are still settling.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of paths still settling.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
