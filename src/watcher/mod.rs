//! Drop folder watching for arriving PDFs.
//!
//! A single notify watcher feeds raw filesystem events into a settle queue;
//! paths that stay quiet for the settle window are released to the worker
//! queue in arrival order.
//!
//! # Architecture
//!
//! ```text
//! DropWatcher
//!   - Single notify::RecommendedWatcher on the drop folder
//!   - SettleQueue (arrival-ordered, front-gated)
//!   - Sends settled paths to mpsc queue
//!         |
//!       Worker (one document at a time)
//! ```

mod drop;
mod error;
mod settle;

pub use drop::DropWatcher;
pub use error::WatchError;
pub use settle::SettleQueue;
