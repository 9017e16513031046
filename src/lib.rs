pub mod analysis;
pub mod config;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod summarize;
pub mod vault;
pub mod watcher;

pub use config::Settings;
pub use extract::{PdfExtractor, TextExtractor};
pub use pipeline::{IngestPipeline, IngestReport, Worker};
pub use summarize::{HttpSummarizer, Summarizer};
pub use vault::Vault;
pub use watcher::DropWatcher;
