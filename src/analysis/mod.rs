//! Text analysis for extracted PDF content.
//!
//! This module provides:
//! - Fixed-size character chunking for summarizer input
//! - Sentence segmentation for key point bullets
//! - Conclusion heading search and excerpt extraction
//! - Term-frequency tag ranking with a stop word filter
//! - Chunk summary assembly and Markdown note composition

pub mod chunker;
pub mod conclusion;
pub mod note;
pub mod sentences;
pub mod summary;
pub mod tags;

pub use chunker::chunks;
pub use conclusion::{NOT_FOUND, extract_conclusion};
pub use note::{NoteContext, SUMMARY_UNAVAILABLE, compose_note};
pub use sentences::sentences;
pub use summary::{Summary, SummaryAssembler};
pub use tags::{TagError, TermScorer, TfIdfScorer, rank_tags};
