//! Summary assembly over chunked document text.
//!
//! Long documents exceed a summarization model's input window, so the text
//! is chunked and only the leading chunks are summarized, one external call
//! per chunk. The per-chunk summaries keep their chunk order.

use crate::analysis::chunker::chunks;
use crate::analysis::sentences::sentences;
use crate::summarize::{Summarizer, SummaryBounds};

/// An assembled document summary: one string per successfully summarized
/// chunk, in chunk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    parts: Vec<String>,
}

impl Summary {
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// A summary with no content, the degraded form when every chunk failed.
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Full summary text: chunk summaries joined by line breaks.
    pub fn text(&self) -> String {
        self.parts.join("\n")
    }

    /// One bullet per sentence of the summary text, order preserved.
    pub fn bullets(&self) -> Vec<String> {
        let text = self.text();
        sentences(&text).map(|s| format!("- {s}")).collect()
    }
}

/// Drives the chunker and the external summarization service.
pub struct SummaryAssembler<'a> {
    summarizer: &'a dyn Summarizer,
    chunk_chars: usize,
    chunk_limit: usize,
    bounds: SummaryBounds,
}

impl<'a> SummaryAssembler<'a> {
    pub fn new(
        summarizer: &'a dyn Summarizer,
        chunk_chars: usize,
        chunk_limit: usize,
        bounds: SummaryBounds,
    ) -> Self {
        Self {
            summarizer,
            chunk_chars,
            chunk_limit,
            bounds,
        }
    }

    /// Summarize the first `chunk_limit` chunks of `text`.
    ///
    /// A chunk whose summarization fails or comes back blank contributes
    /// nothing; the summary is assembled from the chunks that succeeded.
    /// Empty input yields an empty summary without any external calls.
    pub async fn assemble(&self, text: &str) -> Summary {
        let mut parts = Vec::new();

        for (index, chunk) in chunks(text, self.chunk_chars)
            .take(self.chunk_limit)
            .enumerate()
        {
            match self.summarizer.summarize(chunk, self.bounds).await {
                Ok(part) if part.trim().is_empty() => {
                    tracing::warn!("[summary] chunk {index} produced no text");
                }
                Ok(part) => parts.push(part),
                Err(e) => {
                    tracing::warn!("[summary] chunk {index} failed: {e}");
                }
            }
        }

        Summary::new(parts)
    }
}
