//! Document ingestion pipeline.
//!
//! Coordinates one document end to end: archive the PDF into the vault,
//! extract its text, derive summary, tags and conclusion excerpt, compose
//! the note and write it once. Archive and extraction failures abort the
//! document; analysis failures degrade the note instead of dropping it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::conclusion::extract_conclusion;
use crate::analysis::note::{NoteContext, compose_note};
use crate::analysis::summary::SummaryAssembler;
use crate::analysis::tags::{TermScorer, rank_tags};
use crate::config::{PipelineConfig, Settings};
use crate::extract::{ExtractError, TextExtractor};
use crate::summarize::{Summarizer, SummaryBounds};
use crate::vault::{Vault, VaultError};
use tokio::sync::mpsc;

/// Errors that abort a single document.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),
}

/// Outcome of one ingested document.
#[derive(Debug)]
pub struct IngestReport {
    /// Where the PDF now lives
    pub archived: PathBuf,
    /// Where the note was written
    pub note: PathBuf,
    /// True when summary or tags fell back to a placeholder
    pub degraded: bool,
}

/// Turns one dropped PDF into an archived file plus a note.
pub struct IngestPipeline {
    vault: Vault,
    extractor: Box<dyn TextExtractor>,
    summarizer: Box<dyn Summarizer>,
    scorer: Box<dyn TermScorer>,
    pipeline: PipelineConfig,
    bounds: SummaryBounds,
}

impl IngestPipeline {
    pub fn new(
        settings: &Settings,
        extractor: Box<dyn TextExtractor>,
        summarizer: Box<dyn Summarizer>,
        scorer: Box<dyn TermScorer>,
    ) -> Self {
        Self {
            vault: Vault::new(&settings.vault),
            extractor,
            summarizer,
            scorer,
            pipeline: settings.pipeline.clone(),
            bounds: SummaryBounds::from(&settings.summarizer),
        }
    }

    /// Process one document to completion.
    ///
    /// The note is written exactly once, after every section has a value or
    /// its placeholder. An error here means no note was produced; the PDF
    /// may already be archived.
    pub async fn ingest(&self, source: &Path) -> Result<IngestReport, IngestError> {
        self.vault.ensure_layout()?;

        let archived = self.vault.archive_pdf(source)?;
        crate::log_event!("archive", "moved", "{}", archived.path.display());

        let text = self.extractor.extract_text(&archived.path)?;
        crate::log_event!("extract", "read", "{} chars", text.chars().count());

        let mut degraded = false;

        let assembler = SummaryAssembler::new(
            self.summarizer.as_ref(),
            self.pipeline.chunk_chars,
            self.pipeline.summary_chunk_limit,
            self.bounds,
        );
        let summary = assembler.assemble(&text).await;
        if summary.is_empty() {
            degraded = true;
        } else {
            crate::log_event!("summary", "assembled", "{} chunks", summary.parts().len());
        }

        let tags = match rank_tags(self.scorer.as_ref(), &text, self.pipeline.tag_count) {
            Ok(tags) => {
                crate::log_event!("tags", "ranked", "[{}]", tags.join(", "));
                tags
            }
            Err(e) => {
                tracing::warn!("[tags] {e}");
                degraded = true;
                Vec::new()
            }
        };

        let conclusion = extract_conclusion(&text, self.pipeline.excerpt_chars);

        let title = Path::new(&archived.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&archived.filename);

        let context = NoteContext {
            title,
            summary: &summary,
            tags: &tags,
            pdf_filename: &archived.filename,
            papers_dir: self.vault.papers_dir_name(),
            conclusion: &conclusion,
            created: chrono::Local::now().date_naive(),
        };
        let note = self.vault.write_note(&archived.filename, &compose_note(&context))?;
        crate::log_event!("note", "written", "{}", note.display());

        Ok(IngestReport {
            archived: archived.path,
            note,
            degraded,
        })
    }
}

/// Consumes the watcher queue one document at a time.
///
/// Documents are handled to completion in queue order, so the worker never
/// runs two pipelines concurrently against the shared vault.
pub struct Worker {
    pipeline: IngestPipeline,
    queue: mpsc::Receiver<PathBuf>,
}

impl Worker {
    pub fn new(pipeline: IngestPipeline, queue: mpsc::Receiver<PathBuf>) -> Self {
        Self { pipeline, queue }
    }

    /// Run until the queue closes.
    pub async fn run(mut self) {
        while let Some(path) = self.queue.recv().await {
            crate::log_event!("pipeline", "ingesting", "{}", path.display());
            match self.pipeline.ingest(&path).await {
                Ok(report) if report.degraded => {
                    tracing::warn!("[pipeline] degraded note: {}", report.note.display());
                }
                Ok(report) => {
                    crate::log_event!("pipeline", "done", "{}", report.note.display());
                }
                Err(e) => {
                    tracing::error!("[pipeline] {} failed: {e}", path.display());
                }
            }
        }
    }
}
