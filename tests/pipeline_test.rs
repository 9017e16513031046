//! End-to-end ingestion tests against real PDF files.
//!
//! Builds small single-page PDFs with lopdf, runs the full pipeline with a
//! canned summarizer, and checks the archived file plus the composed note.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use paperdrop::analysis::TfIdfScorer;
use paperdrop::config::Settings;
use paperdrop::summarize::{SummarizeError, Summarizer, SummaryBounds};
use paperdrop::{IngestPipeline, PdfExtractor};
use std::path::Path;
use tempfile::TempDir;

/// Write a one-page PDF where each entry of `lines` becomes its own text line.
fn write_pdf(path: &Path, lines: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

struct FixedSummarizer {
    text: &'static str,
}

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn summarize(
        &self,
        _text: &str,
        _bounds: SummaryBounds,
    ) -> Result<String, SummarizeError> {
        Ok(self.text.to_string())
    }
}

struct DownSummarizer;

#[async_trait]
impl Summarizer for DownSummarizer {
    async fn summarize(
        &self,
        _text: &str,
        _bounds: SummaryBounds,
    ) -> Result<String, SummarizeError> {
        Err(SummarizeError::Service {
            status: 503,
            body: "overloaded".to_string(),
        })
    }
}

fn pipeline_for(dir: &TempDir, summarizer: Box<dyn Summarizer>) -> IngestPipeline {
    let mut settings = Settings::default();
    settings.vault.root = dir.path().join("vault");

    IngestPipeline::new(
        &settings,
        Box::new(PdfExtractor),
        summarizer,
        Box::new(TfIdfScorer::new(1000)),
    )
}

#[tokio::test]
async fn test_dropped_pdf_becomes_archived_file_and_note() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("dense_retrieval.pdf");
    write_pdf(
        &source,
        &[
            "Dense retrieval with embeddings outperforms keyword search.",
            "Embeddings capture semantics the keyword index misses.",
            "Conclusion",
            "This approach works well. It scales linearly.",
        ],
    );

    let pipeline = pipeline_for(
        &dir,
        Box::new(FixedSummarizer {
            text: "First key point. Second key point.",
        }),
    );

    let report = pipeline.ingest(&source).await.unwrap();
    assert!(!report.degraded);

    // The PDF was moved, not copied
    assert!(!source.exists());
    let archived = dir.path().join("vault/Papers/dense_retrieval.pdf");
    assert!(archived.exists());
    assert_eq!(report.archived, archived);

    // Note filename derives from the PDF filename
    let note_path = dir.path().join("vault/Notes/dense_retrieval.md");
    assert_eq!(report.note, note_path);
    let note = std::fs::read_to_string(&note_path).unwrap();

    // Front matter references the archived file by its real name
    assert!(note.contains("title: \"dense_retrieval\""));
    assert!(note.contains("source_pdf: ./Papers/dense_retrieval.pdf"));
    assert!(note.contains("[Open PDF](../Papers/dense_retrieval.pdf)"));

    // The conclusion section carries the passage after the heading
    let conclusion_at = note.find("## ✅ Conclusion").unwrap();
    let conclusion_section = &note[conclusion_at..];
    assert!(conclusion_section.contains("This approach works well. It scales linearly."));

    // Exactly one bullet per summary sentence
    let bullets: Vec<&str> = note.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(bullets, vec!["- First key point.", "- Second key point."]);

    // The dominant content word was tagged
    assert!(note.contains("embeddings"));
}

#[tokio::test]
async fn test_pdf_without_conclusion_heading_gets_sentinel() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("no_heading.pdf");
    write_pdf(
        &source,
        &[
            "Benchmark results for retrieval systems.",
            "Latency stays flat as the corpus grows.",
        ],
    );

    let pipeline = pipeline_for(
        &dir,
        Box::new(FixedSummarizer {
            text: "Single key point.",
        }),
    );

    let report = pipeline.ingest(&source).await.unwrap();

    let note = std::fs::read_to_string(&report.note).unwrap();
    assert!(note.contains("## ✅ Conclusion\nConclusion not found.\n"));
}

#[tokio::test]
async fn test_unavailable_summarizer_still_produces_note() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("degraded.pdf");
    write_pdf(
        &source,
        &[
            "Embedding quality drives retrieval quality.",
            "Conclusion",
            "Better embeddings win.",
        ],
    );

    let pipeline = pipeline_for(&dir, Box::new(DownSummarizer));

    let report = pipeline.ingest(&source).await.unwrap();
    assert!(report.degraded);

    // Archive, tags and conclusion still happened
    assert!(dir.path().join("vault/Papers/degraded.pdf").exists());
    let note = std::fs::read_to_string(&report.note).unwrap();
    assert!(note.contains("*Summary unavailable.*"));
    assert!(note.contains("Better embeddings win."));
    assert!(note.contains("embeddings"));
}

#[tokio::test]
async fn test_reprocessing_same_filename_overwrites_note() {
    let dir = TempDir::new().unwrap();

    let pipeline = pipeline_for(
        &dir,
        Box::new(FixedSummarizer {
            text: "Stable key point.",
        }),
    );

    let source = dir.path().join("paper.pdf");
    write_pdf(&source, &["First revision text only."]);
    let first = pipeline.ingest(&source).await.unwrap();

    write_pdf(&source, &["Second revision replaces the archive entirely."]);
    let second = pipeline.ingest(&source).await.unwrap();

    assert_eq!(first.note, second.note);
    let note = std::fs::read_to_string(&second.note).unwrap();
    assert!(note.contains("revision"));

    // Only one archived file and one note exist
    let papers: Vec<_> = std::fs::read_dir(dir.path().join("vault/Papers"))
        .unwrap()
        .collect();
    assert_eq!(papers.len(), 1);
}
