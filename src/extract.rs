//! PDF text extraction.
//!
//! The pipeline consumes plain text and never touches PDF internals, so
//! extraction sits behind a trait. The production implementation reads the
//! archived file with lopdf and joins per-page text with newlines.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from PDF text extraction. Each is fatal for its document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Cannot read PDF {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("PDF {path} is encrypted")]
    Encrypted { path: PathBuf },

    #[error("Cannot extract text from page {page} of {path}: {reason}")]
    PageFailed {
        path: PathBuf,
        page: u32,
        reason: String,
    },
}

/// Turns an archived PDF into plain document text.
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of the document, pages joined by newlines.
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

/// PDF text extraction backed by lopdf.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let doc = lopdf::Document::load(path).map_err(|e| ExtractError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if doc.is_encrypted() {
            return Err(ExtractError::Encrypted {
                path: path.to_path_buf(),
            });
        }

        let mut pages = Vec::new();
        for page in doc.get_pages().keys().copied() {
            let text = doc
                .extract_text(&[page])
                .map_err(|e| ExtractError::PageFailed {
                    path: path.to_path_buf(),
                    page,
                    reason: e.to_string(),
                })?;
            pages.push(text);
        }

        Ok(pages.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};
    use tempfile::TempDir;

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
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
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

    #[test]
    fn test_extracts_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("paper.pdf");
        write_pdf(&pdf, &["Introduction", "Results follow here.", "Conclusion"]);

        let text = PdfExtractor.extract_text(&pdf).unwrap();

        let intro = text.find("Introduction").unwrap();
        let results = text.find("Results follow here.").unwrap();
        let conclusion = text.find("Conclusion").unwrap();
        assert!(intro < results);
        assert!(results < conclusion);
    }

    #[test]
    fn test_lines_are_newline_separated() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("paper.pdf");
        write_pdf(&pdf, &["First line", "Second line"]);

        let text = PdfExtractor.extract_text(&pdf).unwrap();
        assert!(text.contains("First line\nSecond line"));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("absent.pdf");

        let err = PdfExtractor.extract_text(&pdf).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable { .. }));
    }

    #[test]
    fn test_non_pdf_bytes_are_unreadable() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("fake.pdf");
        std::fs::write(&pdf, b"plain text, not a PDF").unwrap();

        let err = PdfExtractor.extract_text(&pdf).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable { .. }));
    }
}
