//! Note composition.
//!
//! Pure assembly of derived artifacts into the final Markdown body. No I/O:
//! the creation date is injected by the caller, so identical inputs always
//! produce identical output.

use chrono::NaiveDate;

use crate::analysis::summary::Summary;

/// Rendered in place of the summary and key points when every chunk failed.
pub const SUMMARY_UNAVAILABLE: &str = "*Summary unavailable.*";

/// Everything the composer needs for one note.
#[derive(Debug)]
pub struct NoteContext<'a> {
    /// Display title, the PDF filename without its extension
    pub title: &'a str,
    pub summary: &'a Summary,
    /// Ranked tags, descending importance; may be empty on degraded runs
    pub tags: &'a [String],
    /// Archived PDF filename, extension included
    pub pdf_filename: &'a str,
    /// Name of the archive subdirectory, used in links
    pub papers_dir: &'a str,
    /// Conclusion excerpt or its sentinel
    pub conclusion: &'a str,
    pub created: NaiveDate,
}

/// Compose the note body.
///
/// Fixed section order: front matter, summary, key points, conclusion,
/// link back to the archived PDF. Degraded inputs render as explicit
/// placeholders (empty tag list, [`SUMMARY_UNAVAILABLE`]) rather than
/// being dropped.
pub fn compose_note(ctx: &NoteContext) -> String {
    let NoteContext {
        title,
        summary,
        tags,
        pdf_filename,
        papers_dir,
        conclusion,
        created,
    } = ctx;

    let tag_list = tags.join(", ");
    let created = created.format("%Y-%m-%d");

    let (summary_text, bullet_text) = if summary.is_empty() {
        (SUMMARY_UNAVAILABLE.to_string(), SUMMARY_UNAVAILABLE.to_string())
    } else {
        (summary.text(), summary.bullets().join("\n"))
    };

    format!(
        r#"---
title: "{title}"
tags: [{tag_list}]
source_pdf: ./{papers_dir}/{pdf_filename}
created: {created}
---

## 🔍 Summary
{summary_text}

## 🧠 Key Points
{bullet_text}

## ✅ Conclusion
{conclusion}

## 📎 Link to PDF
[Open PDF](../{papers_dir}/{pdf_filename})
"#
    )
}
