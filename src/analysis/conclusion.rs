//! Conclusion-passage extraction.
//!
//! Papers rarely label their closing section consistently, so the locator
//! tries an ordered list of heading keywords: "conclusion(s)" first, then
//! "summary", then "discussion". The first pattern that matches anywhere in
//! the document wins, even when a later-listed keyword appears earlier in
//! the text. Callers must not assume positional priority.

use regex::Regex;
use std::sync::OnceLock;

/// Returned when no conclusion-like heading exists in the document.
pub const NOT_FOUND: &str = "Conclusion not found.";

static HEADING_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
static NEXT_HEADING: OnceLock<Regex> = OnceLock::new();

/// Heading patterns in precedence order. Each requires the keyword alone on
/// its own line, with a newline before and after.
fn heading_patterns() -> &'static [Regex] {
    HEADING_PATTERNS.get_or_init(|| {
        [
            r"(?i)\n\s*conclusions?\s*\n",
            r"(?i)\n\s*summary\s*\n",
            r"(?i)\n\s*discussion\s*\n",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid heading regex"))
        .collect()
    })
}

/// A line that looks like the start of the next section: an uppercase letter
/// followed by 3-30 letters or spaces, alone on its own line.
fn next_heading() -> &'static Regex {
    NEXT_HEADING.get_or_init(|| {
        Regex::new(r"\n\s*[A-Z][A-Za-z\s]{3,30}\s*\n").expect("Invalid heading regex")
    })
}

/// Extract a conclusion-like excerpt from full document text.
///
/// Takes up to `max_chars` characters after the first matching heading,
/// truncated early if a line resembling a new section heading appears.
/// Returns the trimmed excerpt, or [`NOT_FOUND`] when no heading matches.
pub fn extract_conclusion(text: &str, max_chars: usize) -> String {
    for pattern in heading_patterns() {
        let Some(m) = pattern.find(text) else {
            continue;
        };

        let tail = &text[m.end()..];
        let cut = byte_len_of_chars(tail, max_chars);
        let mut candidate = &tail[..cut];

        if let Some(heading) = next_heading().find(candidate) {
            candidate = &candidate[..heading.start()];
        }

        return candidate.trim().to_string();
    }

    NOT_FOUND.to_string()
}

/// Byte length of the first `n` characters of `s` (all of `s` if shorter).
fn byte_len_of_chars(s: &str, n: usize) -> usize {
    match s.char_indices().nth(n) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 1000;

    #[test]
    fn test_extracts_text_after_conclusion_heading() {
        let text = "Intro paragraph.\nConclusion\nThe method works well in practice.\n";
        assert_eq!(
            extract_conclusion(text, MAX),
            "The method works well in practice."
        );
    }

    #[test]
    fn test_heading_match_is_case_insensitive() {
        let text = "Body text.\n  CONCLUSIONS  \nUppercase headings are common in PDFs.\n";
        assert_eq!(
            extract_conclusion(text, MAX),
            "Uppercase headings are common in PDFs."
        );
    }

    #[test]
    fn test_pattern_order_beats_document_order() {
        // "Summary" appears first in the document, but the conclusion
        // pattern is tried first and wins
        let text = "\nSummary\nAAA early section text here.\nMore body.\nConclusion\nBBB closing text here.\n";
        let excerpt = extract_conclusion(text, MAX);
        assert!(excerpt.starts_with("BBB"), "got: {excerpt}");
        assert!(!excerpt.contains("AAA"));
    }

    #[test]
    fn test_summary_beats_earlier_discussion() {
        let text = "\nDiscussion\nDDD debate text.\nMiddle body.\nSummary\nSSS recap text.\n";
        let excerpt = extract_conclusion(text, MAX);
        assert!(excerpt.starts_with("SSS"), "got: {excerpt}");
    }

    #[test]
    fn test_sentinel_when_no_heading() {
        let text = "A document with plain paragraphs and no labelled sections at all.";
        assert_eq!(extract_conclusion(text, MAX), NOT_FOUND);
        assert_eq!(extract_conclusion("", MAX), NOT_FOUND);
    }

    #[test]
    fn test_heading_requires_its_own_line() {
        // Inline keyword is not a heading
        let text = "In conclusion we believe this works. More prose follows here.";
        assert_eq!(extract_conclusion(text, MAX), NOT_FOUND);
    }

    #[test]
    fn test_heading_at_start_of_text_needs_preceding_newline() {
        let text = "Conclusion\nNo newline precedes the keyword here.";
        assert_eq!(extract_conclusion(text, MAX), NOT_FOUND);
    }

    #[test]
    fn test_truncates_at_next_heading() {
        let text = "\nConclusion\nOur approach scales to large corpora.\nAcknowledgements\nThanks to the reviewers.\n";
        assert_eq!(
            extract_conclusion(text, MAX),
            "Our approach scales to large corpora."
        );
    }

    #[test]
    fn test_excerpt_bounded_by_max_chars() {
        let filler = "x".repeat(3000);
        let text = format!("Paper body.\nConclusion\n{filler}");
        let excerpt = extract_conclusion(&text, MAX);
        assert_eq!(excerpt.chars().count(), MAX);
    }

    #[test]
    fn test_blank_lines_before_heading_are_allowed() {
        let text = "End of results.\n\n\nConclusion\n\nFindings hold across datasets.\n";
        assert_eq!(
            extract_conclusion(text, MAX),
            "Findings hold across datasets."
        );
    }
}
