//! Heuristic sentence segmentation.
//!
//! Splits text at a terminator (`.`, `!`, `?`) followed by whitespace and an
//! uppercase letter. This is a heuristic, not a grammatical parse: it will
//! not split after abbreviations that lack following capitals, and it will
//! split too eagerly before quoted capitals. Good enough for turning model
//! summaries into bullet points.

/// Lazy iterator over trimmed sentences of a text.
///
/// Borrows the input; yields non-empty subslices in order.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

/// Segment `text` into sentences.
///
/// Uppercase detection is ASCII-only, so sentence starts in non-Latin
/// scripts do not trigger a split.
pub fn sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text.trim() }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let (piece, rest) = split_at_boundary(self.rest);
            self.rest = rest;
            let piece = piece.trim();
            if !piece.is_empty() {
                return Some(piece);
            }
        }
        None
    }
}

/// Split off the first sentence at a terminator + whitespace + uppercase
/// boundary. The whitespace run belongs to neither side. Returns the whole
/// text when no boundary exists.
fn split_at_boundary(text: &str) -> (&str, &str) {
    for (i, ch) in text.char_indices() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }

        let after = i + ch.len_utf8();
        let tail = &text[after..];
        let ws_len: usize = tail
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(|c| c.len_utf8())
            .sum();
        if ws_len == 0 {
            continue;
        }

        if let Some(next) = tail[ws_len..].chars().next() {
            if next.is_ascii_uppercase() {
                return (&text[..after], &text[after + ws_len..]);
            }
        }
    }

    (text, "")
}
