//! Fixed-window text chunking.
//!
//! Partitions text into contiguous, non-overlapping windows sized for a
//! summarization model's input limit. No word-boundary awareness: a word may
//! be split across two chunks, but concatenating all chunks in order always
//! reproduces the input exactly.

/// Lazy iterator over fixed-size chunks of a text.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    max_chars: usize,
}

/// Split `text` into windows of at most `max_chars` characters.
///
/// Sizes are measured in characters, not bytes, so multi-byte input never
/// splits inside a code point. The final chunk may be shorter; empty input
/// yields no chunks.
///
/// # Panics
/// Panics if `max_chars` is zero.
pub fn chunks(text: &str, max_chars: usize) -> Chunks<'_> {
    assert!(max_chars > 0, "chunk size must be at least 1");
    Chunks {
        rest: text,
        max_chars,
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let split = byte_len_of_chars(self.rest, self.max_chars);
        let (chunk, rest) = self.rest.split_at(split);
        self.rest = rest;
        Some(chunk)
    }
}

/// Byte length of the first `n` characters of `s` (all of `s` if shorter).
fn byte_len_of_chars(s: &str, n: usize) -> usize {
    match s.char_indices().nth(n) {
        Some((i, _)) => i,
        None => s.len(),
    }
}
