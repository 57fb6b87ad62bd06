//! Word boundary scanning
//!
//! Finds the alphanumeric run that ends at the caret. All offsets are
//! character indices, not byte offsets.

/// Half-open character interval `[start, end)` of the word being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
}

impl WordSpan {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Extract the span's text from `text`.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let start = byte_offset(text, self.start);
        let end = byte_offset(text, self.end);
        &text[start..end]
    }
}

/// Scan backwards from `caret` over alphanumeric characters.
///
/// Returns an empty span at the caret when `caret == 0` or when the
/// character before the caret is not alphanumeric. A caret past the end of
/// the text is clamped to the end.
pub fn scan(text: &str, caret: usize) -> WordSpan {
    let caret_byte = byte_offset(text, caret);
    let caret = text[..caret_byte].chars().count();

    let run = text[..caret_byte]
        .chars()
        .rev()
        .take_while(|c| c.is_alphanumeric())
        .count();

    WordSpan {
        start: caret - run,
        end: caret,
    }
}

/// Byte offset of the `char_idx`-th character, clamped to `text.len()`.
pub fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
