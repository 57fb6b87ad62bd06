//! Committing a chosen suggestion into the text

use crate::core::word::{self, byte_offset};

/// Replace the word left of `caret` with `chosen`.
///
/// The span is rescanned here rather than taken from the query, so edits made
/// while the popup was open are respected. Returns the new text and the
/// caret placed right after the inserted word, or `None` for an empty
/// `chosen`.
pub fn accept(text: &str, caret: usize, chosen: &str) -> Option<(String, usize)> {
    if chosen.is_empty() {
        return None;
    }

    let span = word::scan(text, caret);
    let start = byte_offset(text, span.start);
    let end = byte_offset(text, span.end);

    let mut new_text = String::with_capacity(text.len() - (end - start) + chosen.len());
    new_text.push_str(&text[..start]);
    new_text.push_str(chosen);
    new_text.push_str(&text[end..]);

    Some((new_text, span.start + chosen.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_whole_text() {
        assert_eq!(accept("wor", 3, "world"), Some(("world".to_string(), 5)));
    }

    #[test]
    fn test_accept_keeps_suffix() {
        let (text, caret) = accept("say wor, then", 7, "world").unwrap();
        assert_eq!(text, "say world, then");
        assert_eq!(caret, 9);
    }

    #[test]
    fn test_accept_mid_word_replaces_left_part_only() {
        // caret after "hel" in "hello"
        let (text, caret) = accept("hello", 3, "help").unwrap();
        assert_eq!(text, "helplo");
        assert_eq!(caret, 4);
    }

    #[test]
    fn test_accept_empty_span_inserts() {
        let (text, caret) = accept("a ", 2, "word").unwrap();
        assert_eq!(text, "a word");
        assert_eq!(caret, 6);
    }

    #[test]
    fn test_accept_multibyte() {
        let (text, caret) = accept("über grö", 8, "größe").unwrap();
        assert_eq!(text, "über größe");
        assert_eq!(caret, 10);
    }

    #[test]
    fn test_accept_empty_choice_is_noop() {
        assert_eq!(accept("wor", 3, ""), None);
    }

    #[test]
    fn test_accept_property() {
        let text = "alpha be,gamma de";
        let chars: Vec<char> = text.chars().collect();
        for caret in 0..=chars.len() {
            let span = word::scan(text, caret);
            let (new_text, new_caret) = accept(text, caret, "zz").unwrap();
            let expected = format!(
                "{}zz{}",
                chars[..span.start].iter().collect::<String>(),
                chars[caret..].iter().collect::<String>()
            );
            assert_eq!(new_text, expected);
            assert_eq!(new_caret, span.start + 2);
        }
    }
}
