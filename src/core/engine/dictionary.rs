//! Word Dictionary
//!
//! Frequency-counted word list used as the editor's completion engine.
//! Words are learned from text, matched by prefix, and optionally by a
//! Levenshtein-tolerant prefix when the typed prefix is long enough.
//!
//! ## File format
//!
//! UTF-8 text, one `word<TAB>count` entry per line. Lines without a tab are
//! treated as free text and every word in them counts once, so a plain text
//! file works as a starting dictionary.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::{Candidate, CompletionEngine, DictionaryError, EngineConfig, EngineError};
use crate::core::atomic::write_atomic;

/// Longest word worth remembering
const MAX_WORD_LEN: usize = 100;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Same character classes as char::is_alphanumeric
    Regex::new(r"[\p{Alphabetic}\p{N}]+").expect("word pattern is a valid regex")
});

/// Frequency-ranked word list implementing [`CompletionEngine`]
#[derive(Debug, Default, Clone)]
pub struct WordDictionary {
    /// Lowercased word -> number of occurrences
    counts: HashMap<String, u64>,
    config: EngineConfig,
}

impl WordDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            counts: HashMap::new(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of times `word` has been seen (case-insensitive)
    pub fn frequency(&self, word: &str) -> u64 {
        self.counts.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Lowercased words of `text`, skipping absurdly long runs
    pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        WORD_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|w| w.chars().count() <= MAX_WORD_LEN)
            .map(str::to_lowercase)
    }

    fn add_to(counts: &mut HashMap<String, u64>, word: String, count: u64) {
        let entry = counts.entry(word).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Parse dictionary file contents without touching `self`
    fn parse(contents: &str, path: &Path) -> Result<HashMap<String, u64>, DictionaryError> {
        let mut counts = HashMap::new();

        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            match line.split_once('\t') {
                Some((word, count)) => {
                    let malformed = || DictionaryError::Parse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                    };
                    let count: u64 = count.trim().parse().map_err(|_| malformed())?;
                    let mut words = Self::tokenize(word);
                    let word = match (words.next(), words.next()) {
                        (Some(w), None) => w,
                        _ => return Err(malformed()),
                    };
                    Self::add_to(&mut counts, word, count);
                }
                None => {
                    for word in Self::tokenize(line) {
                        Self::add_to(&mut counts, word, 1);
                    }
                }
            }
        }

        Ok(counts)
    }

    /// Re-apply the typed prefix's capitalization to a lowercased word
    fn match_case(prefix: &str, word: &str) -> String {
        let mut prefix_chars = prefix.chars();
        let first_upper = prefix_chars.next().is_some_and(char::is_uppercase);
        if !first_upper {
            return word.to_string();
        }

        let all_upper = prefix.chars().count() > 1 && prefix.chars().all(|c| !c.is_lowercase());
        if all_upper {
            return word.to_uppercase();
        }

        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Edit distance between two strings, counted in characters
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

impl CompletionEngine for WordDictionary {
    fn query(&self, prefix: &str, limit: usize) -> Result<Vec<Candidate>, EngineError> {
        if prefix.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let needle = prefix.to_lowercase();
        let needle_len = needle.chars().count();
        let config = &self.config;
        let fuzzy = config.tolerance > 0 && needle_len >= config.tolerance_threshold;

        let mut scored: Vec<(f64, &str)> = self
            .counts
            .iter()
            .filter(|(word, _)| word.as_str() != needle)
            .filter_map(|(word, &count)| {
                if word.starts_with(&needle) {
                    return Some((count as f64 * config.original_weight, word.as_str()));
                }
                if fuzzy && word.chars().count() >= needle_len {
                    let head: String = word.chars().take(needle_len).collect();
                    if levenshtein(&head, &needle) <= config.tolerance {
                        return Some((count as f64 * config.similar_weight, word.as_str()));
                    }
                }
                None
            })
            .collect();

        // Highest score first, then shorter, then alphabetical
        scored.sort_by(|(sa, wa), (sb, wb)| {
            sb.total_cmp(sa)
                .then_with(|| wa.len().cmp(&wb.len()))
                .then_with(|| wa.cmp(wb))
        });
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(score, word)| Candidate::new(Self::match_case(prefix, word), score))
            .collect())
    }

    fn add_text(&mut self, text: &str) {
        let before = self.counts.len();
        for word in Self::tokenize(text) {
            Self::add_to(&mut self.counts, word, 1);
        }
        debug!(
            new_words = self.counts.len() - before,
            total = self.counts.len(),
            "added text to dictionary"
        );
    }

    fn load_dictionary(&mut self, path: &Path) -> Result<(), DictionaryError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| DictionaryError::io(path, e))?;
        let parsed = Self::parse(&contents, path)?;
        let loaded = parsed.len();
        for (word, count) in parsed {
            Self::add_to(&mut self.counts, word, count);
        }
        info!(path = %path.display(), loaded, total = self.counts.len(), "dictionary loaded");
        Ok(())
    }

    fn save_dictionary(&self, path: &Path) -> Result<(), DictionaryError> {
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)));

        let lines: Vec<String> = entries
            .into_iter()
            .map(|(word, count)| format!("{}\t{}\n", word, count))
            .collect();
        write_atomic(path, lines.iter().map(|l| l.as_bytes()))
            .map_err(|e| DictionaryError::io(path, e))?;

        info!(path = %path.display(), words = self.counts.len(), "dictionary saved");
        Ok(())
    }

    fn clear(&mut self) {
        self.counts.clear();
    }

    fn configure(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(text: &str) -> WordDictionary {
        let mut dict = WordDictionary::new();
        dict.add_text(text);
        dict
    }

    fn words(candidates: Vec<Candidate>) -> Vec<String> {
        candidates.into_iter().map(|c| c.word).collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<String> = WordDictionary::tokenize("Hello, wörld! 42 snake_case").collect();
        assert_eq!(tokens, vec!["hello", "wörld", "42", "snake", "case"]);
    }

    #[test]
    fn test_query_prefix_ranked_by_frequency() {
        let dict = dictionary("work world world word work world");
        let result = dict.query("wor", 10).unwrap();
        assert_eq!(words(result), vec!["world", "work", "word"]);
    }

    #[test]
    fn test_query_limit_and_no_self_match() {
        let dict = dictionary("foo foobar foobaz football");
        let result = words(dict.query("foo", 2).unwrap());
        assert_eq!(result.len(), 2);
        assert!(!result.contains(&"foo".to_string()));
    }

    #[test]
    fn test_query_empty_prefix() {
        let dict = dictionary("foo bar");
        assert!(dict.query("", 10).unwrap().is_empty());
        assert!(dict.query("f", 0).unwrap().is_empty());
    }

    #[test]
    fn test_query_matches_case() {
        let dict = dictionary("world");
        assert_eq!(words(dict.query("Wo", 10).unwrap()), vec!["World"]);
        assert_eq!(words(dict.query("WO", 10).unwrap()), vec!["WORLD"]);
        assert_eq!(words(dict.query("wo", 10).unwrap()), vec!["world"]);
    }

    #[test]
    fn test_query_with_tolerance() {
        let mut dict = dictionary("world");
        assert!(dict.query("wpr", 10).unwrap().is_empty());

        dict.configure(EngineConfig {
            tolerance: 1,
            tolerance_threshold: 3,
            ..EngineConfig::default()
        })
        .unwrap();
        let result = dict.query("wpr", 10).unwrap();
        assert_eq!(words(result.clone()), vec!["world"]);
        assert_eq!(result[0].score, 0.5);

        // Below the threshold only exact prefixes count
        assert!(dict.query("wp", 10).unwrap().is_empty());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict");

        let dict = dictionary("alpha beta beta gamma");
        dict.save_dictionary(&path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved.lines().next(), Some("beta\t2"));

        let mut loaded = WordDictionary::new();
        loaded.load_dictionary(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.frequency("beta"), 2);
    }

    #[test]
    fn test_load_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict");
        std::fs::write(&path, "The quick fox\nthe lazy dog\n").unwrap();

        let mut dict = WordDictionary::new();
        dict.load_dictionary(&path).unwrap();
        assert_eq!(dict.frequency("the"), 2);
        assert_eq!(dict.frequency("fox"), 1);
    }

    #[test]
    fn test_load_malformed_leaves_dictionary_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict");
        std::fs::write(&path, "good\t3\nbad\tmany\n").unwrap();

        let mut dict = dictionary("keep");
        let err = dict.load_dictionary(&path).unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { line: 2, .. }));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.frequency("good"), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let mut dict = WordDictionary::new();
        let err = dict
            .load_dictionary(Path::new("/definitely/not/here/dict"))
            .unwrap_err();
        assert!(matches!(err, DictionaryError::Io { .. }));
    }

    #[test]
    fn test_clear_and_configure() {
        let mut dict = dictionary("alpha");
        dict.clear();
        assert!(dict.is_empty());

        let bad = EngineConfig {
            original_weight: -1.0,
            ..EngineConfig::default()
        };
        assert!(dict.configure(bad).is_err());
        assert_eq!(dict.config(), &EngineConfig::default());
    }
}
