//! Keyword Extractor: frequency-ranked content words of a document.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::data::{self, DataError};

const MIN_TOKEN_CHARS: usize = 3;
const MAX_KEYWORDS: usize = 50;

/// Lowercases and replaces every character that is not a word character or
/// whitespace with a space.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Normalized whitespace tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Function words ignored by the extractor.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let words: Vec<String> = data::parse_table("stop_words", json)?;
        Ok(Self::new(words))
    }

    /// Loads the override file when given, otherwise the embedded list.
    pub fn load(path: Option<&Path>) -> Result<Self, DataError> {
        let json = data::read_table(path, data::STOP_WORDS_JSON)?;
        let stop_words = Self::from_json(&json)?;
        debug!("Stop words loaded: {}", stop_words.len());
        Ok(stop_words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Returns up to 50 tokens that occur more than once, most frequent first.
/// Tokens shorter than three characters, stop words and tokens with
/// anything other than ASCII letters are skipped. Equal counts keep first-occurrence order.
pub fn extract_keywords(text: &str, stop_words: &StopWords) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for token in normalize(text).split_whitespace() {
        if token.chars().count() < MIN_TOKEN_CHARS
            || stop_words.contains(token)
            || !token.chars().all(|c| c.is_ascii_alphabetic())
        {
            continue;
        }
        let count = counts.entry(token.to_string()).or_insert(0);
        if *count == 0 {
            order.push(token.to_string());
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .filter_map(|token| {
            let count = counts.get(&token).copied().unwrap_or(0);
            (count > 1).then_some((token, count))
        })
        .collect();

    // stable: ties stay in first-occurrence order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_words() -> StopWords {
        StopWords::load(None).unwrap()
    }

    #[test]
    fn test_embedded_stop_words_load() {
        let words = stop_words();
        assert!(words.len() >= 50);
        assert!(words.contains("the"));
        assert!(words.contains("with"));
        assert!(!words.contains("python"));
    }

    #[test]
    fn test_normalize_replaces_punctuation() {
        assert_eq!(normalize("Node.js, C++ & SQL!"), "node js  c     sql ");
    }

    #[test]
    fn test_repeated_words_ranked_by_frequency() {
        let text = "Python developer. Python, Python and React. React developer.";
        let keywords = extract_keywords(text, &stop_words());
        assert_eq!(keywords, vec!["python", "developer", "react"]);
    }

    #[test]
    fn test_single_occurrences_dropped() {
        let keywords = extract_keywords("Rust Go Kotlin Swift", &stop_words());
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_short_stop_and_numeric_tokens_dropped() {
        let text = "AI AI the the the team2 team2 2023 2023 with with";
        assert!(extract_keywords(text, &stop_words()).is_empty());
    }

    #[test]
    fn test_non_ascii_tokens_dropped() {
        let text = "résumé résumé naïve naïve python python";
        assert_eq!(extract_keywords(text, &stop_words()), vec!["python"]);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let text = "zeta alpha zeta alpha mango mango";
        let keywords = extract_keywords(text, &stop_words());
        assert_eq!(keywords, vec!["zeta", "alpha", "mango"]);
    }

    #[test]
    fn test_capped_at_fifty() {
        let text: String = (0..60)
            .map(|i| {
                let word: String = std::iter::repeat(char::from(b'a' + (i % 26) as u8))
                    .take(3 + i / 26)
                    .collect();
                format!("{word} {word} ")
            })
            .collect();
        let keywords = extract_keywords(&text, &stop_words());
        assert_eq!(keywords.len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_keywords("", &stop_words()).is_empty());
    }
}
