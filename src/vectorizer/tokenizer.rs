//! Text normalization into lowercase word tokens.
//!
//! Only the Latin letters `a`-`z` survive normalization. Every other
//! character (digits, punctuation, non-ASCII letters) acts as a separator.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// Set of words dropped by the tokenizer when filtering is enabled.
///
/// Words are stored lowercase. Lookups are exact, since the tokenizer only
/// emits lowercase tokens.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<Box<str>>,
}

impl Stopwords {
    /// Empty set
    pub fn new() -> Self {
        Self { words: HashSet::new() }
    }

    /// English stopwords (Stopwords ISO list from the `stop-words` crate)
    pub fn english() -> Self {
        let mut stopwords = Self::new();
        stopwords.extend(stop_words::get(LANGUAGE::English).iter());
        stopwords
    }

    /// Add words, lowercased
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.words.insert(word.into_boxed_str());
            }
        }
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S> FromIterator<S> for Stopwords
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stopwords = Self::new();
        stopwords.extend(iter);
        stopwords
    }
}

/// Lowercasing word tokenizer with optional stopword filtering.
///
/// `tokenize` is a pure function of the input text and this configuration.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    /// `None` disables filtering
    stopwords: Option<Stopwords>,
}

impl Tokenizer {
    /// Tokenizer without stopword filtering
    pub fn new() -> Self {
        Self { stopwords: None }
    }

    /// Tokenizer that drops every token in `stopwords`
    pub fn with_stopwords(stopwords: Stopwords) -> Self {
        Self { stopwords: Some(stopwords) }
    }

    pub fn filters_stopwords(&self) -> bool {
        self.stopwords.is_some()
    }

    /// Split text into lowercase `a`-`z` tokens
    ///
    /// # Arguments
    /// * `text` - raw text
    ///
    /// # Returns
    /// * `Vec<String>` - tokens in text order, duplicates kept
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_lowercase() || c.is_whitespace() { c } else { ' ' })
            .collect();
        normalized
            .split_whitespace()
            .filter(|token| !self.is_stopword(token))
            .map(String::from)
            .collect()
    }

    #[inline]
    fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.as_ref().is_some_and(|s| s.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("The Hockey\tteam\nWON"),
            vec!["the", "hockey", "team", "won"]
        );
    }

    #[test]
    fn punctuation_and_digits_separate_tokens() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("NASA's M3 processor, 3D-graphics!"),
            vec!["nasa", "s", "m", "processor", "d", "graphics"]
        );
    }

    #[test]
    fn non_latin_letters_are_dropped() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.tokenize("café über naïve"), vec!["caf", "ber", "na", "ve"]);
    }

    #[test]
    fn empty_and_symbol_only_input_gives_no_tokens() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  123 !!! ... ").is_empty());
    }

    #[test]
    fn stopwords_are_kept_without_filtering() {
        let tokenizer = Tokenizer::new();
        assert!(!tokenizer.filters_stopwords());
        assert_eq!(tokenizer.tokenize("the car"), vec!["the", "car"]);
    }

    #[test]
    fn injected_stopwords_are_dropped() {
        let stopwords: Stopwords = ["The", "a "].into_iter().collect();
        let tokenizer = Tokenizer::with_stopwords(stopwords);
        assert!(tokenizer.filters_stopwords());
        assert_eq!(tokenizer.tokenize("The car and a race"), vec!["car", "and", "race"]);
    }

    #[test]
    fn english_list_filters_common_words() {
        let stopwords = Stopwords::english();
        assert!(!stopwords.is_empty());
        assert!(stopwords.contains("the"));
        let tokenizer = Tokenizer::with_stopwords(stopwords);
        assert_eq!(tokenizer.tokenize("The medicine"), vec!["medicine"]);
    }
}
