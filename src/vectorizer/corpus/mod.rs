use indexmap::IndexMap;
use tracing::debug;

use crate::vectorizer::{token::TokenFrequency, tokenizer::Tokenizer};

/// Separator between category and file name in a document identifier
pub const CATEGORY_SEPARATOR: char = '/';

/// Category part of a document identifier
/// Everything before the first separator, or the whole identifier if there is none.
///
/// ```
/// use tf_idf_classifier::vectorizer::corpus::category_of;
/// assert_eq!(category_of("rec.autos/doc_1.txt"), "rec.autos");
/// assert_eq!(category_of("orphan"), "orphan");
/// ```
#[inline]
pub fn category_of(doc_id: &str) -> &str {
    doc_id
        .split_once(CATEGORY_SEPARATOR)
        .map_or(doc_id, |(category, _)| category)
}

/// Labeled documents as token sequences
/// identifier -> tokens
///
/// Documents are kept sorted by identifier. Every pass over the corpus
/// visits them in that order, which fixes every "first encountered" tie-break.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: IndexMap<Box<str>, Vec<String>>,
}

impl Corpus {
    /// Empty corpus
    pub fn new() -> Self {
        Self { documents: IndexMap::new() }
    }

    /// Build from already tokenized documents
    /// A repeated identifier keeps the last token sequence.
    pub fn from_tokens<I, K>(docs: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<Box<str>>,
    {
        let mut documents: IndexMap<Box<str>, Vec<String>> = docs
            .into_iter()
            .map(|(key, tokens)| (key.into(), tokens))
            .collect();
        documents.sort_keys();
        Self { documents }
    }

    /// Tokenize raw texts and build the corpus
    /// The raw text is dropped once tokenized.
    pub fn from_texts<I, K, T>(texts: I, tokenizer: &Tokenizer) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<Box<str>>,
        T: AsRef<str>,
    {
        Self::from_tokens(texts.into_iter().map(|(key, text)| {
            let key: Box<str> = key.into();
            let tokens = tokenizer.tokenize(text.as_ref());
            debug!(doc = %key, tokens = tokens.len(), "tokenized document");
            (key, tokens)
        }))
    }

    /// Token sequence of one document
    pub fn get(&self, doc_id: &str) -> Option<&[String]> {
        self.documents.get(doc_id).map(Vec::as_slice)
    }

    /// Documents in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.documents
            .iter()
            .map(|(key, tokens)| (key.as_ref(), tokens.as_slice()))
    }

    /// Underlying ordered map, for parallel passes
    pub(crate) fn raw(&self) -> &IndexMap<Box<str>, Vec<String>> {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Distinct categories in first-seen (identifier) order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for key in self.documents.keys() {
            let category = category_of(key);
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Count, for every token, how many documents contain it
    pub fn document_frequency(&self) -> DocumentFrequency {
        let mut df = DocumentFrequency::new();
        for tokens in self.documents.values() {
            let freq = TokenFrequency::from(tokens.as_slice());
            df.add_set(&freq.token_set_ref_str());
        }
        df
    }
}

/// Document frequency statistics of a corpus
/// It only keeps:
/// - The number of documents
/// - The number of documents in which each token appears
///
/// It is the base data for IDF calculation.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequency {
    doc_num: u64,
    term_counts: IndexMap<Box<str>, u64>,
}

impl DocumentFrequency {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add one document given its distinct tokens
    /// Callers pass each token once per document.
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            *self.term_counts.entry(Box::from(term.as_ref())).or_insert(0) += 1;
        }
    }

    /// Number of documents added
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// `(token, document count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.term_counts.iter().map(|(term, count)| (term.as_ref(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn category_is_prefix_before_first_separator() {
        assert_eq!(category_of("sci.electronics/doc_9.txt"), "sci.electronics");
        assert_eq!(category_of("a/b/c"), "a");
        assert_eq!(category_of("/leading"), "");
        assert_eq!(category_of("plain"), "plain");
    }

    #[test]
    fn documents_are_sorted_by_identifier() {
        let corpus = Corpus::from_tokens(vec![
            ("sport/2", toks(&["b"])),
            ("autos/9", toks(&["c"])),
            ("sport/1", toks(&["a"])),
        ]);
        let ids: Vec<&str> = corpus.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["autos/9", "sport/1", "sport/2"]);
        assert_eq!(corpus.categories(), vec!["autos", "sport"]);
        assert_eq!(corpus.get("sport/1"), Some(&toks(&["a"])[..]));
        assert_eq!(corpus.get("nope"), None);
    }

    #[test]
    fn from_texts_tokenizes() {
        let tokenizer = Tokenizer::new();
        let corpus = Corpus::from_texts(vec![("autos/1", "Fast CAR, big engine!")], &tokenizer);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get("autos/1"), Some(&toks(&["fast", "car", "big", "engine"])[..]));
    }

    #[test]
    fn document_frequency_counts_once_per_document() {
        let corpus = Corpus::from_tokens(vec![
            ("a/1", toks(&["car", "car", "car", "engine"])),
            ("b/1", toks(&["car", "race"])),
            ("c/1", toks(&[])),
        ]);
        let df = corpus.document_frequency();
        assert_eq!(df.get_doc_num(), 3);
        assert_eq!(df.get_term_count("car"), 2);
        assert_eq!(df.get_term_count("engine"), 1);
        assert_eq!(df.get_term_count("race"), 1);
        assert_eq!(df.get_term_count("boat"), 0);
        assert_eq!(df.vocab_size(), 3);
    }

    #[test]
    fn empty_corpus_has_no_statistics() {
        let corpus = Corpus::new();
        assert!(corpus.is_empty());
        let df = corpus.document_frequency();
        assert_eq!(df.get_doc_num(), 0);
        assert_eq!(df.vocab_size(), 0);
    }
}
