//! This crate is a text classifier built on a TF-IDF Vectorizer.

pub mod config;
pub mod error;
pub mod loader;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// The classification context of this crate.
/// It converts a labeled corpus into TF-IDF vectors once, then scores and
/// classifies any number of queries against them.
///
/// Internally, it holds:
/// - The IDF weights of the corpus
/// - One sparse weight vector per document, in identifier order
/// - The tokenizer used for queries
///
/// `TFIDFVectorizer<E>` is generic over the TF-IDF calculation engine `E`
/// (default: `DefaultTFIDFEngine`).
///
/// It is immutable once built, so it can be shared across threads and used
/// for concurrent queries.
pub use vectorizer::TFIDFVectorizer;

/// Corpus
/// Labeled documents as token sequences, keyed by `"<category>/<file name>"`.
/// Documents are kept sorted by identifier, which makes every
/// "first encountered" tie-break reproducible.
pub use vectorizer::corpus::{category_of, Corpus, DocumentFrequency};

/// Tokenizer and stopword set
/// Lowercases text, keeps `a`-`z` runs as tokens and optionally drops
/// stopwords from an injected set.
pub use vectorizer::tokenizer::{Stopwords, Tokenizer};

/// Token Frequency structure
/// Counts token occurrences of one document or query.
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::{TermFrequencyMap, TokenFrequency};

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different TF-IDF calculation
/// strategies into `TFIDFVectorizer<E>`.
/// `DefaultTFIDFEngine` computes TF = count / total and
/// IDF = ln(N / (1 + df)).
pub use vectorizer::tfidf::{DefaultTFIDFEngine, IDFVector, TFIDFEngine};

/// Search Hits and Hit Entry structures
/// - `Hits`: similarity of a query to every document, with stable sorting
/// - `HitEntry`: a single document key and its score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

/// Decision rules and their results
/// - `DecisionRule::Nearest`: category of the most similar document
/// - `DecisionRule::Knn(k)`: majority vote among the k most similar documents
pub use vectorizer::evaluate::classify::{Classification, DecisionRule, Neighbor, UndeterminedReason};

/// Sparse vectors
/// Token keyed sparse vector with dot product, norm and cosine similarity.
pub use utils::math::vector::{SparseVec, WeightVector};

pub use config::{Config, RuleVariant};
pub use error::{Error, Result};
