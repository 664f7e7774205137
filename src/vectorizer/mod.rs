pub mod corpus;
pub mod evaluate;
pub mod tfidf;
pub mod token;
pub mod tokenizer;

use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    utils::math::vector::WeightVector,
    vectorizer::{
        corpus::Corpus,
        tfidf::{DefaultTFIDFEngine, IDFVector, TFIDFEngine},
        token::TokenFrequency,
        tokenizer::Tokenizer,
    },
};

/// TF-IDF vectors of a labeled corpus
///
/// Built once from a [`Corpus`] and immutable afterwards. It holds the IDF
/// weights, one weight vector per document (in identifier order) and the
/// tokenizer used for queries, so every query goes through the same
/// normalization as the corpus did.
///
/// `TFIDFVectorizer<E>` is generic over the weighting engine `E`
/// (default: [`DefaultTFIDFEngine`]).
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine<f64>,
{
    /// Document weight vectors, sorted by identifier
    documents: Vec<DocVector>,
    /// IDF weights of the corpus
    idf: IDFVector<f64>,
    /// Tokenizer applied to queries
    tokenizer: Tokenizer,
    _marker: PhantomData<E>,
}

/// Weight vector of one corpus document
#[derive(Debug, Clone)]
pub struct DocVector {
    /// Document identifier
    pub key: Box<str>,
    /// TF-IDF weights
    pub weights: WeightVector,
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine<f64>,
{
    /// Compute IDF and every document vector of `corpus`
    ///
    /// # Arguments
    /// * `corpus` - tokenized corpus
    /// * `tokenizer` - tokenizer for later queries, normally the one that built `corpus`
    pub fn new(corpus: &Corpus, tokenizer: Tokenizer) -> Self {
        let df = corpus.document_frequency();
        let idf = E::idf_vec(&df);

        // 並列でも collect 後は識別子順のまま
        let documents: Vec<DocVector> = corpus
            .raw()
            .par_iter()
            .map(|(key, tokens)| {
                let freq = TokenFrequency::from(tokens.as_slice());
                let mut weights = E::weight_vec(&E::tf_vec(&freq), &idf);
                weights.shrink_to_fit();
                DocVector { key: key.clone(), weights }
            })
            .collect();

        info!(
            documents = documents.len(),
            categories = corpus.categories().len(),
            vocabulary = df.vocab_size(),
            stopword_filtering = tokenizer.filters_stopwords(),
            "built tf-idf vectors"
        );

        Self {
            documents,
            idf,
            tokenizer,
            _marker: PhantomData,
        }
    }

    /// Weight vector of a query text
    /// Tokens unseen in the corpus weigh 0.
    pub fn vectorize(&self, text: &str) -> WeightVector {
        let tokens = self.tokenizer.tokenize(text);
        if tokens.is_empty() {
            warn!("query has no tokens, every similarity will be 0");
        }
        debug!(tokens = tokens.len(), "tokenized query");
        self.vectorize_tokens(&tokens)
    }

    /// Weight vector of an already tokenized query
    pub fn vectorize_tokens<T>(&self, tokens: &[T]) -> WeightVector
    where
        T: AsRef<str>,
    {
        let freq = TokenFrequency::from(tokens);
        debug!(distinct = freq.token_num(), total = freq.token_sum(), "query term counts");
        E::weight_vec(&E::tf_vec(&freq), &self.idf)
    }

    /// Document vectors in identifier order
    pub fn documents(&self) -> &[DocVector] {
        &self.documents
    }

    /// Weight vector of one document
    pub fn get_doc(&self, key: &str) -> Option<&WeightVector> {
        self.documents
            .binary_search_by(|doc| doc.key.as_ref().cmp(key))
            .ok()
            .map(|idx| &self.documents[idx].weights)
    }

    pub fn idf(&self) -> &IDFVector<f64> {
        &self.idf
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
