use num::Float;

use crate::{utils::math::vector::SparseVec, vectorizer::{corpus::DocumentFrequency, token::TokenFrequency}};

/// IDF weights of a corpus
/// A token missing from the corpus has IDF 0.
#[derive(Debug, Clone, PartialEq)]
pub struct IDFVector<N = f64>
where
    N: Float,
{
    /// token -> IDF
    pub idf_vec: SparseVec<N>,
    /// number of documents the weights were computed from
    pub doc_num: u64,
}

impl<N> IDFVector<N>
where
    N: Float,
{
    pub fn new() -> Self {
        Self {
            idf_vec: SparseVec::new(),
            doc_num: 0,
        }
    }

    /// IDF of one token, 0 if unseen
    #[inline]
    pub fn get(&self, token: &str) -> N {
        self.idf_vec.get(token)
    }
}

impl<N> Default for IDFVector<N>
where
    N: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

/// TF-IDF calculation strategy
///
/// The vectorizer is generic over this trait so a different weighting can be
/// plugged in without touching the scoring code.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// TF map of one token sequence
    ///
    /// # Arguments
    /// * `freq` - token counts of the document or query
    fn tf_vec(freq: &TokenFrequency) -> SparseVec<N>;

    /// IDF weights of a whole corpus
    ///
    /// # Arguments
    /// * `df` - document frequency statistics of the corpus
    fn idf_vec(df: &DocumentFrequency) -> IDFVector<N>;

    /// TF-IDF weight vector
    /// weight = tf × idf, tokens without IDF weigh 0.
    fn weight_vec(tf: &SparseVec<N>, idf: &IDFVector<N>) -> SparseVec<N> {
        let mut weights = SparseVec::with_capacity(tf.nnz());
        for (token, value) in tf.iter() {
            weights.insert(token, value * idf.get(token));
        }
        weights
    }
}

/// Default TF-IDF engine
/// - TF: occurrences / total tokens
/// - IDF: ln(total documents / (1 + document frequency))
///
/// The IDF is not clamped: a token present in every document gets a
/// negative weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// IDF of a token found in `doc_freq` of `doc_num` documents
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        (doc_num as f64 / (1.0 + doc_freq as f64)).ln()
    }
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    fn tf_vec(freq: &TokenFrequency) -> SparseVec<N> {
        freq.tf_vector()
    }

    fn idf_vec(df: &DocumentFrequency) -> IDFVector<N> {
        let doc_num = df.get_doc_num();
        let mut idf_vec = SparseVec::with_capacity(df.vocab_size());
        for (token, doc_freq) in df.iter() {
            let idf: N = num::cast(Self::idf_calc(doc_num, doc_freq)).unwrap_or_else(N::zero);
            idf_vec.insert(token, idf);
        }
        IDFVector { idf_vec, doc_num }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn df_of(docs: &[&[&str]]) -> DocumentFrequency {
        let mut df = DocumentFrequency::new();
        for doc in docs {
            df.add_set(*doc);
        }
        df
    }

    #[test]
    fn idf_uses_smoothed_log_ratio() {
        let df = df_of(&[&["car", "engine"], &["car", "race"], &["boat"], &["plane"]]);
        let idf: IDFVector<f64> = DefaultTFIDFEngine::idf_vec(&df);
        assert_eq!(idf.doc_num, 4);
        assert!((idf.get("car") - (4.0f64 / 3.0).ln()).abs() < EPS);
        assert!((idf.get("engine") - (4.0f64 / 2.0).ln()).abs() < EPS);
        assert_eq!(idf.get("unseen"), 0.0);
    }

    #[test]
    fn idf_is_negative_for_tokens_in_every_document() {
        let df = df_of(&[&["car"], &["car"]]);
        let idf: IDFVector<f64> = DefaultTFIDFEngine::idf_vec(&df);
        assert!(idf.get("car") < 0.0);
        assert!((idf.get("car") - (2.0f64 / 3.0).ln()).abs() < EPS);
    }

    #[test]
    fn idf_does_not_increase_with_document_frequency() {
        let doc_num = 50;
        let mut last = f64::INFINITY;
        for doc_freq in 0..=doc_num {
            let idf = DefaultTFIDFEngine::idf_calc(doc_num, doc_freq);
            assert!(idf.is_finite());
            assert!(idf <= last);
            last = idf;
        }
    }

    #[test]
    fn weight_is_tf_times_idf() {
        let df = df_of(&[&["car", "engine"], &["race"], &["boat"]]);
        let idf: IDFVector<f64> = DefaultTFIDFEngine::idf_vec(&df);
        let freq = TokenFrequency::from(&["car", "car", "unknown", "engine"][..]);
        let tf: SparseVec<f64> = DefaultTFIDFEngine::tf_vec(&freq);
        let w = DefaultTFIDFEngine::weight_vec(&tf, &idf);
        assert!((w.get("car") - 0.5 * (3.0f64 / 2.0).ln()).abs() < EPS);
        assert!((w.get("engine") - 0.25 * (3.0f64 / 2.0).ln()).abs() < EPS);
        // unseen tokens are kept but inert
        assert!(w.contains("unknown"));
        assert_eq!(w.get("unknown"), 0.0);
    }

    #[test]
    fn empty_statistics_give_empty_idf() {
        let idf: IDFVector<f64> = DefaultTFIDFEngine::idf_vec(&DocumentFrequency::new());
        assert_eq!(idf.doc_num, 0);
        assert!(idf.idf_vec.is_empty());
    }

    #[test]
    fn engine_works_for_f32() {
        let df = df_of(&[&["a"], &["b"], &["c"]]);
        let idf: IDFVector<f32> = DefaultTFIDFEngine::idf_vec(&df);
        assert!((idf.get("a") - (1.5f32).ln()).abs() < 1e-6);
    }
}
