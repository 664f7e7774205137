use std::fmt::Debug;

use rayon::prelude::*;

use crate::{utils::math::vector::WeightVector, vectorizer::{tfidf::TFIDFEngine, TFIDFVectorizer}};

/// One scored document
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry {
    /// Document identifier
    pub key: Box<str>,
    /// Cosine similarity to the query
    pub score: f64,
}

/// Similarity of a query to every corpus document
/// The list starts in document (identifier) order.
#[derive(Clone, Default)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score
    /// The sort is stable: equal scores keep their current relative order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// First entry holding the highest score in current order
    /// `None` when there are no (non NaN) entries.
    pub fn best(&self) -> Option<&HitEntry> {
        let mut best: Option<&HitEntry> = None;
        for hit in self.list.iter().filter(|hit| !hit.score.is_nan()) {
            if best.map_or(true, |b| hit.score > b.score) {
                best = Some(hit);
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.key, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.key, hit.score)))
                .finish()
        }
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine<f64>,
{
    /// Cosine similarity of `query` to every document
    /// Documents are scored in parallel; the result keeps identifier order.
    pub fn similarity(&self, query: &WeightVector) -> Hits {
        let list: Vec<HitEntry> = self
            .documents()
            .par_iter()
            .map(|doc| HitEntry {
                key: doc.key.clone(),
                score: query.cosine_similarity(&doc.weights),
            })
            .collect();
        Hits { list }
    }

    /// Tokenize, vectorize and score a query text
    pub fn similarity_text(&self, text: &str) -> Hits {
        self.similarity(&self.vectorize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{corpus::Corpus, tokenizer::Tokenizer};

    fn hit(key: &str, score: f64) -> HitEntry {
        HitEntry { key: Box::from(key), score }
    }

    fn keys(hits: &Hits) -> Vec<&str> {
        hits.list.iter().map(|h| h.key.as_ref()).collect()
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut hits = Hits::new(vec![
            hit("a/1", 0.2),
            hit("b/1", 0.9),
            hit("c/1", 0.2),
            hit("d/1", f64::NAN),
            hit("e/1", 0.9),
        ]);
        hits.sort_by_score();
        assert_eq!(keys(&hits), vec!["b/1", "e/1", "a/1", "c/1"]);
    }

    #[test]
    fn best_keeps_first_maximum() {
        let hits = Hits::new(vec![hit("a/1", 0.5), hit("b/1", 0.7), hit("c/1", 0.7)]);
        assert_eq!(hits.best().map(|h| h.key.as_ref()), Some("b/1"));
        assert!(Hits::default().best().is_none());
    }

    #[test]
    fn best_on_all_zero_scores_is_first_entry() {
        let hits = Hits::new(vec![hit("a/1", 0.0), hit("b/1", 0.0)]);
        assert_eq!(hits.best().map(|h| h.key.as_ref()), Some("a/1"));
    }

    #[test]
    fn similarity_scores_every_document_in_order() {
        let tokenizer = Tokenizer::new();
        let corpus = Corpus::from_texts(
            vec![
                ("sport/1", "hockey team wins final"),
                ("autos/1", "car engine repair"),
                ("autos/2", "car race track"),
            ],
            &tokenizer,
        );
        let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(&corpus, tokenizer);
        let hits = vectorizer.similarity_text("engine");
        assert_eq!(keys(&hits), vec!["autos/1", "autos/2", "sport/1"]);
        assert!(hits.list[0].score > 0.0);
        assert_eq!(hits.list[1].score, 0.0);
        assert_eq!(hits.list[2].score, 0.0);
    }

    #[test]
    fn debug_alternate_lists_each_hit() {
        let hits = Hits::new(vec![hit("a/1", 0.5)]);
        assert_eq!(format!("{:#?}", hits), "Hits [\n    \"a/1\": 0.500000\n]");
    }
}
