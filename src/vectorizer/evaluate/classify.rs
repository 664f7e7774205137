//! Decision rules turning similarity scores into a category.
//!
//! Both rules work on [`Hits`] in document identifier order:
//! - `Nearest` takes the category of the first document with the highest score.
//! - `Knn(k)` takes the `k` best documents (stable sort, so equal scores keep
//!   identifier order) and returns the category with the most votes. Equal vote
//!   counts go to the category whose first vote came from the better ranked
//!   neighbor.
//!
//! An empty corpus yields [`Classification::Undetermined`] instead of an error.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::{
    utils::math::vector::WeightVector,
    vectorizer::{corpus::category_of, evaluate::scoring::Hits, tfidf::TFIDFEngine, TFIDFVectorizer},
};

/// Classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionRule {
    /// Category of the single most similar document
    Nearest,
    /// Majority vote among the k most similar documents
    Knn(usize),
}

impl DecisionRule {
    /// Apply the rule, reading categories from `"<category>/<name>"` identifiers
    pub fn decide(&self, hits: Hits) -> Classification {
        self.decide_with(hits, category_of)
    }

    /// Apply the rule with a custom category extraction
    ///
    /// # Arguments
    /// * `hits` - scores in document iteration order
    /// * `category` - maps a document identifier to its category
    pub fn decide_with<F>(&self, hits: Hits, category: F) -> Classification
    where
        F: Fn(&str) -> &str,
    {
        if hits.is_empty() {
            return Classification::Undetermined { reason: UndeterminedReason::EmptyCorpus };
        }
        match *self {
            DecisionRule::Nearest => nearest(&hits, category),
            DecisionRule::Knn(k) => knn(hits, k, category),
        }
    }
}

/// One of the k nearest neighbors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub document: String,
    pub category: String,
    pub score: f64,
}

/// Why no category could be chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeterminedReason {
    /// The corpus holds no documents
    EmptyCorpus,
    /// No neighbor was selected (k = 0) or every score was NaN
    NoNeighbors,
}

impl Display for UndeterminedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndeterminedReason::EmptyCorpus => write!(f, "empty corpus"),
            UndeterminedReason::NoNeighbors => write!(f, "no neighbors"),
        }
    }
}

/// Result of classifying one query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Classification {
    /// Nearest neighbor decision with the matched document
    Nearest {
        category: String,
        document: String,
        score: f64,
    },
    /// k-NN decision with the ranked neighbors
    Knn {
        category: String,
        k: usize,
        neighbors: Vec<Neighbor>,
    },
    /// No category could be chosen
    Undetermined { reason: UndeterminedReason },
}

impl Classification {
    /// Chosen category, `None` when undetermined
    pub fn category(&self) -> Option<&str> {
        match self {
            Classification::Nearest { category, .. } | Classification::Knn { category, .. } => {
                Some(category.as_str())
            }
            Classification::Undetermined { .. } => None,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        matches!(self, Classification::Undetermined { .. })
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Nearest { category, document, score } => {
                writeln!(f, "Category: {}", category)?;
                write!(f, "(Most similar document: '{}', Similarity: {:.4})", document, score)
            }
            Classification::Knn { category, k, neighbors } => {
                writeln!(f, "Category: {}", category)?;
                write!(f, "(k={} neighbors:", k)?;
                for (rank, n) in neighbors.iter().enumerate() {
                    let sep = if rank == 0 { " " } else { ", " };
                    write!(f, "{}{}. {} {:.4} [{}]", sep, rank + 1, n.category, n.score, n.document)?;
                }
                write!(f, ")")
            }
            Classification::Undetermined { reason } => {
                writeln!(f, "Category: undetermined")?;
                write!(f, "({})", reason)
            }
        }
    }
}

/// Rule A: first document with the highest similarity
fn nearest<F>(hits: &Hits, category: F) -> Classification
where
    F: Fn(&str) -> &str,
{
    match hits.best() {
        Some(best) => Classification::Nearest {
            category: category(&*best.key).to_string(),
            document: best.key.to_string(),
            score: best.score,
        },
        None => Classification::Undetermined { reason: UndeterminedReason::NoNeighbors },
    }
}

/// Rule B: majority vote among the k best documents
fn knn<F>(mut hits: Hits, k: usize, category: F) -> Classification
where
    F: Fn(&str) -> &str,
{
    hits.sort_by_score();
    let neighbors: Vec<Neighbor> = hits
        .list
        .into_iter()
        .take(k)
        .map(|hit| Neighbor {
            category: category(&*hit.key).to_string(),
            document: hit.key.into_string(),
            score: hit.score,
        })
        .collect();

    // tally in neighbor rank order
    let winner = {
        let mut votes: IndexMap<&str, usize> = IndexMap::new();
        for n in &neighbors {
            *votes.entry(n.category.as_str()).or_insert(0) += 1;
        }
        debug!(?votes, "k-nn vote tally");
        let mut winner: Option<(&str, usize)> = None;
        for (&cat, &count) in &votes {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((cat, count));
            }
        }
        winner.map(|(cat, _)| cat.to_string())
    };

    match winner {
        Some(category) => Classification::Knn { category, k, neighbors },
        None => Classification::Undetermined { reason: UndeterminedReason::NoNeighbors },
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine<f64>,
{
    /// Classify a query text
    ///
    /// # Arguments
    /// * `text` - raw query text
    /// * `rule` - decision rule
    pub fn classify(&self, text: &str, rule: &DecisionRule) -> Classification {
        self.classify_vector(&self.vectorize(text), rule)
    }

    /// Classify an already vectorized query
    pub fn classify_vector(&self, query: &WeightVector, rule: &DecisionRule) -> Classification {
        rule.decide(self.similarity(query))
    }
}
