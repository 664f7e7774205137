pub mod math;

use std::fmt::{self, Debug};

use indexmap::IndexMap;
use num::Float;

/// Token keyed sparse vector.
/// A token that is not stored has the value zero.
///
/// Keys keep their insertion order, so every reduction over the vector
/// (norm, dot product) visits elements in the same order on every run.
#[derive(Clone, PartialEq)]
pub struct SparseVec<N>
where
    N: Float,
{
    entries: IndexMap<Box<str>, N>,
}

/// TF-IDF weight vector of one document or query
pub type WeightVector = SparseVec<f64>;

impl<N> SparseVec<N>
where
    N: Float,
{
    /// Create an empty vector
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: IndexMap::with_capacity(capacity) }
    }

    /// Set the value of a token
    /// Overwrites any previous value for the same token.
    #[inline]
    pub fn insert(&mut self, token: &str, value: N) -> &mut Self {
        self.entries.insert(Box::from(token), value);
        self
    }

    /// Value of a token, zero if absent
    #[inline]
    pub fn get(&self, token: &str) -> N {
        self.entries.get(token).copied().unwrap_or_else(N::zero)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Number of stored tokens (stored zeros included)
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(token, value)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, N)> + '_ {
        self.entries.iter().map(|(token, value)| (token.as_ref(), *value))
    }

    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }
}

impl<N> Default for SparseVec<N>
where
    N: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, N> FromIterator<(&'a str, N)> for SparseVec<N>
where
    N: Float,
{
    fn from_iter<I: IntoIterator<Item = (&'a str, N)>>(iter: I) -> Self {
        let mut vec = Self::new();
        for (token, value) in iter {
            vec.insert(token, value);
        }
        vec
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Float + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SparseVec [")?;
            for (token, value) in &self.entries {
                writeln!(f, "    {:?}: {:?}", token, value)?;
            }
            write!(f, "]")
        } else {
            f.debug_map().entries(self.entries.iter()).finish()
        }
    }
}
