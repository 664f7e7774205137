use indexmap::IndexMap;
use num::Float;

use crate::utils::math::vector::SparseVec;

/// Term frequency map of one document or query
/// token -> occurrences / total tokens
pub type TermFrequencyMap = SparseVec<f64>;

///  TokenFrequency
/// Counts how often each token occurs in one token sequence.
/// It is the base data for TF calculation.
///
/// # Examples
/// ```
/// use tf_idf_classifier::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_tokens(&["car", "engine", "car"]);
///
/// assert_eq!(token_freq.token_count("car"), 2);
/// assert_eq!(token_freq.token_sum(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

/// Token counting
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Add one token
    ///
    /// # Arguments
    /// * `token` - token to count
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// Add many tokens
    ///
    /// # Arguments
    /// * `tokens` - slice of tokens to count
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }
}

impl<T> From<&[T]> for TokenFrequency
where
    T: AsRef<str>,
{
    fn from(tokens: &[T]) -> Self {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(tokens);
        freq
    }
}

/// TF calculation
impl TokenFrequency {
    /// Relative frequency of every distinct token
    /// count / total, in first-seen order.
    /// An empty sequence yields an empty map.
    ///
    /// # Returns
    /// * `SparseVec<N>` - token -> frequency in [0, 1]
    pub fn tf_vector<N>(&self) -> SparseVec<N>
    where
        N: Float,
    {
        let mut tf = SparseVec::with_capacity(self.token_count.len());
        if self.total_token_count == 0 {
            return tf;
        }
        let total: N = num::cast(self.total_token_count).unwrap_or_else(N::one);
        for (token, &count) in &self.token_count {
            let count: N = num::cast(count).unwrap_or_else(N::zero);
            tf.insert(token, count / total);
        }
        tf
    }
}

/// Statistics
impl TokenFrequency {
    /// Occurrences of one token
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens counted
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_token_count == 0
    }

    /// Distinct tokens in first-seen order
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }
}
