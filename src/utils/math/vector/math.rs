use num::Float;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Float,
{
    /// Dot product
    /// Only tokens stored in both vectors contribute.
    ///
    /// # Arguments
    /// * `other` - other vector
    ///
    /// # Returns
    /// * `N` - dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> N {
        // walk the smaller side, probe the larger one
        let (small, large) = if self.nnz() <= other.nnz() { (self, other) } else { (other, self) };
        small
            .entries
            .iter()
            .filter_map(|(token, a)| large.entries.get(token).map(|b| *a * *b))
            .fold(N::zero(), |acc, x| acc + x)
    }

    /// Sum of squared values over every stored token
    #[inline]
    pub fn norm_sq(&self) -> N {
        self.entries
            .values()
            .fold(N::zero(), |acc, v| acc + *v * *v)
    }

    /// Euclidean magnitude
    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Cosine similarity
    /// cosθ = A・B / (|A||B|)
    ///
    /// Each magnitude is taken over the vector's own tokens, not just the
    /// shared ones. A zero magnitude on either side gives `0`.
    ///
    /// # Returns
    /// * `N` - similarity in [-1, 1]
    pub fn cosine_similarity(&self, other: &Self) -> N {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == N::zero() || norm_b == N::zero() {
            return N::zero();
        }
        self.dot(other) / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn vec_of(pairs: &[(&str, f64)]) -> SparseVec<f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn dot_only_counts_shared_tokens() {
        let a = vec_of(&[("car", 2.0), ("engine", 3.0)]);
        let b = vec_of(&[("car", 4.0), ("race", 5.0)]);
        assert!((a.dot(&b) - 8.0).abs() < EPS);
        assert!((b.dot(&a) - 8.0).abs() < EPS);
    }

    #[test]
    fn norm_uses_every_stored_token() {
        let a = vec_of(&[("x", 3.0), ("y", 4.0)]);
        assert!((a.norm() - 5.0).abs() < EPS);
    }

    #[test]
    fn cosine_of_vector_with_itself_is_one() {
        let a = vec_of(&[("x", 0.3), ("y", 1.7), ("z", 0.01)]);
        assert!((a.cosine_similarity(&a) - 1.0).abs() < EPS);
    }

    #[test]
    fn cosine_is_symmetric() {
        let a = vec_of(&[("x", 0.3), ("y", 1.7)]);
        let b = vec_of(&[("y", 0.2), ("z", 4.0), ("x", 1.1)]);
        assert!((a.cosine_similarity(&b) - b.cosine_similarity(&a)).abs() < EPS);
    }

    #[test]
    fn cosine_against_empty_is_zero() {
        let a = vec_of(&[("x", 0.3)]);
        let empty = SparseVec::new();
        assert_eq!(a.cosine_similarity(&empty), 0.0);
        assert_eq!(empty.cosine_similarity(&a), 0.0);
        assert_eq!(empty.cosine_similarity(&empty), 0.0);
    }

    #[test]
    fn cosine_with_only_zero_weights_is_zero() {
        let a = vec_of(&[("x", 0.0), ("y", 0.0)]);
        let b = vec_of(&[("x", 1.0)]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }

    #[test]
    fn cosine_of_disjoint_vectors_is_zero() {
        let a = vec_of(&[("x", 1.0)]);
        let b = vec_of(&[("y", 1.0)]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }

    #[test]
    fn cosine_works_for_f32() {
        let a: SparseVec<f32> = [("x", 1.0f32), ("y", 1.0)].into_iter().collect();
        let b: SparseVec<f32> = [("x", 1.0f32)].into_iter().collect();
        let expected = 1.0 / 2.0f32.sqrt();
        assert!((a.cosine_similarity(&b) - expected).abs() < 1e-6);
    }
}
