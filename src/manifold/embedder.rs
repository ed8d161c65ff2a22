//! Embedding policy used by the generation pipeline.

use super::TSNE;
use crate::error::{EigenscapeError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;

/// Seed used for every projection so identical inputs give identical plots.
pub const DEFAULT_EMBEDDING_SEED: u64 = 42;

/// Upper bound on the perplexity picked from the sample count.
pub const DEFAULT_MAX_PERPLEXITY: f64 = 30.0;

/// Projects feature vectors to `n_components` dimensions.
///
/// - one sample: the origin, t-SNE is skipped;
/// - otherwise t-SNE with perplexity `min(max_perplexity, max(1, n − 1))`
///   and a fixed seed.
///
/// # Examples
///
/// ```
/// use eigenscape::manifold::Embedder;
/// use eigenscape::primitives::Matrix;
///
/// let single = Matrix::from_vec(1, 4, vec![1.0, 2.0, 0.0, 0.0]).unwrap();
/// let coords = Embedder::new(3).embed(&single).unwrap();
/// assert_eq!(coords.to_rows(), vec![vec![0.0, 0.0, 0.0]]);
/// ```
#[derive(Debug, Clone)]
pub struct Embedder {
    n_components: usize,
    seed: u64,
    n_iter: usize,
    max_perplexity: f64,
}

impl Embedder {
    /// Creates an embedder with the default seed, iteration count and
    /// perplexity bound.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            seed: DEFAULT_EMBEDDING_SEED,
            n_iter: 1000,
            max_perplexity: DEFAULT_MAX_PERPLEXITY,
        }
    }

    /// Sets the t-SNE seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of t-SNE iterations.
    #[must_use]
    pub fn with_n_iter(mut self, n_iter: usize) -> Self {
        self.n_iter = n_iter;
        self
    }

    /// Sets the perplexity bound.
    #[must_use]
    pub fn with_max_perplexity(mut self, max_perplexity: f64) -> Self {
        self.max_perplexity = max_perplexity;
        self
    }

    /// Perplexity used for `n_samples` points.
    #[must_use]
    pub fn perplexity_for(&self, n_samples: usize) -> f64 {
        let by_samples = n_samples.saturating_sub(1).max(1) as f64;
        by_samples.min(self.max_perplexity).max(1.0)
    }

    /// Embeds one row per sample; output rows follow input rows.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_components` is zero or t-SNE fails.
    pub fn embed(&self, features: &Matrix<f64>) -> Result<Matrix<f64>> {
        if self.n_components == 0 {
            return Err(EigenscapeError::invalid_parameter(
                "dimensionality",
                self.n_components,
                ">= 1",
            ));
        }

        let n = features.n_rows();
        if n <= 1 {
            return Ok(Matrix::zeros(n, self.n_components));
        }

        let perplexity = self.perplexity_for(n);
        tracing::debug!(samples = n, perplexity, "running t-SNE");
        let mut tsne = TSNE::new(self.n_components)
            .with_perplexity(perplexity)
            .with_n_iter(self.n_iter)
            .with_random_state(self.seed);
        tsne.fit_transform(features)
    }
}
