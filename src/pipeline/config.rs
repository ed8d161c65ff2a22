//! Pipeline configuration.

use crate::error::{EigenscapeError, Result};
use crate::manifold::{DEFAULT_EMBEDDING_SEED, DEFAULT_MAX_PERPLEXITY};
use crate::sampling::DEFAULT_ATTEMPT_MULTIPLIER;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Process-level knobs for generation requests.
///
/// Every field has a default, so a partial JSON document is a valid config.
///
/// # Examples
///
/// ```
/// use eigenscape::pipeline::PipelineConfig;
///
/// let config: PipelineConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.attempt_multiplier, 10);
///
/// let config: PipelineConfig = serde_json::from_str(r#"{"attempt_multiplier": 0}"#).unwrap();
/// assert!(config.validate().is_err());
///
/// let config = PipelineConfig::default().with_tsne_iterations(250);
/// assert_eq!(config.tsne_iterations, 250);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Attempt budget is `num_matrices × attempt_multiplier`.
    pub attempt_multiplier: usize,
    /// Seed for matrix sampling; fresh entropy per request when absent.
    pub seed: Option<u64>,
    /// Seed for the t-SNE initial layout.
    pub embedding_seed: u64,
    /// t-SNE gradient descent iterations.
    pub tsne_iterations: usize,
    /// Upper bound on the t-SNE perplexity.
    pub max_perplexity: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
            seed: None,
            embedding_seed: DEFAULT_EMBEDDING_SEED,
            tsne_iterations: 1000,
            max_perplexity: DEFAULT_MAX_PERPLEXITY,
        }
    }
}

impl PipelineConfig {
    /// Sets the attempt multiplier.
    #[must_use]
    pub fn with_attempt_multiplier(mut self, multiplier: usize) -> Self {
        self.attempt_multiplier = multiplier;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the t-SNE seed.
    #[must_use]
    pub fn with_embedding_seed(mut self, seed: u64) -> Self {
        self.embedding_seed = seed;
        self
    }

    /// Sets the t-SNE iteration count.
    #[must_use]
    pub fn with_tsne_iterations(mut self, iterations: usize) -> Self {
        self.tsne_iterations = iterations;
        self
    }

    /// Sets the perplexity bound.
    #[must_use]
    pub fn with_max_perplexity(mut self, max_perplexity: f64) -> Self {
        self.max_perplexity = max_perplexity;
        self
    }

    /// Checks the knobs are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if `attempt_multiplier` is 0 or `max_perplexity` is
    /// not a finite number of at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.attempt_multiplier < 1 {
            return Err(EigenscapeError::invalid_parameter(
                "attempt_multiplier",
                self.attempt_multiplier,
                ">= 1",
            ));
        }
        if !(self.max_perplexity.is_finite() && self.max_perplexity >= 1.0) {
            return Err(EigenscapeError::invalid_parameter(
                "max_perplexity",
                self.max_perplexity,
                "a finite number >= 1",
            ));
        }
        Ok(())
    }

    /// RNG for one sampling run.
    #[must_use]
    pub fn sampling_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
