//! Nonlinear dimensionality reduction.
//!
//! [`TSNE`] is a plain exact t-SNE; [`Embedder`] wraps it with the policies
//! the pipeline needs (perplexity chosen from the sample count, a fixed seed,
//! the single-sample shortcut).

mod embedder;

pub use embedder::{Embedder, DEFAULT_EMBEDDING_SEED, DEFAULT_MAX_PERPLEXITY};

use crate::error::{EigenscapeError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Multiplier applied to P during the first [`EXAGGERATION_ITERS`] iterations.
const EARLY_EXAGGERATION: f64 = 12.0;
const EXAGGERATION_ITERS: usize = 250;
const INITIAL_MOMENTUM: f64 = 0.5;
const FINAL_MOMENTUM: f64 = 0.8;
const PROBABILITY_FLOOR: f64 = 1e-12;

// ============================================================================
// t-SNE (t-Distributed Stochastic Neighbor Embedding)
// ============================================================================

/// t-SNE for dimensionality reduction and visualization.
///
/// # Algorithm
///
/// 1. Pairwise squared distances in the input space
/// 2. Gaussian conditionals P(j|i), bandwidth found by binary search on perplexity
/// 3. Symmetric joint P, exaggerated early on
/// 4. Student-t similarities Q in the embedding
/// 5. Gradient descent on KL(P‖Q) with momentum
///
/// # Example
///
/// ```
/// use eigenscape::manifold::TSNE;
/// use eigenscape::prelude::*;
///
/// let data = Matrix::from_vec(
///     6,
///     2,
///     vec![0.0, 0.0, 0.1, 0.1, 0.2, 0.0, 10.0, 10.0, 10.1, 10.1, 10.0, 10.2],
/// )
/// .expect("valid matrix dimensions");
///
/// let mut tsne = TSNE::new(2).with_perplexity(2.0).with_n_iter(250).with_random_state(42);
/// let embedding = tsne.fit_transform(&data).expect("fit_transform should succeed");
/// assert_eq!(embedding.shape(), (6, 2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TSNE {
    /// Number of dimensions in embedding.
    n_components: usize,
    /// Effective number of neighbours.
    perplexity: f64,
    /// Fixed learning rate; `None` picks `max(n / 48, 50)`.
    learning_rate: Option<f64>,
    /// Number of gradient descent iterations.
    n_iter: usize,
    /// Random seed for the initial layout.
    random_state: Option<u64>,
    /// The learned embedding.
    embedding: Option<Matrix<f64>>,
}

impl Default for TSNE {
    fn default() -> Self {
        Self::new(2)
    }
}

impl TSNE {
    /// Create a new t-SNE with default parameters.
    ///
    /// Default: perplexity=30.0, automatic learning rate, n_iter=1000
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            perplexity: 30.0,
            learning_rate: None,
            n_iter: 1000,
            random_state: None,
            embedding: None,
        }
    }

    /// Set perplexity.
    #[must_use]
    pub fn with_perplexity(mut self, perplexity: f64) -> Self {
        self.perplexity = perplexity;
        self
    }

    /// Set a fixed learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = Some(learning_rate);
        self
    }

    /// Set number of gradient descent iterations.
    #[must_use]
    pub fn with_n_iter(mut self, n_iter: usize) -> Self {
        self.n_iter = n_iter;
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Get number of components.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Get perplexity.
    #[must_use]
    pub fn perplexity(&self) -> f64 {
        self.perplexity
    }

    /// Check if model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.embedding.is_some()
    }

    fn validate(&self, n_samples: usize) -> Result<()> {
        if self.n_components == 0 {
            return Err(EigenscapeError::invalid_parameter(
                "n_components",
                self.n_components,
                ">= 1",
            ));
        }
        if n_samples < 2 {
            return Err(EigenscapeError::invalid_parameter(
                "n_samples",
                n_samples,
                ">= 2",
            ));
        }
        if !(self.perplexity >= 1.0 && self.perplexity < n_samples as f64) {
            return Err(EigenscapeError::invalid_parameter(
                "perplexity",
                self.perplexity,
                &format!("in [1, {n_samples})"),
            ));
        }
        Ok(())
    }

    /// Pairwise squared Euclidean distances, row-major `n × n`.
    fn pairwise_distances(x: &Matrix<f64>) -> Vec<f64> {
        let n = x.n_rows();
        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d: f64 = x
                    .row(i)
                    .iter()
                    .zip(x.row(j))
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }
        distances
    }

    /// Conditional probabilities P(j|i) matching the target perplexity.
    ///
    /// Binary search on the precision `beta = 1 / (2σ²)` of each row.
    fn conditional_p(&self, distances: &[f64], n: usize) -> Vec<f64> {
        let mut p = vec![0.0; n * n];
        let target_entropy = self.perplexity.ln();

        for i in 0..n {
            let row = &distances[i * n..(i + 1) * n];
            // Shift by the nearest neighbour so exp() does not underflow.
            let nearest = (0..n)
                .filter(|&j| j != i)
                .map(|j| row[j])
                .fold(f64::INFINITY, f64::min);

            let mut beta = 1.0;
            let mut beta_min = f64::NEG_INFINITY;
            let mut beta_max = f64::INFINITY;

            for _ in 0..100 {
                let mut sum_p = 0.0;
                for j in 0..n {
                    let value = if i == j {
                        0.0
                    } else {
                        (-beta * (row[j] - nearest)).exp()
                    };
                    p[i * n + j] = value;
                    sum_p += value;
                }

                let mut entropy = 0.0;
                for j in 0..n {
                    let normalized = p[i * n + j] / sum_p;
                    p[i * n + j] = normalized;
                    if normalized > PROBABILITY_FLOOR {
                        entropy -= normalized * normalized.ln();
                    }
                }

                let diff = entropy - target_entropy;
                if diff.abs() < 1e-5 {
                    break;
                }
                if diff > 0.0 {
                    beta_min = beta;
                    beta = if beta_max.is_infinite() {
                        beta * 2.0
                    } else {
                        (beta + beta_max) / 2.0
                    };
                } else {
                    beta_max = beta;
                    beta = if beta_min.is_infinite() {
                        beta / 2.0
                    } else {
                        (beta + beta_min) / 2.0
                    };
                }
            }
        }

        p
    }

    /// Symmetric joint P_ij = (P(j|i) + P(i|j)) / 2n.
    fn joint_p(conditional: &[f64], n: usize) -> Vec<f64> {
        let normalizer = 2.0 * n as f64;
        let mut joint = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let value = (conditional[i * n + j] + conditional[j * n + i]) / normalizer;
                    joint[i * n + j] = value.max(PROBABILITY_FLOOR);
                }
            }
        }
        joint
    }

    /// Unnormalized Student-t kernel `(1 + ‖y_i − y_j‖²)⁻¹` and its sum.
    fn student_kernel(&self, y: &[f64], n: usize) -> (Vec<f64>, f64) {
        let d = self.n_components;
        let mut kernel = vec![0.0; n * n];
        let mut sum = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let dist_sq: f64 = (0..d)
                    .map(|k| {
                        let diff = y[i * d + k] - y[j * d + k];
                        diff * diff
                    })
                    .sum();
                let value = 1.0 / (1.0 + dist_sq);
                kernel[i * n + j] = value;
                kernel[j * n + i] = value;
                sum += 2.0 * value;
            }
        }
        (kernel, sum)
    }

    /// Gradient of KL(P‖Q): `4 Σ_j (p_ij − q_ij)(1 + ‖y_i − y_j‖²)⁻¹ (y_i − y_j)`.
    fn gradient(&self, y: &[f64], p: &[f64], exaggeration: f64, n: usize) -> Vec<f64> {
        let d = self.n_components;
        let (kernel, sum) = self.student_kernel(y, n);
        let mut gradient = vec![0.0; n * d];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let q_ij = (kernel[i * n + j] / sum).max(PROBABILITY_FLOOR);
                let factor = 4.0 * (exaggeration * p[i * n + j] - q_ij) * kernel[i * n + j];
                for k in 0..d {
                    gradient[i * d + k] += factor * (y[i * d + k] - y[j * d + k]);
                }
            }
        }

        gradient
    }
}

impl Transformer for TSNE {
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let n = x.n_rows();
        self.validate(n)?;

        let distances = Self::pairwise_distances(x);
        let conditional = self.conditional_p(&distances, n);
        let p = Self::joint_p(&conditional, n);

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let d = self.n_components;
        // Tiny initial layout, uniform in ±5e-5
        let mut y: Vec<f64> = (0..n * d)
            .map(|_| (rng.gen::<f64>() - 0.5) * 1e-4)
            .collect();

        let learning_rate = self
            .learning_rate
            .unwrap_or_else(|| (n as f64 / EARLY_EXAGGERATION / 4.0).max(50.0));
        let mut velocity = vec![0.0; n * d];

        for iter in 0..self.n_iter {
            let (momentum, exaggeration) = if iter < EXAGGERATION_ITERS {
                (INITIAL_MOMENTUM, EARLY_EXAGGERATION)
            } else {
                (FINAL_MOMENTUM, 1.0)
            };

            let gradient = self.gradient(&y, &p, exaggeration, n);
            for ((yi, vi), gi) in y.iter_mut().zip(&mut velocity).zip(&gradient) {
                *vi = momentum * *vi - learning_rate * gi;
                *yi += *vi;
            }
        }

        if y.iter().any(|v| !v.is_finite()) {
            return Err(EigenscapeError::ConvergenceFailure {
                stage: "tsne",
                iterations: self.n_iter,
            });
        }

        self.embedding = Some(Matrix::from_vec(n, d, y)?);
        Ok(())
    }

    fn transform(&self, _x: &Matrix<f64>) -> Result<Matrix<f64>> {
        // t-SNE is non-parametric, return the embedding
        self.embedding
            .clone()
            .ok_or_else(|| EigenscapeError::Other("TSNE not fitted. Call fit() first.".into()))
    }
}

#[cfg(test)]
mod tests;
