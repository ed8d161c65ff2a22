//! Core traits shared by pipeline stages.

use crate::error::Result;
use crate::primitives::Matrix;

/// Trait for data transformers (embeddings, projections).
///
/// # Examples
///
/// ```
/// use eigenscape::manifold::TSNE;
/// use eigenscape::prelude::*;
///
/// let x = Matrix::from_vec(3, 2, vec![0.0, 0.0, 1.0, 0.0, 5.0, 5.0]).unwrap();
/// let mut tsne = TSNE::new(2).with_perplexity(1.0).with_n_iter(50).with_random_state(42);
/// let y = tsne.fit_transform(&x).unwrap();
/// assert_eq!(y.shape(), (3, 2));
/// ```
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
