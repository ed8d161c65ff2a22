//! Eigenvalue feature vectors.
//!
//! Every matrix is encoded as a fixed-length vector of `2 × size` reals: the
//! real parts of its eigenvalues in solver order, zero-padded (or truncated)
//! to length. Imaginary parts are dropped so all vectors share one length.

use crate::error::Result;
use crate::primitives::Matrix;
use crate::spectral::Scalar;

/// Length of a feature vector for matrices of the given size.
#[must_use]
pub fn feature_len(size: usize) -> usize {
    2 * size
}

/// Feature vector of one matrix's eigenvalues.
///
/// # Examples
///
/// ```
/// use eigenscape::features::feature_vector;
/// use eigenscape::spectral::Scalar;
///
/// let eigenvalues = [Scalar::Real(3.0), Scalar::Complex { real: 1.0, imag: 2.0 }];
/// assert_eq!(feature_vector(&eigenvalues, 2), vec![3.0, 1.0, 0.0, 0.0]);
/// ```
#[must_use]
pub fn feature_vector(eigenvalues: &[Scalar], size: usize) -> Vec<f64> {
    let mut features = vec![0.0; feature_len(size)];
    for (slot, value) in features.iter_mut().zip(eigenvalues) {
        *slot = value.re();
    }
    features
}

/// Stacks the feature vectors of many matrices into an `n × 2·size` table.
///
/// # Errors
///
/// Never fails in practice; the row width is fixed by `size`.
pub fn feature_matrix<'a, I>(spectra: I, size: usize) -> Result<Matrix<f64>>
where
    I: IntoIterator<Item = &'a [Scalar]>,
{
    let width = feature_len(size);
    let mut data = Vec::new();
    let mut rows = 0;
    for eigenvalues in spectra {
        data.extend(feature_vector(eigenvalues, size));
        rows += 1;
    }
    Ok(Matrix::from_vec(rows, width, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        let v = feature_vector(&[Scalar::Real(1.0), Scalar::Real(-2.0)], 2);
        assert_eq!(v, vec![1.0, -2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_truncation() {
        let eigenvalues: Vec<Scalar> = (0..5).map(|i| Scalar::Real(f64::from(i))).collect();
        let v = feature_vector(&eigenvalues, 2);
        assert_eq!(v, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_complex_keeps_real_part_only() {
        let v = feature_vector(
            &[
                Scalar::Complex {
                    real: 0.5,
                    imag: 1.0,
                },
                Scalar::Complex {
                    real: 0.5,
                    imag: -1.0,
                },
            ],
            2,
        );
        assert_eq!(v, vec![0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_eigenvalues() {
        assert_eq!(feature_vector(&[], 3), vec![0.0; 6]);
    }

    #[test]
    fn test_feature_matrix_shape() {
        let a = vec![Scalar::Real(1.0), Scalar::Real(2.0)];
        let b = vec![Scalar::Real(3.0)];
        let table = feature_matrix([a.as_slice(), b.as_slice()], 2).unwrap();
        assert_eq!(table.shape(), (2, 4));
        assert_eq!(table.row(1), &[3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_feature_matrix_empty() {
        let table = feature_matrix(std::iter::empty(), 3).unwrap();
        assert_eq!(table.shape(), (0, 6));
    }
}
