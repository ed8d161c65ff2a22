//! Eigen-decomposition of general real matrices.
//!
//! Eigenvalues come from the real Schur form; conjugate pairs are emitted
//! positive-imaginary first; symmetric input goes through the symmetric
//! solver instead. When the QR iteration stalls, it is rerun on a
//! seeded orthogonal similarity `QᵀAQ`, which has the same spectrum. Each eigenvector is the null vector of
//! `A − λI`, read off the smallest singular value of its SVD (real SVD for a
//! real λ, complex SVD otherwise). Repeated eigenvalues take successive
//! smallest singular vectors so a full eigenspace yields a full basis.
//!
//! Vectors are unit length with their largest-modulus component real and
//! positive. The vector of `λ̄` is the conjugate of the vector of `λ`.
//!
//! Every scalar is reported as a [`Scalar`]: [`Scalar::Real`] when the
//! imaginary part is exactly zero, [`Scalar::Complex`] otherwise.

mod scalar;

pub use scalar::Scalar;

use crate::error::{EigenscapeError, Result};
use crate::primitives::Matrix;
use nalgebra::linalg::{Schur, SymmetricEigen, SVD};
use nalgebra::{Complex, DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Iteration cap for the Schur and SVD solvers.
const SOLVER_MAX_ITER: usize = 10_000;

/// Orthogonal similarities tried after the plain Schur iteration stalls.
const SCHUR_RETRIES: usize = 8;

/// Seed for the similarity transforms, fixed so results are reproducible.
const SIMILARITY_SEED: u64 = 0x5eed_c0de;

/// Relative distance under which two eigenvalues count as repeated.
const REPEAT_TOLERANCE: f64 = 1e-8;

/// One eigenvalue with its right eigenvector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eigenpair {
    /// Eigenvalue.
    pub value: Scalar,
    /// Right eigenvector, one component per matrix row.
    pub vector: Vec<Scalar>,
}

/// Full eigen-decomposition of one matrix.
///
/// `eigenvalues[k]` belongs to `eigenvectors[k]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpectralDecomposition {
    /// Eigenvalues in solver order.
    pub eigenvalues: Vec<Scalar>,
    /// Eigenvectors (the columns of the eigenvector matrix).
    pub eigenvectors: Vec<Vec<Scalar>>,
}

impl SpectralDecomposition {
    /// Eigenvalue/eigenvector pairs.
    pub fn eigenpairs(&self) -> impl Iterator<Item = Eigenpair> + '_ {
        self.eigenvalues
            .iter()
            .zip(&self.eigenvectors)
            .map(|(value, vector)| Eigenpair {
                value: *value,
                vector: vector.clone(),
            })
    }

    /// Number of eigenvalues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Whether the decomposition is empty (0×0 input).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }
}

/// Decomposes a square real matrix.
///
/// # Errors
///
/// Returns an error if the matrix is not square or a solver fails to
/// converge.
///
/// # Examples
///
/// ```
/// use eigenscape::primitives::Matrix;
/// use eigenscape::spectral::{decompose, Scalar};
///
/// // 90° rotation: eigenvalues ±i
/// let m = Matrix::from_vec(2, 2, vec![0.0, -1.0, 1.0, 0.0]).unwrap();
/// let spectrum = decompose(&m).unwrap();
/// assert!(matches!(spectrum.eigenvalues[0], Scalar::Complex { .. }));
/// assert!(spectrum.eigenvalues[0].im() > 0.0);
/// ```
pub fn decompose(matrix: &Matrix<f64>) -> Result<SpectralDecomposition> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(EigenscapeError::dimension_mismatch("cols", rows, cols));
    }
    if rows == 0 {
        return Ok(SpectralDecomposition::default());
    }

    let a = matrix.to_dmatrix();
    let values = eigenvalues(&a)?;
    let tolerance = REPEAT_TOLERANCE * a.norm().max(1.0);

    let mut eigenvectors: Vec<Vec<Scalar>> = Vec::with_capacity(values.len());
    for (idx, &lambda) in values.iter().enumerate() {
        let earlier = &values[..idx];
        let partner = if lambda.im < 0.0 {
            earlier.iter().rposition(|mu| *mu == lambda.conj())
        } else {
            None
        };

        let vector = match partner {
            Some(p) => eigenvectors[p].iter().map(Scalar::conj).collect(),
            None => {
                let rank = earlier
                    .iter()
                    .filter(|mu| modulus(**mu - lambda) <= tolerance)
                    .count();
                if lambda.im == 0.0 {
                    real_null_vector(&a, lambda.re, rank, tolerance)?
                } else {
                    complex_null_vector(&a, lambda, rank, tolerance)?
                }
            }
        };
        eigenvectors.push(vector);
    }

    Ok(SpectralDecomposition {
        eigenvalues: values.into_iter().map(Scalar::from).collect(),
        eigenvectors,
    })
}

fn modulus(z: Complex<f64>) -> f64 {
    z.norm_sqr().sqrt()
}

fn schur_eigenvalues(a: DMatrix<f64>) -> Option<Vec<Complex<f64>>> {
    Schur::try_new(a, f64::EPSILON, SOLVER_MAX_ITER)
        .map(|schur| schur.complex_eigenvalues().iter().copied().collect())
}

/// Orthogonal factor of a random square matrix.
fn random_orthogonal<R: Rng>(n: usize, rng: &mut R) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0)).qr().q()
}

fn eigenvalues(a: &DMatrix<f64>) -> Result<Vec<Complex<f64>>> {
    if a == &a.transpose() {
        if let Some(eigen) = SymmetricEigen::try_new(a.clone(), f64::EPSILON, SOLVER_MAX_ITER) {
            return Ok(eigen.eigenvalues.iter().map(|&x| Complex::new(x, 0.0)).collect());
        }
    }
    if let Some(values) = schur_eigenvalues(a.clone()) {
        return Ok(values);
    }

    let mut rng = StdRng::seed_from_u64(SIMILARITY_SEED);
    for attempt in 1..=SCHUR_RETRIES {
        let q = random_orthogonal(a.nrows(), &mut rng);
        let rotated = q.transpose() * a * &q;
        if let Some(values) = schur_eigenvalues(rotated) {
            tracing::debug!(attempt, "schur converged on orthogonal similarity");
            return Ok(values);
        }
    }

    Err(EigenscapeError::ConvergenceFailure {
        stage: "schur",
        iterations: SOLVER_MAX_ITER,
    })
}

/// Index of the `rank`-th smallest singular value.
///
/// Falls back to the smallest one when the `rank`-th is not numerically zero,
/// which is the case for defective matrices.
fn nth_smallest(singular_values: &[f64], rank: usize, tolerance: f64) -> usize {
    let mut order: Vec<usize> = (0..singular_values.len()).collect();
    order.sort_by(|&i, &j| singular_values[i].total_cmp(&singular_values[j]));
    let candidate = order[rank.min(order.len() - 1)];
    if singular_values[candidate] <= tolerance {
        candidate
    } else {
        order[0]
    }
}

fn svd_failure() -> EigenscapeError {
    EigenscapeError::ConvergenceFailure {
        stage: "svd",
        iterations: SOLVER_MAX_ITER,
    }
}

fn real_null_vector(
    a: &DMatrix<f64>,
    lambda: f64,
    rank: usize,
    tolerance: f64,
) -> Result<Vec<Scalar>> {
    let n = a.nrows();
    let shifted = a - DMatrix::<f64>::identity(n, n) * lambda;
    let svd = SVD::try_new(shifted, false, true, f64::EPSILON, SOLVER_MAX_ITER)
        .ok_or_else(svd_failure)?;
    let v_t = svd.v_t.ok_or_else(svd_failure)?;
    let k = nth_smallest(svd.singular_values.as_slice(), rank, tolerance);

    let mut v: DVector<f64> = v_t.row(k).transpose();
    let norm = v.norm();
    if norm > 0.0 {
        v /= norm;
    }
    // Largest-magnitude component positive
    let pivot = v.iamax();
    if v[pivot] < 0.0 {
        v.neg_mut();
    }
    Ok(v.iter().map(|&x| Scalar::Real(x)).collect())
}

fn complex_null_vector(
    a: &DMatrix<f64>,
    lambda: Complex<f64>,
    rank: usize,
    tolerance: f64,
) -> Result<Vec<Scalar>> {
    let n = a.nrows();
    let shifted = a.map(|x| Complex::new(x, 0.0)) - DMatrix::<Complex<f64>>::identity(n, n) * lambda;
    let svd = SVD::try_new(shifted, false, true, f64::EPSILON, SOLVER_MAX_ITER)
        .ok_or_else(svd_failure)?;
    let v_t = svd.v_t.ok_or_else(svd_failure)?;
    let k = nth_smallest(svd.singular_values.as_slice(), rank, tolerance);

    // Rows of v_t are conjugated right singular vectors.
    let mut v: Vec<Complex<f64>> = v_t.row(k).iter().map(Complex::conj).collect();
    let norm = v.iter().map(Complex::norm_sqr).sum::<f64>().sqrt();
    let pivot = (0..v.len())
        .max_by(|&i, &j| modulus(v[i]).total_cmp(&modulus(v[j])))
        .unwrap_or(0);
    let pivot_modulus = modulus(v[pivot]);
    if norm > 0.0 && pivot_modulus > 0.0 {
        let phase = v[pivot].conj() / pivot_modulus;
        for c in &mut v {
            *c = *c * phase / norm;
        }
        v[pivot] = Complex::new(pivot_modulus / norm, 0.0);
    }
    Ok(v.into_iter().map(Scalar::from).collect())
}
