//! Rejection-sampling matrix generator.
//!
//! Each attempt draws every cell independently and uniformly from its
//! [`CellDomain`] and keeps the candidate iff it satisfies every
//! [`Constraint`]. Sampling stops once the target count is reached or after
//! `target × attempt_multiplier` attempts, whichever comes first. There is no
//! backtracking or constraint propagation; running out of attempts is a
//! terminal error carrying the partial count.

use crate::constraint::{satisfies_all, validate_all, Constraint};
use crate::domain::CellDomain;
use crate::error::{EigenscapeError, Result};
use crate::observe::Observer;
use crate::primitives::Matrix;
use rand::Rng;

/// Default multiplier turning a target count into an attempt budget.
pub const DEFAULT_ATTEMPT_MULTIPLIER: usize = 10;

/// Matrices accepted by one sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingOutcome {
    /// Accepted matrices, in acceptance order.
    pub matrices: Vec<Matrix<f64>>,
    /// Attempts performed.
    pub attempts: usize,
}

/// Generates constrained random matrices.
///
/// # Examples
///
/// ```
/// use eigenscape::domain::{build_domains, uniform_ranges, CellRange};
/// use eigenscape::observe::Observer;
/// use eigenscape::sampling::MatrixSampler;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let domains = build_domains(2, &uniform_ranges(2, CellRange::new(0.0, 3.0, 1.0))).unwrap();
/// let sampler = MatrixSampler::new(2, domains, Vec::new()).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
/// let outcome = sampler.sample(5, &mut rng, &Observer::disabled()).unwrap();
/// assert_eq!(outcome.matrices.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct MatrixSampler {
    size: usize,
    domains: Vec<CellDomain>,
    constraints: Vec<Constraint>,
    attempt_multiplier: usize,
}

impl MatrixSampler {
    /// Creates a sampler over row-major `domains`.
    ///
    /// # Errors
    ///
    /// Returns an error if `domains` does not hold `size²` entries or a
    /// constraint references a cell outside the `size × size` grid.
    pub fn new(size: usize, domains: Vec<CellDomain>, constraints: Vec<Constraint>) -> Result<Self> {
        if domains.len() != size * size {
            return Err(EigenscapeError::dimension_mismatch(
                "domains",
                size * size,
                domains.len(),
            ));
        }
        validate_all(&constraints, size)?;
        Ok(Self {
            size,
            domains,
            constraints,
            attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
        })
    }

    /// Sets the attempt multiplier (budget = target × multiplier).
    #[must_use]
    pub fn with_attempt_multiplier(mut self, multiplier: usize) -> Self {
        self.attempt_multiplier = multiplier;
        self
    }

    /// Matrix size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Attempt budget for a target count.
    #[must_use]
    pub fn attempt_budget(&self, target: usize) -> usize {
        target.saturating_mul(self.attempt_multiplier)
    }

    /// Draws one candidate, each cell independently.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix<f64> {
        let mut candidate = Matrix::zeros(self.size, self.size);
        for (idx, domain) in self.domains.iter().enumerate() {
            let value = domain.value(rng.gen_range(0..domain.len()));
            candidate.set(idx / self.size, idx % self.size, value);
        }
        candidate
    }

    /// Samples until `target` matrices are accepted or the budget runs out.
    ///
    /// # Errors
    ///
    /// Returns [`EigenscapeError::SamplingExhausted`] if fewer than `target`
    /// matrices were accepted within the budget.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        target: usize,
        rng: &mut R,
        observer: &Observer,
    ) -> Result<SamplingOutcome> {
        let budget = self.attempt_budget(target);
        let _span = observer.stage("sampling").entered();

        let mut matrices = Vec::with_capacity(target);
        let mut attempts = 0;
        while matrices.len() < target && attempts < budget {
            let candidate = self.draw(rng);
            attempts += 1;

            let accepted = satisfies_all(&candidate, &self.constraints);
            observer.record_attempt(accepted);
            if accepted {
                matrices.push(candidate);
            } else {
                tracing::trace!(attempts, "candidate rejected");
            }
        }

        if matrices.len() < target {
            tracing::warn!(
                accepted = matrices.len(),
                requested = target,
                attempts,
                "attempt budget exhausted"
            );
            return Err(EigenscapeError::SamplingExhausted {
                accepted: matrices.len(),
                requested: target,
                attempts,
            });
        }

        tracing::debug!(accepted = matrices.len(), attempts, "sampling complete");
        Ok(SamplingOutcome { matrices, attempts })
    }
}

#[cfg(test)]
mod tests;
