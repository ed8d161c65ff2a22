//! Linear-sum constraints over matrix cells.
//!
//! A [`Constraint`] sums the values at a list of cells and compares the sum
//! against a threshold. A matrix is accepted only if every constraint holds;
//! [`satisfies_all`] stops at the first failure.

use crate::domain::CellIndex;
use crate::error::{EigenscapeError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Absolute tolerance for [`ConstraintKind::SumEqual`].
pub const SUM_EQUAL_TOLERANCE: f64 = 1e-6;

/// Comparison applied to a constraint's cell sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Sum must be at least `value`.
    SumGreater,
    /// Sum must be at most `value`.
    SumLess,
    /// Sum must be within [`SUM_EQUAL_TOLERANCE`] of `value`.
    SumEqual,
}

/// One linear-sum constraint.
///
/// # Examples
///
/// ```
/// use eigenscape::constraint::{Constraint, ConstraintKind};
/// use eigenscape::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let row_sum = Constraint::new(vec![(0, 0).into(), (0, 1).into()], ConstraintKind::SumEqual, 3.0);
/// assert!(row_sum.is_satisfied_by(&m));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Cells whose values are summed.
    pub cells: Vec<CellIndex>,
    /// Comparison to apply.
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    /// Threshold.
    pub value: f64,
}

impl Constraint {
    /// Creates a constraint.
    #[must_use]
    pub fn new(cells: Vec<CellIndex>, kind: ConstraintKind, value: f64) -> Self {
        Self { cells, kind, value }
    }

    /// Checks the constraint is well-formed for a `size × size` matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell is out of bounds or `value` is not finite.
    pub fn validate(&self, size: usize) -> Result<()> {
        if !self.value.is_finite() {
            return Err(EigenscapeError::invalid_parameter(
                "constraint.value",
                self.value,
                "a finite number",
            ));
        }
        match self.cells.iter().find(|cell| !cell.fits(size)) {
            Some(cell) => Err(EigenscapeError::CellOutOfBounds {
                row: cell.row,
                col: cell.col,
                size,
            }),
            None => Ok(()),
        }
    }

    /// Sum of the matrix values at this constraint's cells.
    #[must_use]
    pub fn cell_sum(&self, matrix: &Matrix<f64>) -> f64 {
        self.cells
            .iter()
            .map(|cell| matrix.get(cell.row, cell.col))
            .sum()
    }

    /// Whether `matrix` satisfies this constraint.
    #[must_use]
    pub fn is_satisfied_by(&self, matrix: &Matrix<f64>) -> bool {
        let sum = self.cell_sum(matrix);
        match self.kind {
            ConstraintKind::SumGreater => sum >= self.value,
            ConstraintKind::SumLess => sum <= self.value,
            ConstraintKind::SumEqual => (sum - self.value).abs() <= SUM_EQUAL_TOLERANCE,
        }
    }
}

/// Validates every constraint against the matrix size.
///
/// # Errors
///
/// Returns the first validation error.
pub fn validate_all(constraints: &[Constraint], size: usize) -> Result<()> {
    constraints.iter().try_for_each(|c| c.validate(size))
}

/// Whether `matrix` satisfies every constraint, in list order.
#[must_use]
pub fn satisfies_all(matrix: &Matrix<f64>, constraints: &[Constraint]) -> bool {
    constraints.iter().all(|c| c.is_satisfied_by(matrix))
}
