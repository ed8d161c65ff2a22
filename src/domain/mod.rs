//! Per-cell value domains.
//!
//! A request describes every cell of a `size × size` matrix with a
//! `{min, max, step}` range. [`CellDomain`] turns one range into the ordered,
//! discrete set `min, min + step, min + 2·step, …` of admissible values, and
//! [`build_domains`] does so for a whole grid after checking that every cell
//! is covered and every key is in bounds.
//!
//! Degenerate ranges never fail: a non-positive step falls back to
//! [`CellDomain::DEFAULT_STEP`], and an empty range collapses to `{min}`.

mod capacity;
mod cell;

pub use capacity::{
    capacity_of_domains, estimate_capacity, CAPACITY_CEILING, CAPACITY_SENTINEL,
};
pub use cell::CellIndex;

use crate::error::{EigenscapeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cell ranges keyed by cell position.
pub type CellRanges = BTreeMap<CellIndex, CellRange>;

/// Slack on the upper bound, in units of `step`, so that `max` itself is kept
/// when `(max - min) / step` lands a rounding error below an integer.
const STEP_TOLERANCE: f64 = 1e-9;

/// Requested value range of one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRange {
    /// Smallest admissible value.
    pub min: f64,
    /// Largest admissible value (inclusive).
    pub max: f64,
    /// Distance between consecutive values.
    pub step: f64,
}

impl CellRange {
    /// Creates a range.
    #[must_use]
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

/// Ordered discrete set of admissible values for one cell.
///
/// Stored arithmetically rather than materialized, so wide ranges cost
/// nothing until a value is drawn.
///
/// The last value never exceeds `max`. When `max − min` is not a multiple of
/// `step`, the grid stops below `max` instead of overshooting by up to half a
/// step, so `len()` (and the capacity built from it) can be one less than a
/// half-step-inclusive count: `(0, 1, 0.6)` yields `{0, 0.6}`, not
/// `{0, 0.6, 1.2}`.
///
/// # Examples
///
/// ```
/// use eigenscape::domain::{CellDomain, CellRange};
///
/// let domain = CellDomain::from_range(&CellRange::new(0.0, 1.0, 0.5));
/// assert_eq!(domain.values().collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
///
/// // min > max degenerates to {min}
/// let domain = CellDomain::from_range(&CellRange::new(3.0, 1.0, 1.0));
/// assert_eq!(domain.len(), 1);
/// assert_eq!(domain.value(0), 3.0);
///
/// // no overshoot past max
/// let domain = CellDomain::from_range(&CellRange::new(0.0, 1.0, 0.6));
/// assert_eq!(domain.values().collect::<Vec<_>>(), vec![0.0, 0.6]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellDomain {
    min: f64,
    max: f64,
    step: f64,
    len: usize,
}

impl CellDomain {
    /// Step substituted when the requested one is not a positive number.
    pub const DEFAULT_STEP: f64 = 1.0;

    /// Builds the domain of one cell range.
    #[must_use]
    pub fn from_range(range: &CellRange) -> Self {
        let step = if range.step > 0.0 && range.step.is_finite() {
            range.step
        } else {
            Self::DEFAULT_STEP
        };

        let steps = (range.max - range.min) / step + STEP_TOLERANCE;
        // NaN and negative spans both fall through to the single-value domain.
        let len = if steps >= 0.0 {
            (steps.floor() as usize).saturating_add(1)
        } else {
            1
        };

        Self {
            min: range.min,
            max: range.max.max(range.min),
            step,
            len,
        }
    }

    /// Number of admissible values (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step actually used, after the non-positive fallback.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The `k`-th admissible value, `min + k·step`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= len()`.
    #[must_use]
    pub fn value(&self, k: usize) -> f64 {
        assert!(k < self.len, "domain index {k} out of bounds (len={})", self.len);
        // Clamp absorbs accumulated rounding on the last step.
        (self.min + k as f64 * self.step).min(self.max)
    }

    /// Iterates the admissible values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |k| self.value(k))
    }
}

/// Builds the domain of every cell, row-major.
///
/// # Errors
///
/// Returns an error if `size` is zero, a key lies outside the grid, or a cell
/// has no range.
pub fn build_domains(size: usize, ranges: &CellRanges) -> Result<Vec<CellDomain>> {
    if size == 0 {
        return Err(EigenscapeError::invalid_parameter("size", size, ">= 1"));
    }
    if let Some(cell) = ranges.keys().find(|cell| !cell.fits(size)) {
        return Err(EigenscapeError::CellOutOfBounds {
            row: cell.row,
            col: cell.col,
            size,
        });
    }

    let mut domains = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let range = ranges
                .get(&CellIndex::new(row, col))
                .ok_or(EigenscapeError::MissingCellRange { row, col })?;
            domains.push(CellDomain::from_range(range));
        }
    }
    Ok(domains)
}

/// Same range for every cell of a `size × size` grid.
#[must_use]
pub fn uniform_ranges(size: usize, range: CellRange) -> CellRanges {
    (0..size)
        .flat_map(|row| (0..size).map(move |col| (CellIndex::new(row, col), range)))
        .collect()
}
