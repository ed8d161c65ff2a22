//! Upper bound on the number of distinct matrices a grid of domains admits.
//!
//! Constraints are ignored: the estimate is a necessary, not sufficient,
//! feasibility bound.

use super::{build_domains, CellDomain, CellRanges};
use crate::error::Result;

/// Running product above which the estimate gives up and reports
/// [`CAPACITY_SENTINEL`].
pub const CAPACITY_CEILING: u128 = 10_000_000_000;

/// "Effectively unbounded". Also the clamp applied to every estimate.
pub const CAPACITY_SENTINEL: u64 = 1_000_000;

/// Product of the domain sizes, short-circuited at [`CAPACITY_CEILING`] and
/// clamped to [`CAPACITY_SENTINEL`].
///
/// # Examples
///
/// ```
/// use eigenscape::domain::{build_domains, capacity_of_domains, uniform_ranges, CellRange};
///
/// let ranges = uniform_ranges(2, CellRange::new(0.0, 1.0, 1.0));
/// let domains = build_domains(2, &ranges).unwrap();
/// assert_eq!(capacity_of_domains(&domains), 16);
/// ```
#[must_use]
pub fn capacity_of_domains(domains: &[CellDomain]) -> u64 {
    let mut product: u128 = 1;
    for domain in domains {
        product = product.saturating_mul(domain.len().max(1) as u128);
        if product > CAPACITY_CEILING {
            return CAPACITY_SENTINEL;
        }
    }
    u64::try_from(product).map_or(CAPACITY_SENTINEL, |p| p.min(CAPACITY_SENTINEL))
}

/// Capacity estimate straight from a request's size and ranges.
///
/// # Errors
///
/// Returns an error if the ranges do not cover the grid (see
/// [`build_domains`]).
pub fn estimate_capacity(size: usize, ranges: &CellRanges) -> Result<u64> {
    let domains = build_domains(size, ranges)?;
    Ok(capacity_of_domains(&domains))
}
