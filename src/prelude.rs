//! Convenience re-exports for common usage.
//!
//! ```
//! use eigenscape::prelude::*;
//! ```

pub use crate::constraint::{Constraint, ConstraintKind};
pub use crate::domain::{uniform_ranges, CellDomain, CellIndex, CellRange, CellRanges};
pub use crate::error::{EigenscapeError, Result};
pub use crate::observe::Observer;
pub use crate::pipeline::{
    CapacityRequest, CapacityResponse, GenerationRequest, GenerationResponse, Pipeline,
    PipelineConfig,
};
pub use crate::primitives::Matrix;
pub use crate::spectral::{Scalar, SpectralDecomposition};
pub use crate::traits::Transformer;
