//! Eigenscape: constrained random matrices and their spectra, projected for
//! plotting.
//!
//! A request describes a `size × size` grid of discrete cell domains and a
//! list of linear-sum constraints. Eigenscape samples matrices from the
//! domains by rejection, decomposes each accepted matrix into eigenvalues
//! and eigenvectors (complex pairs included), encodes the eigenvalues as
//! fixed-length feature vectors and projects them with t-SNE.
//!
//! # Quick Start
//!
//! ```
//! use eigenscape::prelude::*;
//!
//! let request = GenerationRequest {
//!     size: 2,
//!     num_matrices: 4,
//!     dimensionality: 2,
//!     cell_ranges: uniform_ranges(2, CellRange::new(-1.0, 1.0, 1.0)),
//!     constraints: vec![Constraint::new(
//!         vec![CellIndex::new(0, 0), CellIndex::new(1, 1)],
//!         ConstraintKind::SumGreater,
//!         -1.0,
//!     )],
//!     transpose_matrix: false,
//! };
//!
//! let pipeline = Pipeline::new(PipelineConfig::default().with_seed(7).with_tsne_iterations(100));
//! let response = pipeline.generate(&request, &Observer::disabled()).unwrap();
//! assert_eq!(response.matrices.len(), 4);
//! ```
//!
//! # Modules
//!
//! - [`domain`]: cell keys, ranges, discrete domains and the capacity bound
//! - [`constraint`]: linear-sum constraints
//! - [`sampling`]: rejection-sampling matrix generator
//! - [`spectral`]: eigenvalues and eigenvectors of general real matrices
//! - [`features`]: eigenvalue feature vectors
//! - [`manifold`]: t-SNE and the embedding policy
//! - [`pipeline`]: request/response types and entry points
//! - [`observe`]: request-scoped observability handle

pub mod constraint;
pub mod domain;
pub mod error;
pub mod features;
pub mod manifold;
pub mod observe;
pub mod pipeline;
pub mod prelude;
pub mod primitives;
pub mod sampling;
pub mod spectral;
pub mod traits;

pub use error::{EigenscapeError, Result};
pub use primitives::Matrix;
pub use traits::Transformer;
