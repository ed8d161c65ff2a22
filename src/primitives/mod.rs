//! Core compute primitives.
//!
//! [`Matrix`] is the row-major grid every pipeline stage exchanges: sampled
//! candidates, feature tables and embedding coordinates.

mod matrix;

pub use matrix::Matrix;
