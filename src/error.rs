//! Error types for Eigenscape operations.
//!
//! Every failure a generation or capacity request can hit is a variant of
//! [`EigenscapeError`]. Errors map onto an HTTP-style status through
//! [`EigenscapeError::status_code`] so hosting layers can forward them as-is.

use std::fmt;

/// Main error type for Eigenscape operations.
///
/// # Examples
///
/// ```
/// use eigenscape::error::EigenscapeError;
///
/// let err = EigenscapeError::InfeasibleRequest {
///     requested: 20,
///     capacity: 16,
/// };
/// assert!(err.to_string().contains("16"));
/// assert_eq!(err.status_code(), 400);
/// ```
#[derive(Debug)]
pub enum EigenscapeError {
    /// A `"row,col"` key could not be parsed.
    InvalidCellKey {
        /// Raw key as received
        key: String,
    },

    /// A cell index lies outside the `size × size` grid.
    CellOutOfBounds {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Matrix size
        size: usize,
    },

    /// No range was supplied for a cell of the grid.
    MissingCellRange {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },

    /// A request parameter is outside its admissible range.
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Requested count exceeds what the cell domains can produce.
    InfeasibleRequest {
        /// Number of matrices requested
        requested: usize,
        /// Capacity estimate of the cell domains
        capacity: u64,
    },

    /// Attempt budget ran out before enough matrices were accepted.
    SamplingExhausted {
        /// Matrices accepted before the budget ran out
        accepted: usize,
        /// Matrices requested
        requested: usize,
        /// Attempts performed
        attempts: usize,
    },

    /// Eigen-solver failed to converge.
    ConvergenceFailure {
        /// Stage that failed (e.g. "schur", "svd")
        stage: &'static str,
        /// Iteration limit used
        iterations: usize,
    },

    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Request or response (de)serialization failed.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for EigenscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EigenscapeError::InvalidCellKey { key } => {
                write!(f, "Invalid cell key '{key}', expected \"row,col\"")
            }
            EigenscapeError::CellOutOfBounds { row, col, size } => {
                write!(
                    f,
                    "Cell ({row},{col}) is outside the {size}x{size} matrix"
                )
            }
            EigenscapeError::MissingCellRange { row, col } => {
                write!(f, "Missing range for cell {row},{col}")
            }
            EigenscapeError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter: {param} = {value}, expected {constraint}"
                )
            }
            EigenscapeError::InfeasibleRequest {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "Requested {requested} matrices but the cell ranges allow at most \
                     {capacity} distinct matrices. Widen the ranges or request fewer."
                )
            }
            EigenscapeError::SamplingExhausted {
                accepted,
                requested,
                attempts,
            } => {
                if *accepted == 0 {
                    write!(
                        f,
                        "Could not generate any valid matrices in {attempts} attempts. \
                         Try adjusting constraints or ranges."
                    )
                } else {
                    write!(
                        f,
                        "Could only generate {accepted} out of {requested} requested matrices \
                         in {attempts} attempts. Try adjusting constraints or ranges."
                    )
                }
            }
            EigenscapeError::ConvergenceFailure { stage, iterations } => {
                write!(
                    f,
                    "Eigen-solver failed to converge ({stage}) within {iterations} iterations"
                )
            }
            EigenscapeError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            EigenscapeError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            EigenscapeError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EigenscapeError {}

impl From<serde_json::Error> for EigenscapeError {
    fn from(err: serde_json::Error) -> Self {
        EigenscapeError::Serialization(err.to_string())
    }
}

impl From<&str> for EigenscapeError {
    fn from(msg: &str) -> Self {
        EigenscapeError::Other(msg.to_string())
    }
}

impl From<String> for EigenscapeError {
    fn from(msg: String) -> Self {
        EigenscapeError::Other(msg)
    }
}

impl EigenscapeError {
    /// Create an invalid parameter error with descriptive context
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// HTTP-style status for this error.
    ///
    /// Infeasible requests and sampling exhaustion are caller problems (400),
    /// malformed input is 422, solver and internal failures are 500.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InfeasibleRequest { .. } | Self::SamplingExhausted { .. } => 400,
            Self::InvalidCellKey { .. }
            | Self::CellOutOfBounds { .. }
            | Self::MissingCellRange { .. }
            | Self::InvalidParameter { .. }
            | Self::Serialization(_) => 422,
            Self::ConvergenceFailure { .. } | Self::DimensionMismatch { .. } | Self::Other(_) => {
                500
            }
        }
    }

    /// Whether the error stems from malformed request input.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        self.status_code() == 422
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, EigenscapeError>;
