//! Error types for eigenscape-cli

use eigenscape::pipeline::ErrorResponse;
use eigenscape::EigenscapeError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Request rejected or failed inside the pipeline
    #[error("{0}")]
    Pipeline(#[from] EigenscapeError),

    /// Response could not be written
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Numeric exit status for this error
    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            Self::FileNotFound(_) => 3,
            Self::InvalidConfig(_) => 5,
            Self::Io(_) | Self::Output(_) => 7,
            Self::Pipeline(e) => match e.status_code() {
                400 => 2,
                422 => 4,
                _ => 1,
            },
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Wire payload for this error.
    pub(crate) fn payload(&self) -> ErrorResponse {
        match self {
            Self::Pipeline(e) => ErrorResponse::from(e),
            other => ErrorResponse {
                error: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_keeps_message() {
        let err = CliError::from(EigenscapeError::MissingCellRange { row: 1, col: 0 });
        assert_eq!(err.payload().error, "Missing range for cell 1,0");
        assert_eq!(err.exit_status(), 4);
    }

    #[test]
    fn test_exhaustion_exit_code() {
        let err = CliError::from(EigenscapeError::SamplingExhausted {
            accepted: 1,
            requested: 2,
            attempts: 20,
        });
        assert_eq!(err.exit_status(), 2);
    }

    #[test]
    fn test_file_not_found_payload() {
        let err = CliError::FileNotFound(PathBuf::from("missing.json"));
        assert!(err.payload().error.contains("missing.json"));
        assert_eq!(err.exit_status(), 3);
    }
}
