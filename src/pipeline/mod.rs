//! Request handling: capacity gate, sampling, spectra, features, embedding.
//!
//! Hosting layers (HTTP routes, the CLI) hand a [`GenerationRequest`] or
//! [`CapacityRequest`] to a [`Pipeline`] and get the wire response back, or
//! go through [`Pipeline::respond`] with raw JSON and receive a status code
//! plus a JSON body.

mod config;

pub use config::PipelineConfig;

use crate::constraint::{validate_all, Constraint};
use crate::domain::{build_domains, capacity_of_domains, CellRanges};
use crate::error::{EigenscapeError, Result};
use crate::features::feature_matrix;
use crate::manifold::Embedder;
use crate::observe::Observer;
use crate::sampling::MatrixSampler;
use crate::spectral::{decompose, Scalar, SpectralDecomposition};
use serde::{Deserialize, Serialize};

/// Generation request as received on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Matrix size (rows = columns).
    pub size: usize,
    /// Number of matrices to accept.
    pub num_matrices: usize,
    /// Embedding dimensionality.
    pub dimensionality: usize,
    /// Range of every cell, keyed `"row,col"`.
    pub cell_ranges: CellRanges,
    /// Constraints every accepted matrix must satisfy.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Transpose each accepted matrix before spectral analysis.
    #[serde(default)]
    pub transpose_matrix: bool,
}

impl GenerationRequest {
    /// Checks the scalar parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `size`, `num_matrices` or `dimensionality` is zero.
    pub fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("size", self.size),
            ("num_matrices", self.num_matrices),
            ("dimensionality", self.dimensionality),
        ] {
            if value == 0 {
                return Err(EigenscapeError::invalid_parameter(param, value, ">= 1"));
            }
        }
        validate_all(&self.constraints, self.size)
    }
}

/// Capacity query. Constraints are accepted and shape-checked but do not
/// tighten the bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRequest {
    /// Matrix size.
    pub size: usize,
    /// Range of every cell.
    pub cell_ranges: CellRanges,
    /// Ignored for the estimate.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

/// Successful generation response.
///
/// All four lists have one entry per accepted matrix, in acceptance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Embedding coordinates.
    pub coordinates: Vec<Vec<f64>>,
    /// Eigenvalues of each matrix.
    pub eigenvalues: Vec<Vec<Scalar>>,
    /// The accepted matrices, as rows.
    pub matrices: Vec<Vec<Vec<f64>>>,
    /// Eigenvectors of each matrix (one inner list per eigenvector).
    pub eigenvectors: Vec<Vec<Vec<Scalar>>>,
}

/// Capacity query response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityResponse {
    /// Upper bound on distinct matrices.
    pub max_possible: u64,
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl From<&EigenscapeError> for ErrorResponse {
    fn from(err: &EigenscapeError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Which entry point a raw JSON body targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Matrix generation.
    Generate,
    /// Capacity query.
    Capacity,
}

/// Status code and JSON body for a hosting layer to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTTP-style status.
    pub status: u16,
    /// JSON body.
    pub body: serde_json::Value,
}

/// The generation pipeline.
///
/// # Examples
///
/// ```
/// use eigenscape::domain::{uniform_ranges, CellRange};
/// use eigenscape::observe::Observer;
/// use eigenscape::pipeline::{GenerationRequest, Pipeline, PipelineConfig};
///
/// let request = GenerationRequest {
///     size: 2,
///     num_matrices: 3,
///     dimensionality: 2,
///     cell_ranges: uniform_ranges(2, CellRange::new(0.0, 1.0, 1.0)),
///     constraints: Vec::new(),
///     transpose_matrix: false,
/// };
/// let pipeline = Pipeline::new(PipelineConfig::default().with_seed(1).with_tsne_iterations(100));
/// let response = pipeline.generate(&request, &Observer::disabled()).unwrap();
/// assert_eq!(response.coordinates.len(), 3);
/// assert_eq!(response.coordinates[0].len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Upper bound on distinct matrices for a capacity query.
    ///
    /// # Errors
    ///
    /// Returns an error if the ranges or constraints are malformed.
    pub fn max_possible(&self, request: &CapacityRequest) -> Result<CapacityResponse> {
        let domains = build_domains(request.size, &request.cell_ranges)?;
        validate_all(&request.constraints, request.size)?;
        Ok(CapacityResponse {
            max_possible: capacity_of_domains(&domains),
        })
    }

    /// Runs a generation request end to end.
    ///
    /// # Errors
    ///
    /// - malformed input ([`EigenscapeError::status_code`] 422);
    /// - [`EigenscapeError::InfeasibleRequest`] before any sampling;
    /// - [`EigenscapeError::SamplingExhausted`] when the budget runs out;
    /// - solver failures.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        observer: &Observer,
    ) -> Result<GenerationResponse> {
        let _request_span = observer.span().enter();
        self.config.validate()?;
        request.validate()?;

        let domains = build_domains(request.size, &request.cell_ranges)?;
        let capacity = capacity_of_domains(&domains);
        if request.num_matrices as u64 > capacity {
            tracing::info!(
                requested = request.num_matrices,
                capacity,
                "request exceeds capacity"
            );
            return Err(EigenscapeError::InfeasibleRequest {
                requested: request.num_matrices,
                capacity,
            });
        }

        let sampler = MatrixSampler::new(request.size, domains, request.constraints.clone())?
            .with_attempt_multiplier(self.config.attempt_multiplier);
        let mut rng = self.config.sampling_rng();
        let outcome = sampler.sample(request.num_matrices, &mut rng, observer)?;

        let matrices: Vec<_> = if request.transpose_matrix {
            outcome.matrices.iter().map(|m| m.transpose()).collect()
        } else {
            outcome.matrices
        };

        let spectra = {
            let _stage = observer.stage("spectral").entered();
            matrices
                .iter()
                .map(decompose)
                .collect::<Result<Vec<SpectralDecomposition>>>()?
        };

        let features = feature_matrix(
            spectra.iter().map(|s| s.eigenvalues.as_slice()),
            request.size,
        )?;

        let coordinates = {
            let _stage = observer.stage("embedding").entered();
            Embedder::new(request.dimensionality)
                .with_seed(self.config.embedding_seed)
                .with_n_iter(self.config.tsne_iterations)
                .with_max_perplexity(self.config.max_perplexity)
                .embed(&features)?
        };

        tracing::info!(
            accepted = matrices.len(),
            attempts = outcome.attempts,
            "generation complete"
        );

        let (eigenvalues, eigenvectors): (Vec<_>, Vec<_>) = spectra
            .into_iter()
            .map(|s| (s.eigenvalues, s.eigenvectors))
            .unzip();
        Ok(GenerationResponse {
            coordinates: coordinates.to_rows(),
            eigenvalues,
            matrices: matrices.iter().map(|m| m.to_rows()).collect(),
            eigenvectors,
        })
    }

    /// Handles a raw JSON body, never failing: errors become an
    /// [`ErrorResponse`] with a non-2xx status.
    #[must_use]
    pub fn respond(&self, endpoint: Endpoint, body: &str, observer: &Observer) -> Reply {
        let result = match endpoint {
            Endpoint::Generate => serde_json::from_str::<GenerationRequest>(body)
                .map_err(EigenscapeError::from)
                .and_then(|req| self.generate(&req, observer))
                .and_then(|resp| Ok(serde_json::to_value(resp)?)),
            Endpoint::Capacity => serde_json::from_str::<CapacityRequest>(body)
                .map_err(EigenscapeError::from)
                .and_then(|req| self.max_possible(&req))
                .and_then(|resp| Ok(serde_json::to_value(resp)?)),
        };

        match result {
            Ok(body) => Reply { status: 200, body },
            Err(err) => {
                tracing::warn!(status = err.status_code(), error = %err, "request failed");
                Reply {
                    status: err.status_code(),
                    body: serde_json::json!({ "error": err.to_string() }),
                }
            }
        }
    }
}
