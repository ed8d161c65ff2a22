//! `eigenscape generate`: sample, decompose and embed.

use crate::commands::read_json;
use crate::error::{CliError, Result};
use crate::output;
use eigenscape::observe::Observer;
use eigenscape::pipeline::{GenerationRequest, GenerationResponse, Pipeline, PipelineConfig};
use eigenscape::spectral::Scalar;
use std::path::Path;

pub(crate) struct GenerateOptions<'a> {
    pub(crate) request: &'a Path,
    pub(crate) config: Option<&'a Path>,
    pub(crate) seed: Option<u64>,
    pub(crate) summary: bool,
    pub(crate) pretty: bool,
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CliError::FileNotFound(path.to_path_buf()),
                _ => CliError::Io(e),
            })?;
            serde_json::from_str(&text).map_err(|e| CliError::InvalidConfig(e.to_string()))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config
        .validate()
        .map_err(|e| CliError::InvalidConfig(e.to_string()))?;
    Ok(config)
}

pub(crate) fn run(opts: &GenerateOptions<'_>) -> Result<()> {
    let config = load_config(opts.config, opts.seed)?;
    let request: GenerationRequest = read_json(opts.request)?;

    let observer = Observer::for_request("generate");
    let result = Pipeline::new(config).generate(&request, &observer);
    let stats = observer.stats();
    tracing::info!(
        attempts = stats.attempts,
        accepted = stats.accepted,
        rejected = stats.rejected,
        "sampling statistics"
    );
    let response = result?;

    if opts.summary {
        print_summary(&request, &response, stats.attempts);
    } else {
        output::json(&response, opts.pretty)?;
    }
    Ok(())
}

fn format_scalar(value: &Scalar) -> String {
    match value {
        Scalar::Real(x) => format!("{x:.4}"),
        Scalar::Complex { real, imag } if *imag < 0.0 => format!("{real:.4}-{:.4}i", -imag),
        Scalar::Complex { real, imag } => format!("{real:.4}+{imag:.4}i"),
    }
}

fn print_summary(request: &GenerationRequest, response: &GenerationResponse, attempts: usize) {
    output::section("Generation");
    output::kv("Matrix size", format!("{0}x{0}", request.size));
    output::kv("Accepted", response.matrices.len());
    output::kv("Attempts", attempts);
    output::kv("Constraints", request.constraints.len());
    output::kv("Transposed", request.transpose_matrix);

    for (idx, rows) in response.matrices.iter().enumerate() {
        output::section(&format!("Matrix {idx}"));
        for row in rows {
            println!("  {}", output::format_row(row));
        }
        let values: Vec<String> = response.eigenvalues[idx].iter().map(format_scalar).collect();
        output::kv("Eigenvalues", values.join(", "));
        output::kv("Coordinates", output::format_row(&response.coordinates[idx]));
    }
    output::success(&format!("{} matrices generated", response.matrices.len()));
}
