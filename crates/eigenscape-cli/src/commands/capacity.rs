//! `eigenscape capacity`: upper bound on distinct matrices.

use crate::commands::read_json;
use crate::error::Result;
use crate::output;
use eigenscape::pipeline::{CapacityRequest, Pipeline};
use std::path::Path;

pub(crate) fn run(request: &Path, summary: bool, pretty: bool) -> Result<()> {
    let request: CapacityRequest = read_json(request)?;
    let response = Pipeline::default().max_possible(&request)?;
    tracing::info!(max_possible = response.max_possible, "capacity estimated");

    if summary {
        output::section("Capacity");
        output::kv("Matrix size", format!("{0}x{0}", request.size));
        output::kv("Constraints (not used)", request.constraints.len());
        output::kv("Max possible", response.max_possible);
    } else {
        output::json(&response, pretty)?;
    }
    Ok(())
}
