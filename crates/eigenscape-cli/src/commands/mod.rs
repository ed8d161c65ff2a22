//! Subcommand implementations.

pub(crate) mod capacity;
pub(crate) mod generate;

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Reads and parses a JSON document from a file, or stdin for `-`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.to_path_buf()));
        }
        std::fs::read_to_string(path)?
    };
    serde_json::from_str(&text)
        .map_err(|e| CliError::Pipeline(eigenscape::EigenscapeError::from(e)))
}
