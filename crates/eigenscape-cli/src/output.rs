//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[PASS]".green().bold(), msg);
}

/// Print a failure message
pub(crate) fn fail(msg: &str) {
    eprintln!("{} {}", "[FAIL]".red().bold(), msg);
}

/// Print a value as JSON on stdout
pub(crate) fn json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

/// Format a row of numbers compactly
pub(crate) fn format_row(row: &[f64]) -> String {
    let cells: Vec<String> = row.iter().map(|v| format!("{v:>8.3}")).collect();
    format!("[{}]", cells.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row() {
        assert_eq!(format_row(&[1.0, -0.5]), "[   1.000   -0.500]");
        assert_eq!(format_row(&[]), "[]");
    }
}
