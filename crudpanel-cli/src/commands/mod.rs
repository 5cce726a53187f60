//! Subcommand implementations. Each returns the text to print.

pub mod check;
pub mod config;
pub mod kinds;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Serialize for the JSON and YAML formats.
fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
        OutputFormat::Table => return Ok(None),
    };
    Ok(Some(text))
}

/// Compact single-line rendering of a value for table cells.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
