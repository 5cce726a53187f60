//! `crudpanel config [--file FILE]`

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use crudpanel_config::ConfigProvider;

use super::{cell, serialize};
use crate::cli::OutputFormat;

pub fn execute(file: Option<&Path>, format: OutputFormat) -> Result<String> {
    let provider = match file {
        Some(path) => ConfigProvider::new().with_file(path),
        None => ConfigProvider::discover(std::env::current_dir()?),
    };
    let defaults = provider.load()?;

    if let Some(text) = serialize(&defaults, format)? {
        return Ok(text);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Section", "Value"]);
    table.add_row(vec!["route_root".to_string(), defaults.route_root.clone()]);
    for (key, value) in defaults.to_layer() {
        table.add_row(vec![key, cell(&value)]);
    }
    let source = provider
        .file()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    Ok(format!("source: {source}\n{table}"))
}
