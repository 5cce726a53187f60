//! `crudpanel kinds`

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use crudpanel_fields::KindTable;

use super::{cell, serialize};
use crate::cli::OutputFormat;

pub fn execute(format: OutputFormat) -> Result<String> {
    let rows = KindTable::builtin().rows();
    tracing::debug!(kinds = rows.len(), "listing field kinds");

    if let Some(text) = serialize(&rows, format)? {
        return Ok(text);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Kind", "Component", "Required", "Available", "Defaults"]);
    for row in rows {
        let defaults = row
            .defaults
            .iter()
            .map(|(key, value)| format!("{key}={}", cell(value)))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            row.kind.to_string(),
            row.component.clone(),
            row.required.join(", "),
            row.available.join(", "),
            defaults,
        ]);
    }
    Ok(table.to_string())
}
