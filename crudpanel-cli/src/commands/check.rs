//! `crudpanel check <schema.yaml>`

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crudpanel_config::{ConfigProvider, EntityNames, FrameworkDefaults};
use crudpanel_fields::{EntitySchema, FieldRegistry, FieldView};

use super::{cell, serialize};
use crate::cli::OutputFormat;

/// What a valid entity schema resolves to.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub entity: String,
    pub names: EntityNames,
    pub route_prefix: String,
    pub form: Form,
}

#[derive(Debug, Serialize)]
pub struct Form {
    pub fields: Vec<FieldView>,
}

pub async fn report(path: &Path, defaults: &FrameworkDefaults) -> Result<CheckReport> {
    let schema = EntitySchema::load(path).await?;
    let registry = FieldRegistry::from_schema(&schema)
        .with_context(|| format!("invalid entity schema {}", path.display()))?;
    let names = EntityNames::derive(&schema.entity);
    let route_prefix = names.route_prefix(&defaults.route_root);

    Ok(CheckReport {
        entity: schema.entity,
        names,
        route_prefix,
        form: Form {
            fields: registry.views(),
        },
    })
}

/// Check `path` against the defaults `provider` resolves, so a configured
/// `route_root` shows up in the reported route prefix.
pub async fn execute(path: &Path, provider: &ConfigProvider, format: OutputFormat) -> Result<String> {
    let defaults = provider.load()?;
    let report = report(path, &defaults).await?;
    tracing::info!(entity = %report.entity, fields = report.form.fields.len(), "entity schema is valid");

    if let Some(text) = serialize(&report, format)? {
        return Ok(text);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Kind", "Component", "Attributes"]);
    for field in &report.form.fields {
        let attributes = field
            .attributes
            .iter()
            .map(|(key, value)| format!("{key}={}", cell(value)))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            field.id.clone(),
            field.kind.to_string(),
            field.component.clone(),
            attributes,
        ]);
    }
    Ok(format!(
        "{} ({})\n{}",
        report.names.singular, report.route_prefix, table
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn schema_file(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn valid_schema_reports_resolved_fields() {
        let file = schema_file(
            "entity: BlogPost\nfields:\n  - id: rating\n    kind: range\n    attributes:\n      title: Rating\n      min: 0\n      max: 10\n",
        );
        let report = report(file.path(), &FrameworkDefaults::default()).await.unwrap();
        assert_eq!(report.route_prefix, "admin/blog-posts");
        assert_eq!(report.form.fields.len(), 1);
        assert_eq!(report.form.fields[0].attributes["step"], 1);
    }

    #[tokio::test]
    async fn invalid_schema_names_the_problem() {
        let file = schema_file(
            "entity: post\nfields:\n  - id: rating\n    kind: range\n    attributes:\n      title: Rating\n",
        );
        let err = report(file.path(), &FrameworkDefaults::default()).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid entity schema"));
        assert!(message.contains("min"));
    }

    #[tokio::test]
    #[serial]
    async fn discovered_config_sets_route_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("crudpanel.toml"), "route_root = \"backend\"\n").unwrap();
        let schema = dir.path().join("page.yaml");
        std::fs::write(&schema, "entity: Page\nfields: []\n").unwrap();

        let provider = ConfigProvider::discover(dir.path()).without_env();
        let text = execute(&schema, &provider, OutputFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["route_prefix"], "backend/pages");

        let text = execute(&schema, &provider, OutputFormat::Table).await.unwrap();
        assert!(text.starts_with("Page (backend/pages)"));
    }
}
