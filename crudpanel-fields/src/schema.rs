//! Field kinds and their attribute schema table.
//!
//! A field kind is a static classification: it selects the presentation
//! component, the attributes a field must and may carry, and the defaults
//! applied to attributes left unset. The built-in table ships as YAML and is
//! validated once on first use.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{FieldsError, Result};

const BUILTIN_KINDS: &str = include_str!("builtin/kinds.yaml");

static BUILTIN: Lazy<KindTable> = Lazy::new(|| {
    KindTable::from_yaml(BUILTIN_KINDS).expect("built-in field kinds must be a valid schema table")
});

/// The kind of a field. Determines its component and attribute contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Input,
    Textarea,
    Wysiwyg,
    Boolean,
    Select,
    Range,
    Datetime,
    Code,
    Icon,
    /// Points at another entity; eager-loaded when the entity is edited.
    Relation,
    /// Media attachments, stored outside the entity row.
    Image,
    File,
}

impl FieldKind {
    /// All kinds, in declaration order.
    pub const ALL: [FieldKind; 12] = [
        FieldKind::Input,
        FieldKind::Textarea,
        FieldKind::Wysiwyg,
        FieldKind::Boolean,
        FieldKind::Select,
        FieldKind::Range,
        FieldKind::Datetime,
        FieldKind::Code,
        FieldKind::Icon,
        FieldKind::Relation,
        FieldKind::Image,
        FieldKind::File,
    ];

    /// The kebab-case name used in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::Textarea => "textarea",
            FieldKind::Wysiwyg => "wysiwyg",
            FieldKind::Boolean => "boolean",
            FieldKind::Select => "select",
            FieldKind::Range => "range",
            FieldKind::Datetime => "datetime",
            FieldKind::Code => "code",
            FieldKind::Icon => "icon",
            FieldKind::Relation => "relation",
            FieldKind::Image => "image",
            FieldKind::File => "file",
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, FieldKind::Relation)
    }

    pub fn is_media(&self) -> bool {
        matches!(self, FieldKind::Image | FieldKind::File)
    }

    /// Schema row for this kind from the built-in table.
    pub fn schema(&self) -> &'static KindSchema {
        BUILTIN
            .get(*self)
            .expect("built-in field kinds cover every FieldKind")
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the kinds table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KindSchema {
    pub kind: FieldKind,
    /// Presentation widget name.
    pub component: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub defaults: IndexMap<String, Value>,
}

impl KindSchema {
    pub fn is_available(&self, attribute: &str) -> bool {
        self.available.iter().any(|a| a == attribute)
    }

    pub fn is_required(&self, attribute: &str) -> bool {
        self.required.iter().any(|a| a == attribute)
    }

    /// Check the row against its own contract.
    fn check(&self) -> Result<()> {
        let kind = self.kind.as_str();
        for key in self.defaults.keys() {
            if !self.is_available(key) {
                return Err(FieldsError::invalid_schema(
                    kind,
                    format!("default '{key}' is not an available attribute"),
                ));
            }
        }
        for key in &self.required {
            if !self.is_available(key) {
                return Err(FieldsError::invalid_schema(
                    kind,
                    format!("required '{key}' is not an available attribute"),
                ));
            }
        }
        let mut seen = HashSet::new();
        for key in &self.available {
            if !seen.insert(key.as_str()) {
                return Err(FieldsError::invalid_schema(
                    kind,
                    format!("attribute '{key}' is listed twice"),
                ));
            }
        }
        Ok(())
    }
}

/// Table of kind schemas, consulted when fields are validated.
#[derive(Debug, Clone)]
pub struct KindTable {
    rows: Vec<KindSchema>,
}

impl KindTable {
    /// The built-in table shipped with the crate.
    pub fn builtin() -> &'static KindTable {
        &BUILTIN
    }

    /// Parse and validate a table from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let rows: Vec<KindSchema> = serde_yaml_ng::from_str(yaml)?;
        Self::from_rows(rows)
    }

    /// Validate a set of rows: one row per kind, each row self-consistent.
    pub fn from_rows(rows: Vec<KindSchema>) -> Result<Self> {
        let mut kinds = HashSet::new();
        for row in &rows {
            if !kinds.insert(row.kind) {
                return Err(FieldsError::invalid_schema(
                    row.kind.as_str(),
                    "kind declared more than once",
                ));
            }
            row.check()?;
        }
        debug!(kinds = rows.len(), "field kinds table loaded");
        Ok(Self { rows })
    }

    pub fn get(&self, kind: FieldKind) -> Option<&KindSchema> {
        self.rows.iter().find(|r| r.kind == kind)
    }

    /// Look up a kind by name, failing with `UnknownKind`.
    pub fn lookup(&self, name: &str) -> Result<&KindSchema> {
        self.rows
            .iter()
            .find(|r| r.kind.as_str() == name)
            .ok_or_else(|| FieldsError::UnknownKind {
                kind: name.to_string(),
            })
    }

    pub fn rows(&self) -> &[KindSchema] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_table_covers_every_kind() {
        let table = KindTable::builtin();
        for kind in FieldKind::ALL {
            assert!(table.get(kind).is_some(), "missing row for {kind}");
        }
        assert_eq!(table.rows().len(), FieldKind::ALL.len());
    }

    #[test]
    fn range_row_matches_form_range_contract() {
        let range = FieldKind::Range.schema();
        assert_eq!(range.component, "form-range");
        assert_eq!(range.required, vec!["title", "min", "max"]);
        assert_eq!(range.available, vec!["title", "hint", "step", "min", "max"]);
        assert_eq!(range.defaults.get("step"), Some(&json!(1)));
    }

    #[test]
    fn classification_is_static() {
        assert!(FieldKind::Relation.is_relation());
        assert!(!FieldKind::Relation.is_media());
        assert!(FieldKind::Image.is_media());
        assert!(FieldKind::File.is_media());
        assert!(!FieldKind::Input.is_relation());
        assert!(!FieldKind::Input.is_media());
    }

    #[test]
    fn kind_names_round_trip_through_yaml() {
        for kind in FieldKind::ALL {
            let yaml = serde_yaml_ng::to_string(&kind).unwrap();
            assert_eq!(yaml.trim(), kind.as_str());
            let parsed: FieldKind = serde_yaml_ng::from_str(&yaml).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn default_outside_available_is_rejected() {
        let yaml = r#"
- kind: range
  component: form-range
  required: [title]
  available: [title]
  defaults:
    step: 1
"#;
        let err = KindTable::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, FieldsError::InvalidSchema { .. }));
        assert!(err.to_string().contains("step"));
    }

    #[test]
    fn required_outside_available_is_rejected() {
        let yaml = r#"
- kind: input
  component: form-input
  required: [title, slug]
  available: [title]
"#;
        let err = KindTable::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("slug"));
    }

    #[test]
    fn duplicate_kind_rows_are_rejected() {
        let yaml = r#"
- kind: input
  component: form-input
  available: [title]
- kind: input
  component: form-text
  available: [title]
"#;
        assert!(KindTable::from_yaml(yaml).is_err());
    }

    #[test]
    fn lookup_unknown_kind_name() {
        let err = KindTable::builtin().lookup("markdown").unwrap_err();
        assert!(matches!(err, FieldsError::UnknownKind { ref kind } if kind == "markdown"));
        assert_eq!(
            KindTable::builtin().lookup("range").unwrap().kind,
            FieldKind::Range
        );
    }
}
