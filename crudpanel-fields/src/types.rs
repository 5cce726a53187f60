//! Field definitions.
//!
//! A `FieldDef` names one attribute of an entity, picks a kind from the
//! kinds table, and carries the explicit attribute values the entity schema
//! supplied. Resolution overlays those values on the kind's defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldsError, Result};
use crate::schema::{FieldKind, KindSchema};

fn is_false(b: &bool) -> bool {
    !*b
}

/// A single form field declared for an entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    pub id: String,
    pub kind: FieldKind,
    /// Explicitly supplied attribute values.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
}

impl FieldDef {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            attributes: IndexMap::new(),
            readonly: false,
        }
    }

    /// Set an explicit attribute value.
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(attribute.into(), value.into());
        self
    }

    pub fn schema(&self) -> &'static KindSchema {
        self.kind.schema()
    }

    /// Presentation component for this field.
    pub fn component(&self) -> &'static str {
        &self.schema().component
    }

    pub fn is_relation(&self) -> bool {
        self.kind.is_relation()
    }

    pub fn is_media(&self) -> bool {
        self.kind.is_media()
    }

    /// Check explicit values against the kind's attribute contract.
    ///
    /// Every required attribute must be set or defaulted, and every explicit
    /// attribute must be available for the kind.
    pub fn validate(&self) -> Result<()> {
        let schema = self.schema();

        for required in &schema.required {
            if !self.attributes.contains_key(required) && !schema.defaults.contains_key(required) {
                return Err(FieldsError::missing_required(&self.id, required));
            }
        }

        for attribute in self.attributes.keys() {
            if !schema.is_available(attribute) {
                return Err(FieldsError::unknown_attribute(&self.id, attribute));
            }
        }

        Ok(())
    }

    /// Defaults overlaid by explicit values, in the kind's declared order.
    ///
    /// Only available attributes appear; explicit values always win.
    pub fn resolved_attributes(&self) -> IndexMap<String, Value> {
        let schema = self.schema();
        schema
            .available
            .iter()
            .filter_map(|key| {
                self.attributes
                    .get(key)
                    .or_else(|| schema.defaults.get(key))
                    .map(|value| (key.clone(), value.clone()))
            })
            .collect()
    }

    /// Resolved value of a single attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        let schema = self.schema();
        if !schema.is_available(key) {
            return None;
        }
        self.attributes.get(key).or_else(|| schema.defaults.get(key))
    }

    /// Mark the field readonly for presentation. Idempotent.
    pub fn mark_readonly(&mut self) {
        self.readonly = true;
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// The shape handed to the presentation layer.
    pub fn view(&self) -> FieldView {
        FieldView {
            id: self.id.clone(),
            kind: self.kind,
            component: self.component().to_string(),
            readonly: self.readonly,
            attributes: self.resolved_attributes(),
        }
    }
}

/// A field as rendered into a form section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldView {
    pub id: String,
    pub kind: FieldKind,
    pub component: String,
    pub readonly: bool,
    pub attributes: IndexMap<String, Value>,
}
