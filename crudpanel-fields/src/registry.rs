//! The ordered set of fields declared for one entity.
//!
//! Fields are validated as they are registered. Lookup goes through an
//! id index; iteration preserves registration order, which is the order the
//! presentation layer renders the form in.

use std::collections::HashMap;

use tracing::debug;

use crate::entity::EntitySchema;
use crate::error::{FieldsError, Result};
use crate::types::{FieldDef, FieldView};

/// Registry of field definitions for a single entity.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDef>,
    id_index: HashMap<String, usize>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from fields in order, stopping at the first invalid one.
    pub fn from_fields(fields: impl IntoIterator<Item = FieldDef>) -> Result<Self> {
        let mut registry = Self::new();
        for field in fields {
            registry.register(field)?;
        }
        Ok(registry)
    }

    /// Build a registry from a parsed entity schema.
    pub fn from_schema(schema: &EntitySchema) -> Result<Self> {
        let registry = Self::from_fields(schema.fields.iter().cloned())?;
        debug!(
            entity = %schema.entity,
            fields = registry.len(),
            "field registry built"
        );
        Ok(registry)
    }

    /// Validate and append a field. Ids are unique within a registry.
    pub fn register(&mut self, field: FieldDef) -> Result<()> {
        if self.id_index.contains_key(&field.id) {
            return Err(FieldsError::DuplicateFieldId { id: field.id });
        }
        field.validate()?;

        let idx = self.fields.len();
        self.id_index.insert(field.id.clone(), idx);
        self.fields.push(field);
        Ok(())
    }

    /// Get a field by id.
    pub fn get(&self, id: &str) -> Result<&FieldDef> {
        self.id_index
            .get(id)
            .map(|&i| &self.fields[i])
            .ok_or_else(|| FieldsError::UnknownField { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// All fields in registration order.
    pub fn all(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    pub fn media_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_media())
    }

    /// Mark every field readonly.
    pub fn mark_all_readonly(&mut self) {
        for field in &mut self.fields {
            field.mark_readonly();
        }
    }

    /// Presentation views of every field, in order.
    pub fn views(&self) -> Vec<FieldView> {
        self.fields.iter().map(FieldDef::view).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
