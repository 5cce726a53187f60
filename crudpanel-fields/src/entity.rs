//! Entity schemas: the field list declared for one entity type.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::FieldDef;

/// The fields an entity exposes to its CRUD forms, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySchema {
    pub entity: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl EntitySchema {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read a schema from a YAML file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| FieldsError::SchemaFile {
                path: path.to_path_buf(),
                source,
            })?;
        let schema = Self::from_yaml(&content)?;
        debug!(?path, entity = %schema.entity, "entity schema loaded");
        Ok(schema)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
