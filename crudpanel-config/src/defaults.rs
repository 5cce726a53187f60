//! Framework-wide configuration defaults.
//!
//! These are the lowest-precedence layer of every controller's configuration.
//! Entity-derived values and controller overrides replace them key by key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Well-known section keys.
pub mod sections {
    pub const INDEX: &str = "index";
    pub const FORM: &str = "form";
    pub const PERMISSIONS: &str = "permissions";
    pub const NAMES: &str = "names";
    pub const ROUTE_PREFIX: &str = "route_prefix";
    pub const SORT_BY: &str = "sortBy";
    pub const SORT_BY_DEFAULT: &str = "sortByDefault";
    pub const PER_PAGE: &str = "perPage";
    pub const FILTER: &str = "filter";
    pub const EXPAND_INDEX_CONTAINER: &str = "expandIndexContainer";
    pub const EXPAND_FORM_CONTAINER: &str = "expandFormContainer";
}

/// Framework defaults, loadable from file and environment via `ConfigProvider`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameworkDefaults {
    /// Path segment every CRUD route prefix starts with.
    pub route_root: String,
    pub per_page: u32,
    pub sort_by: Map<String, Value>,
    pub sort_by_default: String,
    pub filter: Map<String, Value>,
    pub expand_index_container: bool,
    pub expand_form_container: bool,
    pub permissions: BTreeMap<String, bool>,
    pub index: Map<String, Value>,
}

impl Default for FrameworkDefaults {
    fn default() -> Self {
        let permissions = ["create", "read", "update", "delete"]
            .into_iter()
            .map(|op| (op.to_string(), false))
            .collect();

        Self {
            route_root: "admin".to_string(),
            per_page: 20,
            sort_by: Map::new(),
            sort_by_default: "id.desc".to_string(),
            filter: Map::new(),
            expand_index_container: false,
            expand_form_container: false,
            permissions,
            index: Map::new(),
        }
    }
}

impl FrameworkDefaults {
    /// The defaults as a configuration layer keyed by section name.
    pub fn to_layer(&self) -> Map<String, Value> {
        let mut layer = Map::new();
        layer.insert(sections::INDEX.into(), Value::Object(self.index.clone()));
        layer.insert(sections::PER_PAGE.into(), json!(self.per_page));
        layer.insert(sections::SORT_BY.into(), Value::Object(self.sort_by.clone()));
        layer.insert(sections::SORT_BY_DEFAULT.into(), json!(self.sort_by_default));
        layer.insert(sections::FILTER.into(), Value::Object(self.filter.clone()));
        layer.insert(
            sections::EXPAND_INDEX_CONTAINER.into(),
            json!(self.expand_index_container),
        );
        layer.insert(
            sections::EXPAND_FORM_CONTAINER.into(),
            json!(self.expand_form_container),
        );
        layer.insert(sections::PERMISSIONS.into(), json!(self.permissions));
        layer
    }
}
