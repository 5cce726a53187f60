//! Controller configuration schema and per-request resolution.
//!
//! A `ConfigSchema` holds the three static layers of one controller's
//! configuration: framework defaults, values derived from the entity type,
//! and the controller's explicit overrides. A `RequestConfig` adds the
//! request layer on top and resolves sections lazily, caching each one for
//! the lifetime of the request.
//!
//! Resolution looks for a key from the highest layer down. Scalar and list
//! values are taken from the first layer that has them. Object values are
//! shallow-merged across every layer that declares the key, higher layers
//! winning per entry.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::defaults::{sections, FrameworkDefaults};
use crate::error::{ConfigError, Result};
use crate::names::EntityNames;

/// A resolved subset of sections, in the order they were requested.
pub type Section = IndexMap<String, Value>;

/// Static configuration layers for one controller.
#[derive(Debug, Clone)]
pub struct ConfigSchema {
    entity: String,
    framework: Map<String, Value>,
    derived: Map<String, Value>,
    controller: Map<String, Value>,
}

impl ConfigSchema {
    /// Start a schema for an entity type on top of the given framework defaults.
    pub fn builder(entity: impl Into<String>, defaults: &FrameworkDefaults) -> ConfigSchemaBuilder {
        let entity = entity.into();
        let names = EntityNames::derive(&entity);

        let mut derived = Map::new();
        derived.insert(
            sections::ROUTE_PREFIX.into(),
            Value::String(names.route_prefix(&defaults.route_root)),
        );
        derived.insert(
            sections::NAMES.into(),
            serde_json::to_value(&names).unwrap_or(Value::Null),
        );

        ConfigSchemaBuilder {
            schema: ConfigSchema {
                entity,
                framework: defaults.to_layer(),
                derived,
                controller: Map::new(),
            },
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Whether any layer declares the section.
    pub fn declares(&self, key: &str) -> bool {
        self.framework.contains_key(key)
            || self.derived.contains_key(key)
            || self.controller.contains_key(key)
    }

    /// Every declared section key, sorted.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.framework
            .keys()
            .chain(self.derived.keys())
            .chain(self.controller.keys())
            .map(String::as_str)
            .collect()
    }

    /// Layers lowest precedence first.
    fn layers(&self) -> [&Map<String, Value>; 3] {
        [&self.framework, &self.derived, &self.controller]
    }
}

/// Builder for `ConfigSchema`. Created by `ConfigSchema::builder()`.
#[derive(Debug)]
pub struct ConfigSchemaBuilder {
    schema: ConfigSchema,
}

impl ConfigSchemaBuilder {
    /// Set a value derived from the entity type, below controller overrides.
    ///
    /// Object values still shallow-merge with a controller value for the same
    /// section.
    pub fn derived(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.schema.derived.insert(key.into(), value.into());
        self
    }

    /// Set an explicit controller-level value for a section.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.schema.controller.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> ConfigSchema {
        debug!(
            entity = %self.schema.entity,
            overrides = self.schema.controller.len(),
            "config schema built"
        );
        self.schema
    }
}

#[derive(Debug, Default)]
struct Cache {
    sections: HashMap<String, Value>,
    resolutions: usize,
}

/// Request-scoped view over a `ConfigSchema`.
///
/// Dropped at the end of the request together with its cache.
#[derive(Debug)]
pub struct RequestConfig {
    schema: Arc<ConfigSchema>,
    request: Map<String, Value>,
    cache: Mutex<Cache>,
}

impl RequestConfig {
    pub fn new(schema: Arc<ConfigSchema>) -> Self {
        Self {
            schema,
            request: Map::new(),
            cache: Mutex::new(Cache::default()),
        }
    }

    /// Add a per-request override for a declared section.
    ///
    /// Overrides must be applied before the first `get`; already cached
    /// sections are not recomputed.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let key = key.into();
        if !self.schema.declares(&key) {
            return Err(ConfigError::unknown_section(key));
        }
        self.request.insert(key, value.into());
        Ok(self)
    }

    pub fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    /// Resolve the requested sections.
    pub fn get(&self, keys: &[&str]) -> Result<Section> {
        let mut section = Section::with_capacity(keys.len());
        for key in keys {
            section.insert(key.to_string(), self.value(key)?);
        }
        Ok(section)
    }

    /// Resolve a single section.
    pub fn value(&self, key: &str) -> Result<Value> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(value) = cache.sections.get(key) {
            trace!(key, "config section cache hit");
            return Ok(value.clone());
        }

        let value = self.resolve(key)?;
        cache.resolutions += 1;
        cache.sections.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Resolve a section and deserialize it.
    pub fn typed<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        serde_json::from_value(self.value(key)?)
            .map_err(|e| ConfigError::invalid_value(key, e.to_string()))
    }

    pub fn route_prefix(&self) -> Result<String> {
        self.typed(sections::ROUTE_PREFIX)
    }

    pub fn names(&self) -> Result<EntityNames> {
        self.typed(sections::NAMES)
    }

    /// Number of sections computed (not served from cache) so far.
    pub fn resolutions(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .resolutions
    }

    fn resolve(&self, key: &str) -> Result<Value> {
        let [framework, derived, controller] = self.schema.layers();
        // highest precedence first
        let layers = [&self.request, controller, derived, framework];

        let mut found = layers.iter().filter_map(|layer| layer.get(key));
        let top = found
            .next()
            .ok_or_else(|| ConfigError::unknown_section(key))?;

        let Value::Object(top) = top else {
            return Ok(top.clone());
        };

        let mut merged = Map::new();
        let below: Vec<&Map<String, Value>> = found
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        for map in below.into_iter().rev() {
            for (k, v) in map {
                merged.insert(k.clone(), v.clone());
            }
        }
        for (k, v) in top {
            merged.insert(k.clone(), v.clone());
        }
        Ok(Value::Object(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Arc<ConfigSchema> {
        Arc::new(
            ConfigSchema::builder("BlogPost", &FrameworkDefaults::default())
                .set(sections::PER_PAGE, 50)
                .set(sections::PERMISSIONS, json!({"read": true}))
                .set(sections::FORM, json!({"fields": []}))
                .build(),
        )
    }

    #[test]
    fn controller_override_beats_framework_default() {
        let config = RequestConfig::new(schema());
        assert_eq!(config.value(sections::PER_PAGE).unwrap(), json!(50));
        assert_eq!(
            config.value(sections::SORT_BY_DEFAULT).unwrap(),
            json!("id.desc")
        );
    }

    #[test]
    fn entity_derived_names_and_route_prefix() {
        let config = RequestConfig::new(schema());
        let names = config.names().unwrap();
        assert_eq!(names.singular, "Blog Post");
        assert_eq!(names.plural, "Blog Posts");
        assert_eq!(config.route_prefix().unwrap(), "admin/blog-posts");
    }

    #[test]
    fn controller_override_beats_entity_derived() {
        let schema = Arc::new(
            ConfigSchema::builder("BlogPost", &FrameworkDefaults::default())
                .set(sections::ROUTE_PREFIX, "admin/articles")
                .build(),
        );
        let config = RequestConfig::new(schema);
        assert_eq!(config.route_prefix().unwrap(), "admin/articles");
    }

    #[test]
    fn object_sections_shallow_merge_across_layers() {
        let config = RequestConfig::new(schema())
            .with_override(sections::PERMISSIONS, json!({"update": true}))
            .unwrap();
        let permissions = config.value(sections::PERMISSIONS).unwrap();
        assert_eq!(
            permissions,
            json!({"create": false, "read": true, "update": true, "delete": false})
        );
    }

    #[test]
    fn derived_object_merges_under_controller_override() {
        let schema = Arc::new(
            ConfigSchema::builder("post", &FrameworkDefaults::default())
                .derived(sections::FORM, json!({"fields": ["title"]}))
                .set(sections::FORM, json!({"layout": "wide"}))
                .build(),
        );
        let config = RequestConfig::new(schema);
        assert_eq!(
            config.value(sections::FORM).unwrap(),
            json!({"fields": ["title"], "layout": "wide"})
        );
    }

    #[test]
    fn controller_scalar_beats_derived() {
        let schema = Arc::new(
            ConfigSchema::builder("post", &FrameworkDefaults::default())
                .derived(sections::FILTER, "derived")
                .set(sections::FILTER, "explicit")
                .build(),
        );
        let config = RequestConfig::new(schema);
        assert_eq!(config.value(sections::FILTER).unwrap(), json!("explicit"));
    }

    #[test]
    fn scalar_section_does_not_merge() {
        let schema = Arc::new(
            ConfigSchema::builder("post", &FrameworkDefaults::default())
                .set(sections::FILTER, "none")
                .build(),
        );
        let config = RequestConfig::new(schema);
        assert_eq!(config.value(sections::FILTER).unwrap(), json!("none"));
    }

    #[test]
    fn get_restricts_to_requested_keys_in_order() {
        let config = RequestConfig::new(schema());
        let section = config
            .get(&[sections::NAMES, sections::PER_PAGE, sections::FORM])
            .unwrap();
        let keys: Vec<_> = section.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["names", "perPage", "form"]);
    }

    #[test]
    fn unknown_section_fails() {
        let config = RequestConfig::new(schema());
        let err = config
            .get(&[sections::NAMES, "sidebar"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSection { ref key } if key == "sidebar"));
    }

    #[test]
    fn request_override_for_undeclared_section_fails() {
        let err = RequestConfig::new(schema())
            .with_override("sidebar", true)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSection { .. }));
    }

    #[test]
    fn get_is_cached_per_request() {
        let config = RequestConfig::new(schema());
        let first = config.get(&[sections::NAMES, sections::PERMISSIONS]).unwrap();
        assert_eq!(config.resolutions(), 2);

        let second = config.get(&[sections::NAMES, sections::PERMISSIONS]).unwrap();
        assert_eq!(first, second);
        assert_eq!(config.resolutions(), 2);

        config.get(&[sections::PER_PAGE]).unwrap();
        assert_eq!(config.resolutions(), 3);
    }

    #[test]
    fn new_request_starts_with_empty_cache() {
        let schema = schema();
        let first = RequestConfig::new(schema.clone());
        first.value(sections::NAMES).unwrap();
        let second = RequestConfig::new(schema);
        assert_eq!(second.resolutions(), 0);
    }

    #[test]
    fn typed_reports_shape_mismatch() {
        let config = RequestConfig::new(schema());
        let err = config.typed::<EntityNames>(sections::PER_PAGE).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn declared_keys_span_all_layers() {
        let schema = schema();
        let keys = schema.keys();
        assert!(keys.contains(sections::FORM));
        assert!(keys.contains(sections::NAMES));
        assert!(keys.contains(sections::EXPAND_INDEX_CONTAINER));
        assert!(!schema.declares("sidebar"));
    }
}
