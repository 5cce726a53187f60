//! View descriptors: what a controller hands to the renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::component::Component;
use crate::error::{Result, ViewError};

/// A component name, its input props, and optional page title and models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewDescriptor {
    pub component: String,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Serialized entities the component binds to.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub models: Map<String, Value>,
}

impl ViewDescriptor {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Self::default()
        }
    }

    /// Start a descriptor for a known component.
    pub fn for_component(component: &dyn Component) -> Self {
        Self::new(component.name())
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_model(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.models.insert(name.into(), value.into());
        self
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Check the descriptor against a component's prop contract.
    pub fn check(&self, component: &dyn Component) -> Result<()> {
        if self.component != component.name() {
            return Err(ViewError::ComponentMismatch {
                expected: component.name().to_string(),
                actual: self.component.clone(),
            });
        }
        for prop in self.props.keys() {
            if !component.has_prop(prop) {
                return Err(ViewError::UnknownProp {
                    component: self.component.clone(),
                    prop: prop.clone(),
                });
            }
        }
        trace!(component = %self.component, props = self.props.len(), "descriptor checked");
        Ok(())
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{CRUD_INDEX, CRUD_SHOW};
    use serde_json::json;

    #[test]
    fn builder_sets_props_title_and_models() {
        let view = ViewDescriptor::for_component(&CRUD_SHOW)
            .with_title("Edit Post")
            .with_prop("config", json!({}))
            .with_model("model", json!({"id": 1}));
        assert_eq!(view.component, "crud-show");
        assert_eq!(view.title.as_deref(), Some("Edit Post"));
        assert_eq!(view.prop("config"), Some(&json!({})));
        assert_eq!(view.models["model"]["id"], 1);
    }

    #[test]
    fn check_accepts_declared_props() {
        let view = ViewDescriptor::for_component(&CRUD_INDEX)
            .with_prop("config", json!({}))
            .with_prop("headerComponents", json!([]));
        view.check(&CRUD_INDEX).unwrap();
    }

    #[test]
    fn check_rejects_unknown_prop() {
        let view = ViewDescriptor::for_component(&CRUD_INDEX).with_prop("nearItems", json!({}));
        let err = view.check(&CRUD_INDEX).unwrap_err();
        assert!(matches!(err, ViewError::UnknownProp { ref prop, .. } if prop == "nearItems"));
    }

    #[test]
    fn check_rejects_other_component() {
        let view = ViewDescriptor::for_component(&CRUD_INDEX);
        assert!(matches!(
            view.check(&CRUD_SHOW),
            Err(ViewError::ComponentMismatch { .. })
        ));
    }

    #[test]
    fn optional_parts_are_omitted() {
        let value = ViewDescriptor::new("crud-index").to_value();
        assert!(value.get("title").is_none());
        assert!(value.get("models").is_none());
        assert_eq!(value["props"], json!({}));
    }
}
