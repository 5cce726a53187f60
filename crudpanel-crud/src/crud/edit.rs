use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;

use crudpanel_config::sections;
use crudpanel_operations::{Execute, ExecutionResult, Operation};
use crudpanel_views::{Component, ViewDescriptor, CRUD_PREVIEW, CRUD_SHOW};

use crate::auth::CrudAction;
use crate::context::{CrudContext, RequestContext};
use crate::error::{CrudError, Result};
use crate::lifecycle::RequestState;
use crate::types::EntityId;

use super::config_prop;

const EDIT_SECTIONS: [&str; 5] = [
    sections::FORM,
    sections::ROUTE_PREFIX,
    sections::NAMES,
    sections::PERMISSIONS,
    sections::EXPAND_FORM_CONTAINER,
];

/// Render the edit form of one entity.
#[derive(Debug, Clone)]
pub struct EditCrud {
    pub id: EntityId,
}

impl EditCrud {
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }

    pub fn from_request(request: &RequestContext) -> Result<Self> {
        Ok(Self::new(request.id()?))
    }

    async fn run(&self, ctx: &CrudContext) -> Result<Value> {
        ctx.authorize(CrudAction::Read)?;

        let controller = ctx.controller();
        let store = controller.entity_store();
        let query = controller.query();
        ctx.advance(RequestState::QueryBuilt)?;

        let mut record = store
            .find(&query, self.id)
            .await?
            .ok_or_else(|| CrudError::not_found(ctx.entity(), self.id))?;
        for field in controller.fields().media_fields() {
            let media = store.load_media(ctx.entity(), self.id, &field.id).await?;
            record.media.insert(field.id.clone(), media);
        }
        let previous = store.previous_id(ctx.entity(), self.id).await?;
        let next = store.next_id(ctx.entity(), self.id).await?;
        ctx.advance(RequestState::Executed)?;

        let config = ctx.config();
        let names = config.names()?;
        let route_prefix = config.route_prefix()?;
        let mut config = config_prop(
            config.get(&EDIT_SECTIONS)?,
            Some(sections::EXPAND_FORM_CONTAINER),
        );

        if !ctx.permissions().update {
            let mut fields = controller.fields().clone();
            fields.mark_all_readonly();
            let mut form = match config.remove(sections::FORM) {
                Some(Value::Object(form)) => form,
                _ => Map::new(),
            };
            form.insert("fields".to_string(), serde_json::to_value(fields.views())?);
            config.insert(sections::FORM.to_string(), Value::Object(form));
        }
        if let Some(route) = controller.preview_route(&record) {
            config.insert("preview_route".to_string(), Value::String(route));
        }

        let view = ViewDescriptor::for_component(&CRUD_SHOW)
            .with_title(format!("Edit {}", names.singular))
            .with_prop("crud-model", serde_json::to_value(&record)?)
            .with_prop("config", config)
            .with_prop("backRoute", route_prefix)
            .with_prop("nearItems", json!({ "previous": previous, "next": next }))
            .with_prop("headerComponents", json!([CRUD_PREVIEW.name()]))
            .with_prop("controls", json!([]));
        view.check(&CRUD_SHOW)?;

        ctx.advance(RequestState::Rendered)?;
        debug!(
            entity = %ctx.entity(),
            id = %self.id,
            readonly = !ctx.permissions().update,
            "edit form rendered"
        );
        Ok(view.to_value())
    }
}

impl Operation for EditCrud {
    fn verb(&self) -> &'static str {
        "edit"
    }

    fn noun(&self) -> &'static str {
        "crud"
    }

    fn description(&self) -> &'static str {
        "Render the edit form of one entity"
    }
}

#[async_trait]
impl Execute<CrudContext, CrudError> for EditCrud {
    async fn execute(&self, ctx: &CrudContext) -> ExecutionResult<Value, CrudError> {
        let result = self.run(ctx).await;
        ctx.settle(&result);
        ExecutionResult::unlogged(result)
    }
}
