use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crudpanel_config::sections;
use crudpanel_operations::{Execute, ExecutionResult, Operation};
use crudpanel_views::{ViewDescriptor, CRUD_SHOW};

use crate::auth::CrudAction;
use crate::context::CrudContext;
use crate::error::{CrudError, Result};
use crate::lifecycle::RequestState;

use super::config_prop;

const CREATE_SECTIONS: [&str; 4] = [
    sections::FORM,
    sections::NAMES,
    sections::PERMISSIONS,
    sections::ROUTE_PREFIX,
];

/// Render the create form around an empty entity shell.
#[derive(Debug, Clone, Default)]
pub struct CreateCrud;

impl CreateCrud {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, ctx: &CrudContext) -> Result<Value> {
        ctx.authorize(CrudAction::Create)?;

        let config = ctx.config();
        let route_prefix = config.route_prefix()?;
        let section = config.get(&CREATE_SECTIONS)?;

        let model = json!({
            "id": null,
            "route_prefix": route_prefix,
            "fields": ctx.controller().fields().views(),
        });
        let view = ViewDescriptor::for_component(&CRUD_SHOW)
            .with_prop("config", config_prop(section, None))
            .with_prop("headerComponents", json!([]))
            .with_model("model", model);
        view.check(&CRUD_SHOW)?;

        ctx.advance(RequestState::Rendered)?;
        debug!(entity = %ctx.entity(), "create form rendered");
        Ok(view.to_value())
    }
}

impl Operation for CreateCrud {
    fn verb(&self) -> &'static str {
        "create"
    }

    fn noun(&self) -> &'static str {
        "crud"
    }

    fn description(&self) -> &'static str {
        "Render the create form of an entity type"
    }
}

#[async_trait]
impl Execute<CrudContext, CrudError> for CreateCrud {
    async fn execute(&self, ctx: &CrudContext) -> ExecutionResult<Value, CrudError> {
        let result = self.run(ctx).await;
        ctx.settle(&result);
        ExecutionResult::unlogged(result)
    }
}
