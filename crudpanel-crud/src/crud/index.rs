use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crudpanel_config::sections;
use crudpanel_operations::{Execute, ExecutionResult, Operation};
use crudpanel_views::{ViewDescriptor, CRUD_INDEX};

use crate::auth::CrudAction;
use crate::context::CrudContext;
use crate::error::{CrudError, Result};
use crate::lifecycle::RequestState;

use super::config_prop;

const INDEX_SECTIONS: [&str; 8] = [
    sections::INDEX,
    sections::ROUTE_PREFIX,
    sections::NAMES,
    sections::SORT_BY,
    sections::SORT_BY_DEFAULT,
    sections::PER_PAGE,
    sections::FILTER,
    sections::EXPAND_INDEX_CONTAINER,
];

/// Render the list view. Rows are fetched by the renderer's own data endpoint.
#[derive(Debug, Clone, Default)]
pub struct IndexCrud;

impl IndexCrud {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, ctx: &CrudContext) -> Result<Value> {
        ctx.authorize(CrudAction::Read)?;

        let config = ctx.config();
        let names = config.names()?;
        let section = config.get(&INDEX_SECTIONS)?;
        let view = ViewDescriptor::for_component(&CRUD_INDEX)
            .with_title(names.plural)
            .with_prop(
                "config",
                config_prop(section, Some(sections::EXPAND_INDEX_CONTAINER)),
            )
            .with_prop("headerComponents", json!([]));
        view.check(&CRUD_INDEX)?;

        ctx.advance(RequestState::Rendered)?;
        debug!(entity = %ctx.entity(), "index rendered");
        Ok(view.to_value())
    }
}

impl Operation for IndexCrud {
    fn verb(&self) -> &'static str {
        "index"
    }

    fn noun(&self) -> &'static str {
        "crud"
    }

    fn description(&self) -> &'static str {
        "Render the list view of an entity type"
    }
}

#[async_trait]
impl Execute<CrudContext, CrudError> for IndexCrud {
    async fn execute(&self, ctx: &CrudContext) -> ExecutionResult<Value, CrudError> {
        let result = self.run(ctx).await;
        ctx.settle(&result);
        ExecutionResult::unlogged(result)
    }
}
