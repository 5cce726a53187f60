use std::time::Instant;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crudpanel_operations::{Execute, ExecutionResult, Operation};

use crate::auth::CrudAction;
use crate::context::{CrudContext, RequestContext};
use crate::error::{CrudError, Result};
use crate::lifecycle::RequestState;
use crate::types::{Attributes, EntityId};

use super::write_entry;

/// Apply request attributes to an existing entity.
#[derive(Debug, Clone)]
pub struct UpdateCrud {
    pub id: EntityId,
    pub attributes: Attributes,
}

impl UpdateCrud {
    pub fn new(id: EntityId, attributes: Attributes) -> Self {
        Self {
            id,
            attributes,
        }
    }

    pub fn from_request(request: &RequestContext) -> Result<Self> {
        Ok(Self::new(request.id()?, request.input.clone()))
    }

    async fn run(&self, ctx: &CrudContext) -> Result<Value> {
        ctx.authorize(CrudAction::Update)?;
        ctx.advance(RequestState::QueryBuilt)?;

        let record = ctx
            .controller()
            .entity_store()
            .update(ctx.entity(), self.id, self.attributes.clone())
            .await?
            .ok_or_else(|| CrudError::not_found(ctx.entity(), self.id))?;
        ctx.advance(RequestState::Executed)?;

        let value = serde_json::to_value(&record)?;
        ctx.advance(RequestState::Rendered)?;
        debug!(entity = %ctx.entity(), id = %self.id, "entity updated");
        Ok(value)
    }
}

impl Operation for UpdateCrud {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "crud"
    }

    fn description(&self) -> &'static str {
        "Apply request attributes to an existing entity"
    }
}

#[async_trait]
impl Execute<CrudContext, CrudError> for UpdateCrud {
    async fn execute(&self, ctx: &CrudContext) -> ExecutionResult<Value, CrudError> {
        let started = Instant::now();
        let result = self.run(ctx).await;
        ctx.settle(&result);

        let input = json!({ "id": self.id, "attributes": self.attributes });
        let entry = write_entry(
            format!("{} {}", self.verb(), ctx.entity()),
            input,
            &result,
            started,
        );
        ExecutionResult::logged(result, entry)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
