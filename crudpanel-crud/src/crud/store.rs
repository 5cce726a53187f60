use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crudpanel_operations::{Execute, ExecutionResult, Operation};

use crate::auth::CrudAction;
use crate::context::{CrudContext, RequestContext};
use crate::error::{CrudError, Result};
use crate::lifecycle::RequestState;
use crate::types::Attributes;

use super::write_entry;

/// Persist a new entity built from request attributes.
#[derive(Debug, Clone, Default)]
pub struct StoreCrud {
    pub attributes: Attributes,
}

impl StoreCrud {
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    pub fn from_request(request: &RequestContext) -> Self {
        Self::new(request.input.clone())
    }

    async fn run(&self, ctx: &CrudContext) -> Result<Value> {
        ctx.authorize(CrudAction::Create)?;

        let record = ctx
            .controller()
            .entity_store()
            .create(ctx.entity(), self.attributes.clone())
            .await?;
        ctx.advance(RequestState::Executed)?;

        let value = serde_json::to_value(&record)?;
        ctx.advance(RequestState::Rendered)?;
        debug!(entity = %ctx.entity(), id = %record.id, "entity stored");
        Ok(value)
    }
}

impl Operation for StoreCrud {
    fn verb(&self) -> &'static str {
        "store"
    }

    fn noun(&self) -> &'static str {
        "crud"
    }

    fn description(&self) -> &'static str {
        "Persist a new entity from request attributes"
    }
}

#[async_trait]
impl Execute<CrudContext, CrudError> for StoreCrud {
    async fn execute(&self, ctx: &CrudContext) -> ExecutionResult<Value, CrudError> {
        let started = Instant::now();
        let result = self.run(ctx).await;
        ctx.settle(&result);

        let entry = write_entry(
            format!("{} {}", self.verb(), ctx.entity()),
            Value::Object(self.attributes.clone()),
            &result,
            started,
        );
        ExecutionResult::logged(result, entry)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result
            .get("id")
            .map(|id| vec![id.to_string()])
            .unwrap_or_default()
    }
}
