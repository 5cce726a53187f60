//! Operation processor for CRUD requests

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crudpanel_operations::{Execute, OperationProcessor};

use crate::context::CrudContext;
use crate::error::CrudError;

/// Runs CRUD operations and appends the log entries of mutating ones to the
/// controller's activity log, attributed to the request principal.
#[derive(Debug, Default, Clone)]
pub struct CrudOperationProcessor {
    actor: Option<String>,
}

impl CrudOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute entries to a fixed actor instead of the request principal.
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

#[async_trait]
impl OperationProcessor<CrudContext, CrudError> for CrudOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &CrudContext) -> Result<Value, CrudError>
    where
        O: Execute<CrudContext, CrudError> + 'static,
    {
        let executed = operation.execute(ctx).await;
        if !executed.should_log() {
            return executed.into_result();
        }

        let (result, log_entry) = executed.split();
        if let Some(entry) = log_entry {
            let actor = self
                .actor
                .clone()
                .unwrap_or_else(|| ctx.principal().id.clone());
            let entry = entry.with_actor(actor);
            let affected = result
                .as_ref()
                .map(|value| operation.affected_resource_ids(value))
                .unwrap_or_default();
            info!(
                operation = %operation.op_string(),
                op = %entry.op,
                actor = entry.actor.as_deref().unwrap_or_default(),
                ok = result.is_ok(),
                ?affected,
                duration_ms = entry.duration_ms,
                "operation logged"
            );
            ctx.controller().activity().record(entry);
        }

        result
    }
}
