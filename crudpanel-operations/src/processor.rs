//! Operation processor trait

use async_trait::async_trait;
use serde_json::Value;

use crate::Execute;

/// Runs operations and takes care of whatever happens around them:
/// actor attribution, activity logging, tracing.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + 'static;
}
