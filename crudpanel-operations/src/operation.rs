//! Operation metadata and execution traits

use async_trait::async_trait;
use serde_json::Value;

use crate::ExecutionResult;

/// Metadata every operation carries.
pub trait Operation {
    /// Action word, e.g. "edit"
    fn verb(&self) -> &'static str;

    /// Resource the action applies to, e.g. "crud"
    fn noun(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Canonical op string used in log entries, "{verb} {noun}".
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context.
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// Ids of the resources touched by a successful execution.
    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        Vec::new()
    }
}
