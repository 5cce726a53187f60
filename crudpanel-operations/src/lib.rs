//! # crudpanel operations
//!
//! Every controller action is an operation: a struct whose fields are the
//! request parameters, with `Operation` metadata and an `Execute`
//! implementation against a context.
//!
//! ```ignore
//! use crudpanel_operations::*;
//!
//! pub struct EditCrud {
//!     pub id: EntityId,
//! }
//!
//! impl Operation for EditCrud {
//!     fn verb(&self) -> &'static str { "edit" }
//!     fn noun(&self) -> &'static str { "crud" }
//!     fn description(&self) -> &'static str { "Render the edit view" }
//! }
//!
//! #[async_trait]
//! impl Execute<CrudContext, CrudError> for EditCrud {
//!     async fn execute(&self, ctx: &CrudContext) -> ExecutionResult<Value, CrudError> {
//!         // reads return ExecutionResult::Unlogged, writes ExecutionResult::Logged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
