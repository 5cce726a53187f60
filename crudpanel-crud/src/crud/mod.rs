//! The five controller operations.
//!
//! Reads (`index`, `create`, `edit`) assemble a view descriptor and are not
//! logged. Writes (`update`, `store`) persist through the entity store and
//! return a logged result carrying the request input and the outcome.

mod create;
mod edit;
mod index;
mod store;
mod update;

pub use create::CreateCrud;
pub use edit::EditCrud;
pub use index::IndexCrud;
pub use store::StoreCrud;
pub use update::UpdateCrud;

use std::time::Instant;

use serde_json::{json, Map, Value};

use crudpanel_config::Section;
use crudpanel_operations::LogEntry;

use crate::error::Result;

/// Resolved sections as the `config` prop, with the container flag exposed
/// as `expand`.
fn config_prop(section: Section, expand_key: Option<&str>) -> Map<String, Value> {
    let expand = expand_key
        .and_then(|key| section.get(key))
        .cloned()
        .unwrap_or(Value::Bool(false));
    let mut config: Map<String, Value> = section.into_iter().collect();
    if expand_key.is_some() {
        config.insert("expand".to_string(), expand);
    }
    config
}

/// Log entry for a write, with the outcome rendered as output.
fn write_entry(op: String, input: Value, result: &Result<Value>, started: Instant) -> LogEntry {
    let output = match result {
        Ok(value) => value.clone(),
        Err(error) => json!({ "error": error.to_string() }),
    };
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    LogEntry::new(op, input, output, None, duration_ms)
}
