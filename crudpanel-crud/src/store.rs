//! Persistence boundary.
//!
//! The ORM behind a controller is reached only through `EntityStore`. The
//! controller supplies the entity type, the id and the attribute bag; the
//! store owns ordering and durability.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::trace;

use crate::error::{CrudError, Result};
use crate::types::{Attributes, EntityId, Record};

/// A fetch query: the entity type plus relations to eager-load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub entity: String,
    pub with: Vec<String>,
}

impl Query {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            with: Vec::new(),
        }
    }

    /// Eager-load a relation.
    pub fn with(mut self, relation: impl Into<String>) -> Self {
        self.with.push(relation.into());
        self
    }
}

/// Entity persistence used by CRUD controllers.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fetch one entity; `None` when the id does not exist.
    async fn find(&self, query: &Query, id: EntityId) -> Result<Option<Record>>;

    /// Persist a new entity and return it with its assigned id.
    async fn create(&self, entity: &str, attributes: Attributes) -> Result<Record>;

    /// Apply attributes to an existing entity; `None` when the id does not exist.
    async fn update(&self, entity: &str, id: EntityId, attributes: Attributes)
        -> Result<Option<Record>>;

    /// Greatest id less than `id`.
    async fn previous_id(&self, entity: &str, id: EntityId) -> Result<Option<EntityId>>;

    /// Least id greater than `id`.
    async fn next_id(&self, entity: &str, id: EntityId) -> Result<Option<EntityId>>;

    /// Media attached to a media field of an entity.
    async fn load_media(&self, _entity: &str, _id: EntityId, _field: &str) -> Result<Value> {
        Ok(Value::Array(Vec::new()))
    }
}

#[derive(Debug, Clone, Default)]
struct Row {
    attributes: Attributes,
    relations: Map<String, Value>,
    media: Map<String, Value>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<EntityId, Row>,
    last_id: u64,
}

impl Table {
    fn record(&self, id: EntityId, row: &Row, with: &[String]) -> Record {
        let mut record = Record::new(id, row.attributes.clone());
        for relation in with {
            let value = row.relations.get(relation).cloned().unwrap_or(Value::Null);
            record.relations.insert(relation.clone(), value);
        }
        record
    }
}

/// In-memory `EntityStore`, one ordered table per entity type.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row under an explicit id, replacing any existing row.
    pub async fn insert(&self, entity: &str, id: EntityId, attributes: Attributes) {
        let mut tables = self.tables.write().await;
        let table = tables.entry(entity.to_string()).or_default();
        table.last_id = table.last_id.max(id.0);
        table.rows.insert(
            id,
            Row {
                attributes: without_id(attributes),
                ..Row::default()
            },
        );
    }

    /// Store the value a relation resolves to for one row.
    pub async fn relate(&self, entity: &str, id: EntityId, relation: &str, value: Value) -> Result<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(entity)
            .and_then(|t| t.rows.get_mut(&id))
            .ok_or_else(|| CrudError::not_found(entity, id))?;
        row.relations.insert(relation.to_string(), value);
        Ok(())
    }

    /// Attach media to a media field of one row.
    pub async fn attach_media(&self, entity: &str, id: EntityId, field: &str, value: Value) -> Result<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(entity)
            .and_then(|t| t.rows.get_mut(&id))
            .ok_or_else(|| CrudError::not_found(entity, id))?;
        row.media.insert(field.to_string(), value);
        Ok(())
    }

    pub async fn count(&self, entity: &str) -> usize {
        self.tables
            .read()
            .await
            .get(entity)
            .map_or(0, |t| t.rows.len())
    }
}

/// The id is owned by the store; request payloads cannot set it.
fn without_id(mut attributes: Attributes) -> Attributes {
    attributes.remove("id");
    attributes
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find(&self, query: &Query, id: EntityId) -> Result<Option<Record>> {
        let tables = self.tables.read().await;
        let record = tables
            .get(&query.entity)
            .and_then(|t| t.rows.get(&id).map(|row| t.record(id, row, &query.with)));
        trace!(entity = %query.entity, %id, found = record.is_some(), "find");
        Ok(record)
    }

    async fn create(&self, entity: &str, attributes: Attributes) -> Result<Record> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(entity.to_string()).or_default();
        table.last_id += 1;
        let id = EntityId(table.last_id);
        let row = Row {
            attributes: without_id(attributes),
            ..Row::default()
        };
        let record = table.record(id, &row, &[]);
        table.rows.insert(id, row);
        Ok(record)
    }

    async fn update(
        &self,
        entity: &str,
        id: EntityId,
        attributes: Attributes,
    ) -> Result<Option<Record>> {
        let mut tables = self.tables.write().await;
        let Some(table) = tables.get_mut(entity) else {
            return Ok(None);
        };
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.attributes.extend(without_id(attributes));
        let row = row.clone();
        Ok(Some(table.record(id, &row, &[])))
    }

    async fn previous_id(&self, entity: &str, id: EntityId) -> Result<Option<EntityId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(entity)
            .and_then(|t| t.rows.range(..id).next_back().map(|(k, _)| *k)))
    }

    async fn next_id(&self, entity: &str, id: EntityId) -> Result<Option<EntityId>> {
        let tables = self.tables.read().await;
        Ok(tables.get(entity).and_then(|t| {
            t.rows
                .range((Bound::Excluded(id), Bound::Unbounded))
                .next()
                .map(|(k, _)| *k)
        }))
    }

    async fn load_media(&self, entity: &str, id: EntityId, field: &str) -> Result<Value> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(entity)
            .and_then(|t| t.rows.get(&id))
            .and_then(|row| row.media.get(field).cloned())
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }
}
