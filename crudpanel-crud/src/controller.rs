//! CRUD controller: the collaborators that serve one entity type.

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crudpanel_config::{sections, ConfigSchema, FrameworkDefaults};
use crudpanel_fields::FieldRegistry;
use crudpanel_operations::{Execute, OperationProcessor};

use crate::activity::{ActivityLog, DEFAULT_CAPACITY};
use crate::auth::Authorizer;
use crate::context::{CrudContext, RequestContext};
use crate::crud::{CreateCrud, EditCrud, IndexCrud, StoreCrud, UpdateCrud};
use crate::error::{CrudError, Result};
use crate::processor::CrudOperationProcessor;
use crate::store::{EntityStore, Query};
use crate::types::Record;

/// Builds the public preview URL of a record.
pub type PreviewRoute = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// Serves index, create, edit, update and store for one entity type.
///
/// Built once and shared across requests; every request gets its own
/// `CrudContext`.
pub struct CrudController {
    entity: String,
    fields: FieldRegistry,
    config: Arc<ConfigSchema>,
    store: Arc<dyn EntityStore>,
    authorizer: Arc<dyn Authorizer>,
    preview_route: Option<PreviewRoute>,
    activity: ActivityLog,
}

impl fmt::Debug for CrudController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudController")
            .field("entity", &self.entity)
            .field("fields", &self.fields.len())
            .field("preview_route", &self.preview_route.is_some())
            .field("activity", &self.activity.len())
            .finish()
    }
}

impl CrudController {
    pub fn builder(
        entity: impl Into<String>,
        fields: FieldRegistry,
        store: Arc<dyn EntityStore>,
        authorizer: Arc<dyn Authorizer>,
    ) -> CrudControllerBuilder {
        CrudControllerBuilder {
            entity: entity.into(),
            fields,
            store,
            authorizer,
            defaults: FrameworkDefaults::default(),
            overrides: Vec::new(),
            preview_route: None,
            activity_capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn config(&self) -> &Arc<ConfigSchema> {
        &self.config
    }

    pub fn entity_store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    pub fn authorizer(&self) -> &dyn Authorizer {
        self.authorizer.as_ref()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Preview URL for a record, when the controller declares one.
    pub fn preview_route(&self, record: &Record) -> Option<String> {
        self.preview_route.as_ref().map(|route| route(record))
    }

    /// Base query for this entity with every relation field eager-loaded.
    pub fn query(&self) -> Query {
        self.fields
            .relation_fields()
            .fold(Query::new(&self.entity), |query, field| query.with(&field.id))
    }

    /// Start a request against this controller.
    pub fn context(self: &Arc<Self>, request: RequestContext) -> Result<CrudContext> {
        CrudContext::new(Arc::clone(self), request)
    }

    /// `GET index`
    pub async fn index(self: &Arc<Self>, request: RequestContext) -> Result<Value> {
        self.run(IndexCrud::new(), request).await
    }

    /// `GET create`
    pub async fn create(self: &Arc<Self>, request: RequestContext) -> Result<Value> {
        self.run(CreateCrud::new(), request).await
    }

    /// `GET edit/{id}`
    pub async fn edit(self: &Arc<Self>, request: RequestContext) -> Result<Value> {
        let operation = EditCrud::from_request(&request)?;
        self.run(operation, request).await
    }

    /// `PUT update/{id}`
    pub async fn update(self: &Arc<Self>, request: RequestContext) -> Result<Value> {
        let operation = UpdateCrud::from_request(&request)?;
        self.run(operation, request).await
    }

    /// `POST store`
    pub async fn store(self: &Arc<Self>, request: RequestContext) -> Result<Value> {
        let operation = StoreCrud::from_request(&request);
        self.run(operation, request).await
    }

    async fn run<O>(self: &Arc<Self>, operation: O, request: RequestContext) -> Result<Value>
    where
        O: Execute<CrudContext, CrudError> + 'static,
    {
        let ctx = self.context(request)?;
        CrudOperationProcessor::new().process(&operation, &ctx).await
    }
}

/// Builder for `CrudController`. Created by `CrudController::builder()`.
pub struct CrudControllerBuilder {
    entity: String,
    fields: FieldRegistry,
    store: Arc<dyn EntityStore>,
    authorizer: Arc<dyn Authorizer>,
    defaults: FrameworkDefaults,
    overrides: Vec<(String, Value)>,
    preview_route: Option<PreviewRoute>,
    activity_capacity: usize,
}

impl CrudControllerBuilder {
    /// Framework defaults underneath this controller's configuration.
    pub fn defaults(mut self, defaults: FrameworkDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Controller-level override for a configuration section.
    pub fn config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    pub fn preview_route<F>(mut self, route: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.preview_route = Some(Arc::new(route));
        self
    }

    /// Number of activity log entries kept before the oldest are evicted.
    pub fn activity_capacity(mut self, capacity: usize) -> Self {
        self.activity_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<CrudController> {
        let form = json!({ "fields": serde_json::to_value(self.fields.views())? });
        let config = self
            .overrides
            .into_iter()
            .fold(
                ConfigSchema::builder(&self.entity, &self.defaults).derived(sections::FORM, form),
                |builder, (key, value)| builder.set(key, value),
            )
            .build();

        debug!(
            entity = %self.entity,
            fields = self.fields.len(),
            preview = self.preview_route.is_some(),
            "crud controller built"
        );

        Ok(CrudController {
            entity: self.entity,
            fields: self.fields,
            config: Arc::new(config),
            store: self.store,
            authorizer: self.authorizer,
            preview_route: self.preview_route,
            activity: ActivityLog::with_capacity(self.activity_capacity),
        })
    }
}
