//! Per-request state handed to every CRUD operation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::json;
use tracing::{debug, warn};

use crudpanel_config::{sections, RequestConfig};

use crate::auth::{CrudAction, PermissionSet, Principal};
use crate::controller::CrudController;
use crate::error::{CrudError, Result};
use crate::lifecycle::{Lifecycle, RequestState};
use crate::types::{Attributes, EntityId};

/// What the web layer knows about an incoming request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub principal: Principal,
    /// Route parameters, e.g. `id`.
    pub params: HashMap<String, String>,
    /// Request body attributes.
    pub input: Attributes,
}

impl RequestContext {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            params: HashMap::new(),
            input: Attributes::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_input(mut self, input: Attributes) -> Self {
        self.input = input;
        self
    }

    /// The `id` route parameter.
    pub fn id(&self) -> Result<EntityId> {
        let raw = self
            .params
            .get("id")
            .ok_or_else(|| CrudError::invalid_parameter("id", "missing"))?;
        raw.parse()
            .map_err(|e: std::num::ParseIntError| CrudError::invalid_parameter("id", e.to_string()))
    }
}

/// One request against a `CrudController`.
///
/// Holds the permission set derived for the principal, the request-scoped
/// configuration cache and the lifecycle state. Dropped when the request ends.
#[derive(Debug)]
pub struct CrudContext {
    controller: Arc<CrudController>,
    request: RequestContext,
    permissions: PermissionSet,
    config: RequestConfig,
    lifecycle: Mutex<Lifecycle>,
}

impl CrudContext {
    pub fn new(controller: Arc<CrudController>, request: RequestContext) -> Result<Self> {
        let permissions = PermissionSet::derive(
            controller.authorizer(),
            &request.principal,
            controller.entity(),
        );
        let config = RequestConfig::new(Arc::clone(controller.config()))
            .with_override(sections::PERMISSIONS, json!(permissions))?;

        debug!(
            entity = %controller.entity(),
            principal = %request.principal.id,
            ?permissions,
            "request received"
        );

        Ok(Self {
            controller,
            request,
            permissions,
            config,
            lifecycle: Mutex::new(Lifecycle::new()),
        })
    }

    pub fn controller(&self) -> &CrudController {
        &self.controller
    }

    pub fn entity(&self) -> &str {
        self.controller.entity()
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    pub fn principal(&self) -> &Principal {
        &self.request.principal
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Require a permission and move to `Authorized`.
    pub fn authorize(&self, action: CrudAction) -> Result<()> {
        if !self.permissions.allows(action) {
            return Err(CrudError::unauthorized(self.entity(), action));
        }
        self.advance(RequestState::Authorized)
    }

    pub fn advance(&self, state: RequestState) -> Result<()> {
        self.lifecycle().advance(state)
    }

    pub fn state(&self) -> RequestState {
        self.lifecycle().state()
    }

    pub fn history(&self) -> Vec<RequestState> {
        self.lifecycle().history().to_vec()
    }

    /// Record the outcome of the request; errors move it to `Failed`.
    pub fn settle<T>(&self, result: &Result<T>) {
        if let Err(error) = result {
            warn!(
                entity = %self.entity(),
                state = %self.state(),
                status = %error.status(),
                "request failed: {error}"
            );
            self.lifecycle().fail();
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }
}
