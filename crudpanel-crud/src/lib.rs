//! # crudpanel CRUD controllers
//!
//! A `CrudController` serves the admin pages of one entity type. It holds
//! the entity's `FieldRegistry`, its layered configuration schema, an
//! `EntityStore` and an `Authorizer`. Each request gets a `CrudContext`
//! carrying the principal's permission set, a request-scoped configuration
//! cache and the request lifecycle state.
//!
//! | Route | Operation | Permission |
//! |-------|-----------|------------|
//! | `GET index` | `IndexCrud` | read |
//! | `GET create` | `CreateCrud` | create |
//! | `GET edit/{id}` | `EditCrud` | read |
//! | `PUT update/{id}` | `UpdateCrud` | update |
//! | `POST store` | `StoreCrud` | create |
//!
//! ```no_run
//! use std::sync::Arc;
//! use crudpanel_crud::{CrudAction, CrudController, MemoryStore, Principal, RequestContext, RolePolicy};
//! use crudpanel_fields::{FieldDef, FieldKind, FieldRegistry};
//!
//! # async fn demo() -> crudpanel_crud::Result<()> {
//! let fields = FieldRegistry::from_fields([
//!     FieldDef::new("title", FieldKind::Input).with("title", "Title"),
//! ])?;
//! let policy = RolePolicy::new().grant("editor", &CrudAction::ALL);
//! let controller = Arc::new(
//!     CrudController::builder("post", fields, Arc::new(MemoryStore::new()), Arc::new(policy))
//!         .build()?,
//! );
//!
//! let principal = Principal::new("alice").with_role("editor");
//! let view = controller.edit(RequestContext::new(principal).with_param("id", "1")).await?;
//! println!("{view}");
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod auth;
pub mod context;
pub mod controller;
pub mod crud;
pub mod error;
pub mod lifecycle;
pub mod processor;
pub mod store;
pub mod types;

pub use activity::ActivityLog;
pub use auth::{Authorizer, CrudAction, PermissionSet, Principal, RolePolicy};
pub use context::{CrudContext, RequestContext};
pub use controller::{CrudController, CrudControllerBuilder, PreviewRoute};
pub use crud::{CreateCrud, EditCrud, IndexCrud, StoreCrud, UpdateCrud};
pub use error::{CrudError, Result};
pub use lifecycle::{Lifecycle, RequestState};
pub use processor::CrudOperationProcessor;
pub use store::{EntityStore, MemoryStore, Query};
pub use types::{Attributes, EntityId, Record};
