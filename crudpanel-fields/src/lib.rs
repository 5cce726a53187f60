//! Field kinds, field definitions and the per-entity field registry
//!
//! `crudpanel-fields` is the schema half of the admin panel: it knows which
//! attributes each kind of form field accepts and validates the fields an
//! entity declares. It holds no entity data.
//!
//! # Architecture
//!
//! - **Data-driven kinds**: one YAML row per kind (`component`, `required`,
//!   `available`, `defaults`), validated once on first use
//! - **Validated on registration**: a `FieldRegistry` never holds a field that
//!   breaks its kind's attribute contract
//! - **Ordered**: registration order is presentation order

pub mod entity;
pub mod error;
pub mod registry;
pub mod schema;
pub mod types;

pub use entity::EntitySchema;
pub use error::{FieldsError, Result};
pub use registry::FieldRegistry;
pub use schema::{FieldKind, KindSchema, KindTable};
pub use types::{FieldDef, FieldView};
