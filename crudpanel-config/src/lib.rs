//! Controller configuration for crudpanel
//!
//! Every CRUD controller reads its settings through named sections such as
//! `form`, `names`, `permissions` or `perPage`. This crate merges the layers
//! those sections come from and caches the result per request.
//!
//! # Precedence
//!
//! Highest first:
//!
//! 1. Per-request overrides (the permission set of the current principal)
//! 2. Explicit controller overrides
//! 3. Values derived from the entity type (`names`, `route_prefix`)
//! 4. Framework defaults, loaded with Figment from built-ins, an optional
//!    `crudpanel.{toml,yaml,json}` file and `CRUDPANEL_*` environment variables
//!
//! Scalars come from the first layer that sets them; object sections are
//! shallow-merged.
//!
//! ```
//! use std::sync::Arc;
//! use crudpanel_config::{sections, ConfigSchema, FrameworkDefaults, RequestConfig};
//!
//! let schema = ConfigSchema::builder("BlogPost", &FrameworkDefaults::default())
//!     .set(sections::PER_PAGE, 50)
//!     .build();
//! let config = RequestConfig::new(Arc::new(schema));
//! let section = config.get(&[sections::PER_PAGE, sections::ROUTE_PREFIX])?;
//! assert_eq!(section["perPage"], 50);
//! assert_eq!(section["route_prefix"], "admin/blog-posts");
//! # Ok::<(), crudpanel_config::ConfigError>(())
//! ```

pub mod defaults;
pub mod error;
pub mod names;
pub mod provider;
pub mod resolver;

pub use defaults::{sections, FrameworkDefaults};
pub use error::{ConfigError, Result};
pub use names::EntityNames;
pub use provider::ConfigProvider;
pub use resolver::{ConfigSchema, ConfigSchemaBuilder, RequestConfig, Section};
