//! View descriptors for crudpanel
//!
//! Controllers do not render. Each view-producing operation returns a
//! `ViewDescriptor` naming a frontend component and the props it is given;
//! an external renderer turns that into a page. Descriptors are checked
//! against the component's declared props before they leave the core.

pub mod component;
pub mod descriptor;
pub mod error;

pub use component::{Component, StaticComponent, CRUD_INDEX, CRUD_PREVIEW, CRUD_SHOW};
pub use descriptor::ViewDescriptor;
pub use error::{Result, ViewError};
