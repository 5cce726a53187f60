//! Component prop contracts.
//!
//! The renderer owns the components; this side only knows their names and
//! the props each one accepts.

/// A frontend component the core can target.
pub trait Component {
    fn name(&self) -> &str;

    /// Props the component accepts.
    fn props(&self) -> &[&str];

    fn has_prop(&self, name: &str) -> bool {
        self.props().contains(&name)
    }
}

/// A component declared as a static name plus prop list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticComponent {
    pub name: &'static str,
    pub props: &'static [&'static str],
}

impl Component for StaticComponent {
    fn name(&self) -> &str {
        self.name
    }

    fn props(&self) -> &[&str] {
        self.props
    }
}

/// List view of a CRUD entity.
pub const CRUD_INDEX: StaticComponent = StaticComponent {
    name: "crud-index",
    props: &["config", "headerComponents"],
};

/// Create and edit form of a CRUD entity.
pub const CRUD_SHOW: StaticComponent = StaticComponent {
    name: "crud-show",
    props: &[
        "crud-model",
        "config",
        "backRoute",
        "nearItems",
        "headerComponents",
        "controls",
    ],
};

/// Header component linking to the public preview of an entity.
pub const CRUD_PREVIEW: StaticComponent = StaticComponent {
    name: "crud-preview",
    props: &["route"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_prop_checks_declared_props() {
        assert!(CRUD_SHOW.has_prop("nearItems"));
        assert!(CRUD_INDEX.has_prop("config"));
        assert!(!CRUD_INDEX.has_prop("nearItems"));
        assert!(!CRUD_PREVIEW.has_prop("config"));
    }
}
