//! Principals, authorization and per-request permission sets

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four CRUD actions permissions are granted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudAction {
    Create,
    Read,
    Update,
    Delete,
}

impl CrudAction {
    pub const ALL: [CrudAction; 4] = [
        CrudAction::Create,
        CrudAction::Read,
        CrudAction::Update,
        CrudAction::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CrudAction::Create => "create",
            CrudAction::Read => "read",
            CrudAction::Update => "update",
            CrudAction::Delete => "delete",
        }
    }
}

impl fmt::Display for CrudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user a request runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: BTreeSet::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Decides whether a principal may perform an action on an entity type.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, principal: &Principal, entity: &str, action: CrudAction) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&Principal, &str, CrudAction) -> bool + Send + Sync,
{
    fn authorize(&self, principal: &Principal, entity: &str, action: CrudAction) -> bool {
        self(principal, entity, action)
    }
}

/// Role-based grants: a principal may do whatever any of its roles may do.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
    grants: HashMap<String, BTreeSet<CrudAction>>,
}

impl RolePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant actions to a role.
    pub fn grant(mut self, role: impl Into<String>, actions: &[CrudAction]) -> Self {
        self.grants
            .entry(role.into())
            .or_default()
            .extend(actions.iter().copied());
        self
    }
}

impl Authorizer for RolePolicy {
    fn authorize(&self, principal: &Principal, _entity: &str, action: CrudAction) -> bool {
        principal.roles.iter().any(|role| {
            self.grants
                .get(role)
                .is_some_and(|actions| actions.contains(&action))
        })
    }
}

/// What the current principal may do with the controller's entity.
///
/// Derived once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl PermissionSet {
    pub fn derive(authorizer: &dyn Authorizer, principal: &Principal, entity: &str) -> Self {
        let allowed = |action| authorizer.authorize(principal, entity, action);
        Self {
            create: allowed(CrudAction::Create),
            read: allowed(CrudAction::Read),
            update: allowed(CrudAction::Update),
            delete: allowed(CrudAction::Delete),
        }
    }

    pub fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    pub fn allows(&self, action: CrudAction) -> bool {
        match action {
            CrudAction::Create => self.create,
            CrudAction::Read => self.read,
            CrudAction::Update => self.update,
            CrudAction::Delete => self.delete,
        }
    }
}
