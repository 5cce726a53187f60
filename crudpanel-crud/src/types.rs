//! Entity ids and records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute bag of an entity row.
pub type Attributes = Map<String, Value>;

/// Primary key of a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(EntityId)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

/// A persisted entity as the store returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: EntityId,
    #[serde(flatten)]
    pub attributes: Attributes,
    /// Eager-loaded relations, keyed by relation field id.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub relations: Map<String, Value>,
    /// Media attached for media fields, keyed by field id.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub media: Map<String, Value>,
}

impl Record {
    pub fn new(id: EntityId, attributes: Attributes) -> Self {
        Self {
            id,
            attributes,
            relations: Map::new(),
            media: Map::new(),
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }
}
