//! Where an entity lives.
//!
//! Each entity kind accepts a different set of parents, so each gets its own
//! union rather than sharing one wide enum.

use crate::model::Reduce;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use crate::types::{DatabaseId, PageId};

/// Parent of a page: another page or a database row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageParent {
    PageId { page_id: PageId },
    DatabaseId { database_id: DatabaseId },
}

/// Parent of a database: a page or the workspace root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatabaseParent {
    PageId { page_id: PageId },
    Workspace { workspace: True },
}

impl PageParent {
    pub fn type_name(&self) -> &'static str {
        match self {
            PageParent::PageId { .. } => "page_id",
            PageParent::DatabaseId { .. } => "database_id",
        }
    }
}

impl DatabaseParent {
    pub fn workspace() -> Self {
        DatabaseParent::Workspace { workspace: True }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DatabaseParent::PageId { .. } => "page_id",
            DatabaseParent::Workspace { .. } => "workspace",
        }
    }
}

impl Reduce for PageParent {
    fn reduce_to_scalar(&self) -> Value {
        match self {
            PageParent::PageId { page_id } => json!(page_id.to_string()),
            PageParent::DatabaseId { database_id } => json!(database_id.to_string()),
        }
    }
}

impl Reduce for DatabaseParent {
    fn reduce_to_scalar(&self) -> Value {
        match self {
            DatabaseParent::PageId { page_id } => json!(page_id.to_string()),
            DatabaseParent::Workspace { .. } => Value::Bool(true),
        }
    }
}

/// The literal `true`; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct True;

impl Serialize for True {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for True {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if bool::deserialize(deserializer)? {
            Ok(True)
        } else {
            Err(serde::de::Error::custom("expected `true`"))
        }
    }
}
