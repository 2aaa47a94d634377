//! Typed Notion entities.
//!
//! Everything here decodes from and encodes back to the service's wire JSON.
//! Decoding is strict: unknown discriminants and malformed payloads fail the
//! whole entity instead of being skipped.

mod block;
mod parent;
mod properties;
mod property_value;

pub use block::*;
pub use parent::*;
pub use properties::*;
pub use property_value::*;

use crate::types::{plain_text, DatabaseId, FileObject, Icon, PageId, RichText, Timestamp};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Collapses a typed value into a plain JSON value for reporting.
pub trait Reduce {
    fn reduce_to_scalar(&self) -> Value;
}

/// The `{}` payload of kinds that carry no configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Empty {}

string_enum! {
    #[derive(Default)]
    pub enum PageObject {
        #[default]
        Page => "page",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum DatabaseObject {
        #[default]
        Database => "database",
    }
}

/// A Notion page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub object: PageObject,
    pub id: PageId,
    pub created_time: Timestamp,
    pub last_edited_time: Timestamp,
    pub archived: bool,
    pub icon: Option<Icon>,
    pub cover: Option<FileObject>,
    pub parent: PageParent,
    /// Properties in the order the service sent them.
    pub properties: IndexMap<String, PageProperty>,
    pub url: String,
}

impl Page {
    /// The plain text of the page's title property, or `""` if it has none.
    pub fn title(&self) -> String {
        self.properties
            .values()
            .find_map(|property| match &property.value {
                PropertyValue::Title { title } => Some(plain_text(title)),
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// A Notion database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub object: DatabaseObject,
    pub id: DatabaseId,
    pub created_time: Timestamp,
    pub last_edited_time: Timestamp,
    pub title: Vec<RichText>,
    pub parent: DatabaseParent,
    pub properties: IndexMap<String, DatabaseProperty>,
}

impl Database {
    /// The concatenated title, `""` for an untitled database.
    pub fn plain_title(&self) -> String {
        plain_text(&self.title)
    }
}

/// Any top-level object the service can return.
///
/// Decoding goes through `api::parse_notion_object`, which dispatches on the
/// `object` field; encoding writes the inner entity unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NotionObject {
    Page(Page),
    Database(Database),
    Block(Block),
}

impl NotionObject {
    pub fn id(&self) -> Uuid {
        match self {
            NotionObject::Page(page) => *page.id.as_uuid(),
            NotionObject::Database(database) => *database.id.as_uuid(),
            NotionObject::Block(block) => *block.id.as_uuid(),
        }
    }

    pub fn object_type_name(&self) -> &'static str {
        match self {
            NotionObject::Page(_) => "page",
            NotionObject::Database(_) => "database",
            NotionObject::Block(_) => "block",
        }
    }
}
