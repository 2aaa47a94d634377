// src/api/requests.rs
//! Bodies of the write and query endpoints.
//!
//! These are separate from the entity types so a request can never carry
//! server-assigned fields such as ids or timestamps.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::model::{BlockContent, DatabaseParent, PageParent, PropertySchema, PropertyValue};
use crate::types::RichText;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    #[derive(Default)]
    pub enum Direction {
        #[default]
        Ascending => "ascending",
        Descending => "descending",
    }
}

string_enum! {
    pub enum SortTimestamp {
        CreatedTime => "created_time",
        LastEditedTime => "last_edited_time",
    }
}

/// One database query ordering, by property name or by timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<SortTimestamp>,
    pub direction: Direction,
}

impl Sort {
    pub fn property(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: Some(name.into()),
            timestamp: None,
            direction,
        }
    }

    pub fn timestamp(timestamp: SortTimestamp, direction: Direction) -> Self {
        Self {
            property: None,
            timestamp: Some(timestamp),
            direction,
        }
    }

    /// Parses `name` or `name:direction` as accepted on the command line.
    pub fn parse_property(spec: &str) -> Result<Self, crate::types::UnknownEnumValue> {
        match spec.rsplit_once(':') {
            Some((name, direction)) => Ok(Self::property(name, direction.parse()?)),
            None => Ok(Self::property(spec, Direction::Ascending)),
        }
    }
}

/// Body of `POST /v1/databases/{id}/query`.
///
/// `filter` is passed through untouched; the filter language is not modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDatabaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Vec<Sort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    pub page_size: u32,
}

impl Default for QueryDatabaseRequest {
    fn default() -> Self {
        Self {
            filter: None,
            sorts: None,
            start_cursor: None,
            page_size: NOTION_API_PAGE_SIZE,
        }
    }
}

impl QueryDatabaseRequest {
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.get_or_insert_with(Vec::new).push(sort);
        self
    }
}

string_enum! {
    pub enum SearchObjectKind {
        Page => "page",
        Database => "database",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum SearchFilterProperty {
        #[default]
        Object => "object",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum SearchTimestamp {
        #[default]
        LastEditedTime => "last_edited_time",
    }
}

/// Restricts a search to pages or to databases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub value: SearchObjectKind,
    #[serde(default)]
    pub property: SearchFilterProperty,
}

impl SearchFilter {
    pub fn only(value: SearchObjectKind) -> Self {
        Self {
            value,
            property: SearchFilterProperty::Object,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchSort {
    pub direction: Direction,
    pub timestamp: SearchTimestamp,
}

/// Body of `POST /v1/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    #[serde(default)]
    pub sort: SearchSort,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    pub page_size: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: None,
            filter: None,
            sort: SearchSort::default(),
            start_cursor: None,
            page_size: NOTION_API_PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    pub fn query(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Body of `POST /v1/pages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    pub parent: PageParent,
    pub properties: IndexMap<String, PropertyValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockContent>,
}

impl CreatePageRequest {
    pub fn new(parent: PageParent) -> Self {
        Self {
            parent,
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_child(mut self, block: BlockContent) -> Self {
        self.children.push(block);
        self
    }
}

/// Body of `PATCH /v1/pages/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UpdatePageRequest {
    pub properties: IndexMap<String, PropertyValue>,
    pub archived: bool,
}

impl UpdatePageRequest {
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn archive(mut self) -> Self {
        self.archived = true;
        self
    }
}

/// Body of `POST /v1/databases`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDatabaseRequest {
    pub parent: DatabaseParent,
    pub title: Vec<RichText>,
    pub properties: IndexMap<String, PropertySchema>,
}

impl CreateDatabaseRequest {
    pub fn new(parent: DatabaseParent, title: impl Into<String>) -> Self {
        Self {
            parent,
            title: vec![RichText::plain(title)],
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }
}
