// src/flatten.rs
//! Reduced projection of pages and databases.
//!
//! Properties are keyed by an identifier-friendly form of their name and
//! their values collapsed with [`Reduce`], so the output is easy to feed into
//! templates or `jq`.

use crate::error::AppError;
use crate::model::{Database, Page, Reduce};
use crate::types::{DatabaseId, PageId};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

lazy_static! {
    static ref NON_IDENTIFIER: Regex = Regex::new(r"[^0-9a-z]+").expect("Invalid regex pattern");
}

/// Lowercases `name` and collapses every run of other characters to `_`.
///
/// A leading `_` is added when the result would not start with a letter.
pub fn keyify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let replaced = NON_IDENTIFIER.replace_all(&lowered, "_");
    if replaced.starts_with(|c: char| c.is_ascii_lowercase()) {
        replaced.into_owned()
    } else {
        format!("_{}", replaced)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatProperty {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatPage {
    pub object: &'static str,
    pub id: PageId,
    pub created_time: String,
    pub last_edited_time: String,
    pub archived: bool,
    pub title: String,
    pub properties: IndexMap<String, FlatProperty>,
    pub parent: Value,
    pub parent_type: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatDatabase {
    pub object: &'static str,
    pub id: DatabaseId,
    pub created_time: String,
    pub last_edited_time: String,
    pub title: String,
    pub properties: IndexMap<String, FlatProperty>,
    pub parent: Value,
    pub parent_type: &'static str,
}

fn flat_property(name: &str, kind: &'static str, value: Value) -> (String, FlatProperty) {
    let key = keyify(name);
    let property = FlatProperty {
        key: key.clone(),
        name: name.to_string(),
        kind,
        value,
    };
    (key, property)
}

pub fn flatten_page(page: &Page) -> FlatPage {
    FlatPage {
        object: "page",
        id: page.id,
        created_time: page.created_time.to_rfc3339(),
        last_edited_time: page.last_edited_time.to_rfc3339(),
        archived: page.archived,
        title: page.title(),
        properties: page
            .properties
            .iter()
            .map(|(name, property)| {
                flat_property(name, property.value.type_name(), property.reduce_to_scalar())
            })
            .collect(),
        parent: page.parent.reduce_to_scalar(),
        parent_type: page.parent.type_name(),
        url: page.url.clone(),
    }
}

pub fn flatten_database(database: &Database) -> FlatDatabase {
    FlatDatabase {
        object: "database",
        id: database.id,
        created_time: database.created_time.to_rfc3339(),
        last_edited_time: database.last_edited_time.to_rfc3339(),
        title: database.plain_title(),
        properties: database
            .properties
            .iter()
            .map(|(name, property)| {
                flat_property(name, property.schema.type_name(), property.reduce_to_scalar())
            })
            .collect(),
        parent: database.parent.reduce_to_scalar(),
        parent_type: database.parent.type_name(),
    }
}

impl FlatPage {
    pub fn into_value(self) -> Result<Value, AppError> {
        serde_json::to_value(self).map_err(AppError::Encode)
    }
}

impl FlatDatabase {
    pub fn into_value(self) -> Result<Value, AppError> {
        serde_json::to_value(self).map_err(AppError::Encode)
    }
}
