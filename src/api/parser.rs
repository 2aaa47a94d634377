// src/api/parser.rs
//! Turning response bodies into typed values.
//!
//! Every decode failure is reported with the JSON path where it happened and
//! a short excerpt of the offending value.

use super::responses::{ErrorBody, ListEnvelope, SearchResult};
use crate::error::{preview, AppError, NotionErrorCode};
use crate::model::{Block, Database, NotionObject, Page};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::{Path, Segment};

lazy_static! {
    static ref UNKNOWN_VARIANT: Regex =
        Regex::new(r"^unknown variant `([^`]*)`").expect("Invalid regex pattern");
    static ref UNKNOWN_ENUM_VALUE: Regex =
        Regex::new(r"^unknown enum value `([^`]*)` for (\w+)").expect("Invalid regex pattern");
}

/// Parses a response body into JSON without interpreting it.
pub fn parse_body(body: &str) -> Result<Value, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::Decode {
        message: e.to_string(),
        path: ".".to_string(),
        fragment: preview(body),
    })
}

/// Decodes `value` into `T`, tracking the path of any failure.
///
/// `prefix` names where `value` sits in the larger response, e.g.
/// `results[3]`; it is prepended to the reported path.
pub fn decode_value<T>(value: &Value, prefix: &str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = render_path(prefix, err.path().iter());
        let fragment = preview(&fragment_at(value, err.path()).to_string());
        classify(err.inner().to_string(), path, fragment)
    })
}

fn classify(message: String, path: String, fragment: String) -> AppError {
    if let Some(captures) = UNKNOWN_VARIANT.captures(&message) {
        return AppError::UnknownVariant {
            tag: captures[1].to_string(),
            path,
            fragment,
        };
    }
    if let Some(captures) = UNKNOWN_ENUM_VALUE.captures(&message) {
        return AppError::UnknownEnumValue {
            kind: captures[2].to_string(),
            value: captures[1].to_string(),
            path,
        };
    }
    AppError::Decode {
        message,
        path,
        fragment,
    }
}

fn render_path<'a>(prefix: &str, segments: impl Iterator<Item = &'a Segment>) -> String {
    let mut rendered = prefix.to_string();
    for segment in segments {
        match segment {
            Segment::Seq { index } => rendered.push_str(&format!("[{}]", index)),
            Segment::Map { key } => push_key(&mut rendered, key),
            Segment::Enum { variant } => push_key(&mut rendered, variant),
            Segment::Unknown => push_key(&mut rendered, "?"),
        }
    }
    if rendered.is_empty() {
        ".".to_string()
    } else {
        rendered
    }
}

fn push_key(rendered: &mut String, key: &str) {
    if !rendered.is_empty() {
        rendered.push('.');
    }
    rendered.push_str(key);
}

/// The deepest node of `value` that `path` still resolves to.
fn fragment_at<'a>(value: &'a Value, path: &Path) -> &'a Value {
    let mut node = value;
    for segment in path.iter() {
        let next = match segment {
            Segment::Seq { index } => node.get(*index),
            Segment::Map { key } => node.get(key.as_str()),
            _ => None,
        };
        match next {
            Some(child) => node = child,
            None => break,
        }
    }
    node
}

/// Decodes one page of a listing.
pub fn parse_envelope(value: &Value) -> Result<ListEnvelope, AppError> {
    decode_value(value, "")
}

/// Decodes any top-level object by its `object` discriminator.
pub fn parse_notion_object(value: &Value, prefix: &str) -> Result<NotionObject, AppError> {
    match object_tag(value, prefix)? {
        "page" => decode_value::<Page>(value, prefix).map(NotionObject::Page),
        "database" => decode_value::<Database>(value, prefix).map(NotionObject::Database),
        "block" => decode_value::<Block>(value, prefix).map(NotionObject::Block),
        other => Err(unknown_object(other, value, prefix)),
    }
}

/// Decodes a search hit, which is a page or a database.
pub fn parse_search_result(value: &Value, prefix: &str) -> Result<SearchResult, AppError> {
    match object_tag(value, prefix)? {
        "page" => decode_value::<Page>(value, prefix).map(SearchResult::Page),
        "database" => decode_value::<Database>(value, prefix).map(SearchResult::Database),
        other => Err(unknown_object(other, value, prefix)),
    }
}

fn object_tag<'a>(value: &'a Value, prefix: &str) -> Result<&'a str, AppError> {
    value
        .get("object")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Decode {
            message: "missing field `object`".to_string(),
            path: render_path(prefix, std::iter::empty()),
            fragment: preview(&value.to_string()),
        })
}

fn unknown_object(tag: &str, value: &Value, prefix: &str) -> AppError {
    AppError::UnknownVariant {
        tag: tag.to_string(),
        path: render_path(prefix, std::iter::empty()),
        fragment: preview(&value.to_string()),
    }
}

/// Builds the error for a non-2xx response.
///
/// The status always comes from the HTTP response; the body is decoded as a
/// service error when it has that shape and kept verbatim either way.
pub fn error_response(status: StatusCode, body: String) -> AppError {
    let parsed = serde_json::from_str::<ErrorBody>(&body).ok();
    if let Some(error) = &parsed {
        log::warn!("Notion API error {} ({}): {}", status, error.code, error.message);
    } else {
        log::warn!("Notion API error {} with unrecognized body", status);
    }
    AppError::HttpStatus {
        status,
        code: parsed
            .as_ref()
            .map(|error| NotionErrorCode::from_api_response(&error.code)),
        message: parsed.map(|error| error.message),
        body,
    }
}
