// src/api/responses.rs
//! Envelopes the service wraps around entities.

use crate::error::AppError;
use crate::model::{Database, Page};
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    #[derive(Default)]
    pub enum ListObject {
        #[default]
        List => "list",
    }
}

/// One page of a paginated listing.
///
/// `results` stay as raw JSON so a single malformed item can be reported
/// with its index instead of failing the envelope as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub object: ListObject,
    pub results: Vec<Value>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl ListEnvelope {
    /// The cursor for the following page, if the listing continues.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// A search hit: either a page or a database.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Page(Page),
    Database(Database),
}

impl SearchResult {
    pub fn id(&self) -> uuid::Uuid {
        match self {
            SearchResult::Page(page) => *page.id.as_uuid(),
            SearchResult::Database(database) => *database.id.as_uuid(),
        }
    }

    /// Display name of the hit: the page title or the database title.
    pub fn title(&self) -> String {
        match self {
            SearchResult::Page(page) => page.title(),
            SearchResult::Database(database) => database.plain_title(),
        }
    }

    /// The flattened projection of the hit.
    pub fn flatten(&self) -> Result<Value, AppError> {
        match self {
            SearchResult::Page(page) => crate::flatten::flatten_page(page).into_value(),
            SearchResult::Database(database) => {
                crate::flatten::flatten_database(database).into_value()
            }
        }
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Echo of the HTTP status; the response status line is authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_continuation() {
        let envelope: ListEnvelope = serde_json::from_value(json!({
            "object": "list",
            "results": [{"object": "page"}],
            "next_cursor": "abc",
            "has_more": true,
            "type": "page"
        }))
        .unwrap();
        assert_eq!(envelope.continuation(), Some("abc"));
        assert_eq!(envelope.results.len(), 1);

        let last = ListEnvelope {
            has_more: false,
            ..envelope
        };
        assert_eq!(last.continuation(), None);
    }

    #[test]
    fn test_envelope_requires_list_object() {
        let err = serde_json::from_value::<ListEnvelope>(json!({
            "object": "page",
            "results": [],
            "next_cursor": null,
            "has_more": false
        }))
        .unwrap_err();
        assert!(err.to_string().contains("for ListObject"));
    }

    #[test]
    fn test_search_hit_flattens_by_kind() {
        let page: Page =
            serde_json::from_str(include_str!("../../tests/fixtures/page.json")).unwrap();
        let hit = SearchResult::Page(page);
        let flat = hit.flatten().unwrap();
        assert_eq!(flat["object"], "page");
        assert_eq!(flat["id"], hit.id().to_string());
        assert_eq!(flat["title"], hit.title());
    }

    #[test]
    fn test_error_body() {
        let body: ErrorBody = serde_json::from_value(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find database"
        }))
        .unwrap();
        assert_eq!(body.code, "object_not_found");
        assert_eq!(body.status, Some(404));
        assert_eq!(body.request_id, None);
    }
}
