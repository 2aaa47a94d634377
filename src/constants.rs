// src/constants.rs
//! Protocol constants and operational boundaries of the client.

// ---------------------------------------------------------------------------
// Notion API protocol
// ---------------------------------------------------------------------------

/// Where the service lives unless configuration says otherwise.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com";

/// The protocol snapshot every request is pinned to.
///
/// The shapes in `model` (parents, block payloads, property payloads) are
/// those of this version; changing it means re-checking them.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Header carrying [`NOTION_VERSION`].
pub const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Name of the continuation token, both as a query parameter and as a body field.
pub const START_CURSOR_PARAM: &str = "start_cursor";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub const ENV_API_KEY: &str = "NOTION_API_KEY";
pub const ENV_BASE_URL: &str = "NOTION_BASE_URL";
pub const ENV_VERSION: &str = "NOTION_VERSION";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies and
/// offending JSON fragments.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
