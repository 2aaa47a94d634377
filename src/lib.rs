// src/lib.rs
//! notions: a typed async client for the Notion REST API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `NotionErrorCode`
//! - **Configuration**: `ClientConfig`
//! - **Domain model**: `Page`, `Database`, `Block`, `PropertyValue`, etc.
//! - **Domain types**: `PageId`, `ApiKey`, `RichText`, `Decimal`, etc.
//! - **API client**: `NotionHttpClient`, request bodies, paginated streams
//! - **Flattening**: `flatten_page`, `flatten_database`

// `types` must come first: it defines the `string_enum!` macro used below.
#[macro_use]
pub mod types;

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod flatten;
pub mod model;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};
pub use crate::types::{UnknownEnumValue, ValidationError};

// --- Configuration ---
pub use crate::config::ClientConfig;

// --- Domain Model ---
pub use crate::model::{
    Block, BlockContent, Database, DatabaseParent, DatabaseProperty, NotionObject, Page,
    PageParent, PageProperty, PropertySchema, PropertyValue, Reduce, SelectOption,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, BlockId, Color, DatabaseId, DateOrDateTime, DateRange, Decimal, FileObject, Icon,
    OffsetStyle, PageId, RichText, Timestamp, User, ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    ApiResponse, CreateDatabaseRequest, CreatePageRequest, ListEnvelope, NotionHttpClient,
    NotionRepository, QueryDatabaseRequest, SearchRequest, SearchResult, Sort,
    UpdatePageRequest,
};

// --- Flattening ---
pub use crate::flatten::{flatten_database, flatten_page, keyify, FlatDatabase, FlatPage};
