// src/api/mod.rs
//! Notion API interaction: transport, pagination and typed endpoints.
//!
//! `client` speaks HTTP, `pagination` threads cursors, `parser` turns bodies
//! into typed values. `endpoints` ties them into one method per operation.

pub mod client;
mod endpoints;
mod pagination;
pub mod parser;
pub mod requests;
pub mod responses;

use crate::error::AppError;
use crate::model::{Block, Database, NotionObject, Page};
use crate::types::{BlockId, DatabaseId, PageId};
use uuid::Uuid;

/// Single-object retrieval from a Notion workspace.
///
/// Code that only needs to look objects up depends on this trait, so tests
/// can substitute an in-memory fake for the HTTP client.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError>;
    async fn retrieve_database(&self, id: &DatabaseId) -> Result<Database, AppError>;
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, AppError>;

    /// Resolves an id of unknown kind by trying page, then database, then block.
    ///
    /// Only "not found" moves on to the next kind; any other failure is
    /// returned as is.
    async fn resolve_object(&self, id: Uuid) -> Result<NotionObject, AppError> {
        match self.retrieve_page(&PageId::from_uuid(id)).await {
            Ok(page) => return Ok(NotionObject::Page(page)),
            Err(err) if !is_not_found(&err) => return Err(err),
            Err(_) => {}
        }

        match self.retrieve_database(&DatabaseId::from_uuid(id)).await {
            Ok(database) => return Ok(NotionObject::Database(database)),
            Err(err) if !is_not_found(&err) => return Err(err),
            Err(_) => {}
        }

        self.retrieve_block(&BlockId::from_uuid(id))
            .await
            .map(NotionObject::Block)
    }
}

fn is_not_found(err: &AppError) -> bool {
    match err {
        AppError::HttpStatus { status, code, .. } => match code {
            Some(code) => code.is_not_found(),
            None => *status == reqwest::StatusCode::NOT_FOUND,
        },
        _ => false,
    }
}

#[async_trait::async_trait]
impl NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        self.get_page(id).await
    }

    async fn retrieve_database(&self, id: &DatabaseId) -> Result<Database, AppError> {
        self.get_database(id).await
    }

    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, AppError> {
        self.get_block(id).await
    }
}

// Re-export the public interface
pub use client::{ApiResponse, NotionHttpClient};
pub use parser::{decode_value, parse_notion_object, parse_search_result};
pub use requests::*;
pub use responses::{ErrorBody, ListEnvelope, ListObject, SearchResult};
