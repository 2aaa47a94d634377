// src/api/endpoints.rs
//! Typed operations on top of the transport.

use super::client::NotionHttpClient;
use super::pagination::items;
use super::parser::{decode_value, parse_search_result};
use super::requests::{
    CreateDatabaseRequest, CreatePageRequest, QueryDatabaseRequest, SearchRequest,
    UpdatePageRequest,
};
use super::responses::SearchResult;
use crate::error::AppError;
use crate::model::{Block, Database, Page};
use crate::types::{BlockId, DatabaseId, PageId};
use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

fn to_body<T: Serialize>(request: &T) -> Result<Value, AppError> {
    serde_json::to_value(request).map_err(AppError::Encode)
}

impl NotionHttpClient {
    /// Every database shared with the integration.
    pub fn list_databases(&self) -> BoxStream<'static, Result<Database, AppError>> {
        let pages = self.paginated_request(Method::GET, "/v1/databases", false, None);
        items(pages, decode_value::<Database>)
    }

    /// Rows of a database matching `request`, in the service's order.
    pub fn query_database(
        &self,
        id: &DatabaseId,
        request: &QueryDatabaseRequest,
    ) -> BoxStream<'static, Result<Page, AppError>> {
        let body = match to_body(request) {
            Ok(body) => body,
            Err(err) => return stream::once(future::ready(Err(err))).boxed(),
        };
        let path = format!("/v1/databases/{}/query", id.to_dashed());
        let pages = self.paginated_request(Method::POST, &path, true, Some(body));
        items(pages, decode_value::<Page>)
    }

    /// Pages and databases whose titles match `request`.
    pub fn search(&self, request: &SearchRequest) -> BoxStream<'static, Result<SearchResult, AppError>> {
        let body = match to_body(request) {
            Ok(body) => body,
            Err(err) => return stream::once(future::ready(Err(err))).boxed(),
        };
        let pages = self.paginated_request(Method::POST, "/v1/search", true, Some(body));
        items(pages, parse_search_result)
    }

    /// Direct children of a block or page. Grandchildren are not fetched.
    pub fn block_children(&self, id: &BlockId) -> BoxStream<'static, Result<Block, AppError>> {
        let path = format!("/v1/blocks/{}/children", id.to_dashed());
        let pages = self.paginated_request(Method::GET, &path, false, None);
        items(pages, decode_value::<Block>)
    }

    /// The full block tree under `id`, with children embedded in their
    /// parents' payloads.
    ///
    /// Blocks are fetched depth-first, one request at a time.
    pub fn block_tree(&self, id: BlockId) -> BoxFuture<'_, Result<Vec<Block>, AppError>> {
        async move {
            let mut blocks: Vec<Block> = self.block_children(&id).try_collect().await?;
            for block in blocks.iter_mut() {
                if !block.has_children {
                    continue;
                }
                let (child_id, kind) = (block.id, block.block_type());
                match block.content.children_slot_mut() {
                    Some(slot) => *slot = Some(self.block_tree(child_id).await?),
                    None => log::debug!("Not descending into {} block {}", kind, child_id),
                }
            }
            Ok(blocks)
        }
        .boxed()
    }

    pub async fn get_page(&self, id: &PageId) -> Result<Page, AppError> {
        let path = format!("/v1/pages/{}", id.to_dashed());
        self.request_as(Method::GET, &path, None).await
    }

    pub async fn get_database(&self, id: &DatabaseId) -> Result<Database, AppError> {
        let path = format!("/v1/databases/{}", id.to_dashed());
        self.request_as(Method::GET, &path, None).await
    }

    pub async fn get_block(&self, id: &BlockId) -> Result<Block, AppError> {
        let path = format!("/v1/blocks/{}", id.to_dashed());
        self.request_as(Method::GET, &path, None).await
    }

    pub async fn create_page(&self, request: &CreatePageRequest) -> Result<Page, AppError> {
        let body = to_body(request)?;
        self.request_as(Method::POST, "/v1/pages", Some(&body)).await
    }

    pub async fn update_page(
        &self,
        id: &PageId,
        request: &UpdatePageRequest,
    ) -> Result<Page, AppError> {
        let body = to_body(request)?;
        let path = format!("/v1/pages/{}", id.to_dashed());
        self.request_as(Method::PATCH, &path, Some(&body)).await
    }

    pub async fn create_database(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<Database, AppError> {
        let body = to_body(request)?;
        self.request_as(Method::POST, "/v1/databases", Some(&body)).await
    }
}
