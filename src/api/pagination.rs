// src/api/pagination.rs
//! Cursor pagination as a lazy stream.
//!
//! One request is in flight at a time and the next page is only requested
//! once the consumer has drained the current one. The stream ends after the
//! first error.

use super::client::NotionHttpClient;
use super::parser::{error_response, parse_body, parse_envelope};
use super::responses::ListEnvelope;
use crate::constants::{NOTION_API_PAGE_SIZE, START_CURSOR_PARAM};
use crate::error::AppError;
use crate::types::ValidationError;
use futures::future;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

/// The fixed part of a paginated call; only the cursor changes per page.
#[derive(Debug, Clone)]
pub(crate) struct PageRequest {
    pub method: Method,
    pub path: String,
    pub pagination_in_json: bool,
    pub body: Option<Value>,
}

enum PageState {
    Fetching(Option<String>),
    /// The previous envelope broke the protocol; report it on the next poll.
    Failed(AppError),
    Done,
}

pub(crate) fn paginate(
    client: NotionHttpClient,
    request: PageRequest,
) -> BoxStream<'static, Result<ListEnvelope, AppError>> {
    let request = Arc::new(request);
    stream::try_unfold(PageState::Fetching(None), move |state| {
        let client = client.clone();
        let request = Arc::clone(&request);
        async move {
            let cursor = match state {
                PageState::Fetching(cursor) => cursor,
                PageState::Failed(err) => return Err(err),
                PageState::Done => return Ok(None),
            };

            let envelope = fetch_page(&client, &request, cursor.as_deref()).await?;
            log::trace!(
                "{} {}: {} results, has_more={}",
                request.method,
                request.path,
                envelope.results.len(),
                envelope.has_more
            );

            let next = match (envelope.has_more, &envelope.next_cursor) {
                (false, _) => PageState::Done,
                (true, Some(cursor)) => PageState::Fetching(Some(cursor.clone())),
                (true, None) => PageState::Failed(AppError::Decode {
                    message: "has_more is true but next_cursor is null".to_string(),
                    path: "next_cursor".to_string(),
                    fragment: "null".to_string(),
                }),
            };
            Ok::<_, AppError>(Some((envelope, next)))
        }
    })
    .boxed()
}

async fn fetch_page(
    client: &NotionHttpClient,
    request: &PageRequest,
    cursor: Option<&str>,
) -> Result<ListEnvelope, AppError> {
    log::debug!(
        "{} {} (cursor: {})",
        request.method,
        request.path,
        cursor.unwrap_or("none")
    );

    let mut url = client.endpoint(&request.path)?;
    let body = if request.pagination_in_json {
        Some(body_with_cursor(request.body.as_ref(), cursor)?)
    } else {
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page_size", &NOTION_API_PAGE_SIZE.to_string());
            if let Some(cursor) = cursor {
                query.append_pair(START_CURSOR_PARAM, cursor);
            }
        }
        request.body.clone()
    };

    let response = client
        .send(request.method.clone(), url, body.as_ref())
        .await?;
    if !response.status.is_success() {
        return Err(error_response(response.status, response.data));
    }
    parse_envelope(&parse_body(&response.data)?)
}

/// Copies `body` (or `{}`) and writes the cursor into it.
fn body_with_cursor(body: Option<&Value>, cursor: Option<&str>) -> Result<Value, AppError> {
    let mut body = body.cloned().unwrap_or_else(|| json!({}));
    let fields = body.as_object_mut().ok_or_else(|| {
        ValidationError::InvalidRequestBody(
            "a body-paginated request needs a JSON object body".to_string(),
        )
    })?;
    if let Some(cursor) = cursor {
        fields.insert(START_CURSOR_PARAM.to_string(), Value::String(cursor.to_string()));
    }
    Ok(body)
}

/// Flattens a stream of envelopes into decoded items, in order.
///
/// Item paths are reported relative to their envelope, e.g. `results[3]`.
pub(crate) fn items<T>(
    pages: BoxStream<'static, Result<ListEnvelope, AppError>>,
    decode: fn(&Value, &str) -> Result<T, AppError>,
) -> BoxStream<'static, Result<T, AppError>>
where
    T: Send + 'static,
{
    pages
        .map_ok(move |envelope| {
            stream::iter(
                envelope
                    .results
                    .into_iter()
                    .enumerate()
                    .map(move |(index, item)| decode(&item, &format!("results[{}]", index))),
            )
        })
        .try_flatten()
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            *failed = item.is_err();
            future::ready(Some(item))
        })
        .boxed()
}
