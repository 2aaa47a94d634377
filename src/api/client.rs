// src/api/client.rs
//! HTTP transport for the Notion API.
//!
//! This module owns authentication headers and the request/response cycle.
//! It turns non-2xx responses into errors but leaves typed decoding to
//! `parser` and cursor handling to `pagination`.

use super::pagination::{self, PageRequest};
use super::parser::{decode_value, error_response, parse_body};
use super::responses::ListEnvelope;
use crate::config::ClientConfig;
use crate::constants::NOTION_VERSION_HEADER;
use crate::error::AppError;
use crate::types::ValidatedUrl;
use futures::stream::BoxStream;
use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// A cheaply cloneable client bound to one integration token.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder().default_headers(Self::create_headers(config)?);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates the default headers for Notion API requests.
    ///
    /// `Content-Type` is left to reqwest, which sets it only when a JSON body
    /// is attached.
    fn create_headers(config: &ClientConfig) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", config.api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            NOTION_VERSION_HEADER,
            header::HeaderValue::from_str(&config.notion_version).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Notion version: {}", e))
            })?,
        );

        Ok(headers)
    }

    pub fn base_url(&self) -> &ValidatedUrl {
        &self.base_url
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(path)?)
    }

    /// Sends one request and returns the raw body, whatever the status.
    pub(super) async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<ApiResponse<String>, AppError> {
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        extract_response_text(response).await
    }

    /// Issues a single call and parses the 2xx body as JSON.
    ///
    /// Non-2xx responses become [`AppError::HttpStatus`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse<Value>, AppError> {
        let url = self.endpoint(path)?;
        let response = self.send(method, url, body).await?;
        if !response.status.is_success() {
            return Err(error_response(response.status, response.data));
        }
        Ok(ApiResponse {
            data: parse_body(&response.data)?,
            status: response.status,
            url: response.url,
        })
    }

    /// Issues a single call and decodes the body into `T`.
    pub async fn request_as<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let response = self.request(method, path, body).await?;
        decode_value(&response.data, "")
    }

    /// Streams every page of a cursor-paginated listing.
    ///
    /// With `pagination_in_json` the cursor is written into the JSON body,
    /// otherwise into the query string. Nothing is sent until the stream is
    /// polled.
    pub fn paginated_request(
        &self,
        method: Method,
        path: &str,
        pagination_in_json: bool,
        body: Option<Value>,
    ) -> BoxStream<'static, Result<ListEnvelope, AppError>> {
        pagination::paginate(
            self.clone(),
            PageRequest {
                method,
                path: path.to_string(),
                pagination_in_json,
                body,
            },
        )
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiKey;

    fn config() -> ClientConfig {
        ClientConfig::new(ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap()).unwrap()
    }

    #[test]
    fn test_default_headers() {
        let headers = NotionHttpClient::create_headers(&config()).unwrap();
        assert_eq!(
            headers[header::AUTHORIZATION],
            "Bearer secret_abcdefghijklmnopqrstuvwxyz"
        );
        assert_eq!(headers[NOTION_VERSION_HEADER], "2022-06-28");
        assert!(headers.get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_invalid_version_header() {
        let err = NotionHttpClient::create_headers(&config().with_notion_version("2022\n06")).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn test_endpoint_join() {
        let client = NotionHttpClient::new(&config()).unwrap();
        assert_eq!(
            client.endpoint("/v1/search").unwrap().as_str(),
            "https://api.notion.com/v1/search"
        );
    }
}
