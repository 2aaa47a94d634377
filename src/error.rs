// src/error.rs
//! Error types for every failure the client can report.
//!
//! All variants are terminal: the client never retries, and a paginated
//! stream ends after yielding its first error.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request URL is not valid
    InvalidRequestUrl,
    /// Request is not supported
    InvalidRequest,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion-Version header missing
    MissingVersion,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// Notion's database is unavailable
    DatabaseConnectionUnavailable,
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "invalid_request_url" => Self::InvalidRequestUrl,
            "invalid_request" => Self::InvalidRequest,
            "validation_error" => Self::ValidationFailed,
            "missing_version" => Self::MissingVersion,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            "database_connection_unavailable" => Self::DatabaseConnectionUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this error is transient and worth retrying.
    ///
    /// The client itself never retries; this is for callers that do.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited
                | Self::ServiceUnavailable
                | Self::InternalError
                | Self::DatabaseConnectionUnavailable
                | Self::Conflict
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::InvalidRequestUrl => write!(f, "invalid_request_url"),
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::MissingVersion => write!(f, "missing_version"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::DatabaseConnectionUnavailable => write!(f, "database_connection_unavailable"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Notion API returned {status}{}: {}", code_suffix(.code), preview(.body))]
    HttpStatus {
        status: reqwest::StatusCode,
        code: Option<NotionErrorCode>,
        message: Option<String>,
        body: String,
    },

    #[error("Malformed response at `{path}`: {message}\nFragment: {fragment}")]
    Decode {
        message: String,
        path: String,
        fragment: String,
    },

    #[error("Unknown variant `{tag}` at `{path}`\nFragment: {fragment}")]
    UnknownVariant {
        tag: String,
        path: String,
        fragment: String,
    },

    #[error("Unknown enum value `{value}` for {kind} at `{path}`")]
    UnknownEnumValue {
        kind: String,
        value: String,
        path: String,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// The service's error code, when the failure was an error response.
    pub fn notion_code(&self) -> Option<&NotionErrorCode> {
        match self {
            AppError::HttpStatus { code, .. } => code.as_ref(),
            _ => None,
        }
    }

    /// Whether a caller-side retry could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Transport(e) => e.is_timeout() || e.is_connect(),
            AppError::HttpStatus { status, code, .. } => match code {
                Some(code) => code.is_retryable(),
                None => status.is_server_error(),
            },
            _ => false,
        }
    }
}

fn code_suffix(code: &Option<NotionErrorCode>) -> String {
    match code {
        Some(code) => format!(" ({})", code),
        None => String::new(),
    }
}

/// Truncates `text` to the preview length on a character boundary.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
