use thiserror::Error;

#[macro_use]
mod enums;

mod colors;
mod decimal;
mod domain_types;
mod files;
mod ids;
mod rich_text;
mod time;
mod users;

pub use colors::*;
pub use decimal::*;
pub use domain_types::*;
pub use enums::*;
pub use files::*;
pub use ids::*;
pub use rich_text::*;
pub use time::*;
pub use users::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid decimal literal: {0}")]
    InvalidDecimal(String),

    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),
}

/// A constrained string that fell outside its closed set.
///
/// Produced by every `string_enum!` type. Decoding fails closed on these by
/// default; callers that prefer a passthrough can match on the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown enum value `{value}` for {kind}")]
pub struct UnknownEnumValue {
    pub kind: &'static str,
    pub value: String,
}
