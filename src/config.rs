// src/config.rs
use crate::constants::{
    ENV_API_KEY, ENV_BASE_URL, ENV_VERSION, NOTION_API_BASE_URL, NOTION_VERSION,
};
use crate::error::AppError;
use crate::types::{ApiKey, ValidatedUrl};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Everything a `NotionHttpClient` needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: ValidatedUrl,
    pub notion_version: String,
    /// Whole-request timeout; `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// A configuration pointing at the public service.
    pub fn new(api_key: ApiKey) -> Result<Self, AppError> {
        Ok(Self {
            api_key,
            base_url: ValidatedUrl::parse(NOTION_API_BASE_URL)?,
            notion_version: NOTION_VERSION.to_string(),
            timeout: None,
        })
    }

    pub fn with_base_url(mut self, base_url: ValidatedUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_notion_version(mut self, version: impl Into<String>) -> Self {
        self.notion_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `NOTION_API_KEY` and the optional base URL and version overrides.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key_str = std::env::var(ENV_API_KEY).map_err(|_| {
            AppError::MissingConfiguration(format!("{} environment variable not set", ENV_API_KEY))
        })?;

        let mut config = Self::new(ApiKey::new(api_key_str)?)?;
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config = config.with_base_url(ValidatedUrl::parse(&base_url)?);
        }
        if let Ok(version) = std::env::var(ENV_VERSION) {
            config = config.with_notion_version(version);
        }
        Ok(config)
    }
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Print the reduced projection instead of wire JSON
    #[arg(long, default_value_t = false, global = true)]
    pub flat: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Databases shared with the integration
    #[command(subcommand)]
    Database(DatabaseCommand),

    /// Single pages
    #[command(subcommand)]
    Page(PageCommand),

    /// Search pages and databases by title
    Search(SearchArgs),

    /// Call an arbitrary endpoint and print the raw response
    Api(ApiArgs),
}

#[derive(Subcommand, Debug)]
pub enum DatabaseCommand {
    /// List every database
    List,

    /// Stream the rows of a database
    Query {
        /// Database URL or ID
        database: String,

        /// Order by a property, as `name` or `name:descending`
        #[arg(long = "sort-property")]
        sort_properties: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PageCommand {
    /// Retrieve one page
    Get {
        /// Page URL or ID
        page: String,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to match against titles
    #[arg(long)]
    pub query: Option<String>,

    /// Restrict hits to `page` or `database`
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args, Debug)]
pub struct ApiArgs {
    /// HTTP method, e.g. GET or POST
    pub method: String,

    /// Path below the base URL, e.g. /v1/users
    pub path: String,

    /// Follow `next_cursor` and print every page
    #[arg(long, default_value_t = false)]
    pub paginate: bool,

    /// JSON request body
    #[arg(long)]
    pub data: Option<String>,
}

impl CommandLineInput {
    /// Resolves the client configuration from the environment and flags.
    pub fn client_config(&self) -> Result<ClientConfig, AppError> {
        let config = ClientConfig::from_env()?;
        Ok(match self.timeout {
            Some(seconds) => config.with_timeout(Duration::from_secs(seconds)),
            None => config,
        })
    }
}
