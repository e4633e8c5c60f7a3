//! LeetCode Export: archive a user's solved-problem history
//!
//! This crate signs in to LeetCode with a browser session, pulls profile
//! statistics, enumerates every solved problem and assembles one JSON
//! document holding the latest accepted submission per language and the
//! problem metadata for each of them.

pub mod client;
pub mod config;
pub mod exporter;
pub mod model;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for export operations
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    #[error("Rate limited by {url}")]
    RateLimited { url: String },

    #[error("Request to {url} failed with status {status}: {body}")]
    RequestFailure {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Request to {url} failed after {attempts} attempts: {source}")]
    NetworkExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {url}: {message}")]
    Upstream { url: String, message: String },

    #[error("Failed to decode response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure classes the pipeline reacts to
///
/// Callers decide between retrying, degrading a record and aborting the run
/// by matching on this value, never on the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthenticationFailure,
    RateLimited,
    NetworkTransient,
    UpstreamFailure,
    ParseFailure,
    /// Local problems: configuration, IO, client construction
    Local,
}

impl ExportError {
    /// Classifies this error into the pipeline's failure taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::AuthenticationFailure(_) => ErrorKind::AuthenticationFailure,
            ExportError::RateLimited { .. } => ErrorKind::RateLimited,
            ExportError::NetworkExhausted { .. } => ErrorKind::NetworkTransient,
            ExportError::RequestFailure { .. } | ExportError::Upstream { .. } => {
                ErrorKind::UpstreamFailure
            }
            ExportError::Parse { .. } => ErrorKind::ParseFailure,
            ExportError::Config(_)
            | ExportError::Reqwest(_)
            | ExportError::UrlParse(_)
            | ExportError::Serialize(_)
            | ExportError::Io(_) => ErrorKind::Local,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.kind() == ErrorKind::RateLimited
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

// Re-export commonly used types
pub use config::Config;
pub use exporter::{ExportOutcome, Exporter};
pub use model::{Credentials, ExportDocument, ProblemDetail, ProfileStats, SubmissionRecord};
