//! Error types for the vpsview CLI

use thiserror::Error;

/// Result type alias for vpsview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Any non-200 response. The body is kept verbatim so it can be shown to the user.
    #[error("Failed to fetch data (HTTP {status}). {body}")]
    Http { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    Parse(String),

    #[error("{0}")]
    EmptyResult(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Errors raised while reshaping records into rows
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Unknown column '{column}'. Available columns: {}", available.join(", "))]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid lap time: {0}")]
    InvalidDuration(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `vpsview init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error(
        "API URL not configured. Run `vpsview init`, pass --api-url, or set VPSVIEW_API_URL."
    )]
    MissingApiUrl,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
