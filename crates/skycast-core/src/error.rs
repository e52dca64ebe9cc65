// crates/skycast-core/src/error.rs

//! Error types for the whole crate.
//!
//! Provider failures never reach the view as errors: the fetch controller
//! folds them into a single [`crate::fetch::FetchError`] slot. The enums here
//! are what the seams (config, dataset, provider, submit) return.

use thiserror::Error;

/// Crate-level error returned by dataset loading and setup helpers.
#[derive(Debug, Error)]
pub enum SkycastError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient result alias used across the crate.
pub type Result<T, E = SkycastError> = std::result::Result<T, E>;

/// Startup configuration problems. Raised when the config is built, never on
/// the first request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key: environment variable `{var}` is not set")]
    MissingApiKey { var: &'static str },

    #[error("API key is empty")]
    EmptyApiKey,

    #[error("invalid provider endpoint `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// What went wrong talking to the weather provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider has no location matching the query.
    #[error("no matching location found")]
    NotFound,

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response that is not a recognised "not found".
    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body does not carry the expected fields.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Rejected submissions. Nothing is sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("city must not be empty")]
    EmptyCity,

    #[error("a request for `{city}` is already in flight")]
    AlreadyPending { city: String },
}
