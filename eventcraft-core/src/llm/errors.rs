//! Error types for generative service calls
//!
//! Every generative call returns one of these instead of panicking or
//! swallowing the failure, so call sites pick their own fallback.

use std::time::Duration;
use thiserror::Error;

/// Main error type for generative text and image calls
#[derive(Debug, Error)]
pub enum LLMError {
    /// API key is missing or invalid
    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    /// Request timed out
    #[error("Request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Network error occurred
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// API returned a non-success status
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parsing error: {message}")]
    ParseError { message: String },

    /// Service answered but returned nothing usable
    #[error("Empty response from {provider}")]
    EmptyResponse { provider: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl LLMError {
    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthenticationError { message: message.into() }
    }

    /// Create a timeout error
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { duration }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError { status, message: message.into() }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError { message: message.into() }
    }

    /// Create an empty response error
    pub fn empty(provider: impl Into<String>) -> Self {
        Self::EmptyResponse { provider: provider.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }

    /// Classify a transport error from reqwest
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::timeout(timeout)
        } else if err.is_decode() {
            Self::parse(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

/// Result type for generative calls
pub type LLMResult<T> = Result<T, LLMError>;

/// Convert from JSON errors
impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError { message: err.to_string() }
    }
}
