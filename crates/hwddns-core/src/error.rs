//! Error types for hwddns
//!
//! This module defines all error types used throughout the workspace.

use crate::config::AddressFamily;
use thiserror::Error;

/// Result type alias for hwddns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hwddns
#[derive(Error, Debug)]
pub enum Error {
    /// A lookup provider could not be reached (DNS failure, refused, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-success HTTP status was returned
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response was received but contained no address
    #[error("Format error: {0}")]
    Format(String),

    /// A candidate is not a valid address of the requested family
    #[error("Validation error: {candidate} is not a valid {family} address")]
    Validation {
        /// The rejected literal
        candidate: String,
        /// The family it was checked against
        family: AddressFamily,
    },

    /// Every lookup provider for the family failed
    #[error("All {0} lookup providers failed")]
    DiscoveryExhausted(AddressFamily),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Zone or record set not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a validation error
    pub fn validation(candidate: impl Into<String>, family: AddressFamily) -> Self {
        Self::Validation {
            candidate: candidate.into(),
            family,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
