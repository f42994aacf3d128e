//! Error types for the HomeGenius client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire HomeGenius client.
///
/// Remote failures are classified by HTTP status so that callers can decide
/// between surfacing an error and degrading to an empty view.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HomeGeniusError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered 401. The persisted token has been discarded.
    #[error("Authentication required")]
    AuthFailure,

    /// Any other 4xx answer; `detail` is what the backend said.
    #[error("Request rejected ({status}): {detail}")]
    Validation { status: u16, detail: String },

    /// 404 on a single-item fetch
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// 5xx answer
    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Local persistence failure (state file, lock file)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HomeGeniusError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classifies a non-success HTTP status.
    ///
    /// `resource` names what was requested and is only used for 404s.
    /// `body` is the raw response body; a FastAPI style `{"detail": ...}`
    /// payload is unwrapped, anything else is kept verbatim.
    pub fn from_status(status: u16, resource: impl Into<String>, body: &str) -> Self {
        match status {
            401 => Self::AuthFailure,
            404 => Self::not_found(resource),
            400..=499 => Self::Validation {
                status,
                detail: extract_detail(body),
            },
            _ => Self::Server {
                status,
                detail: extract_detail(body),
            },
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an authentication failure
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthFailure)
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

fn extract_detail(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => trimmed.to_string(),
        },
        _ => trimmed.to_string(),
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for HomeGeniusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HomeGeniusError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HomeGeniusError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HomeGeniusError>`.
pub type Result<T> = std::result::Result<T, HomeGeniusError>;
