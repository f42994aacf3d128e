//! Notifications published by the API client.

use serde::{Deserialize, Serialize};

/// Cross-cutting events raised while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// A request was answered with 401. The persisted token is already gone;
    /// the presentation layer should send the user to the login entry point.
    AuthenticationRequired {
        /// Path of the request that was rejected
        endpoint: String,
    },
}
