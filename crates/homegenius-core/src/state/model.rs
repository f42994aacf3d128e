//! Persisted client state.

use serde::{Deserialize, Serialize};

/// Key/value pairs kept outside process memory.
///
/// # File Location
///
/// - Linux: `~/.config/homegenius/state.toml`
/// - macOS: `~/Library/Application Support/homegenius/state.toml`
/// - Windows: `%APPDATA%\homegenius\state.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Bearer token issued by `/api/auth/token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Locale explicitly chosen by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl PersistedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let state = PersistedState::new();
        assert!(state.access_token.is_none());
        assert!(state.locale.is_none());
        assert!(!state.has_token());
    }

    #[test]
    fn test_empty_token_does_not_count() {
        let state = PersistedState {
            access_token: Some(String::new()),
            locale: None,
        };
        assert!(!state.has_token());
    }

    #[test]
    fn test_toml_omits_absent_values() {
        let state = PersistedState {
            access_token: None,
            locale: Some("sv-SE".to_string()),
        };
        let rendered = toml::to_string(&state).unwrap();
        assert_eq!(rendered.trim(), r#"locale = "sv-SE""#);
    }
}
