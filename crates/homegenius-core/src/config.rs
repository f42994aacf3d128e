//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend used when neither the config file nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Overrides `api_url`.
pub const API_URL_ENV: &str = "HOMEGENIUS_API_URL";

/// Overrides `language` (the runtime language used for locale resolution).
pub const LANGUAGE_ENV: &str = "HOMEGENIUS_LANGUAGE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Runtime language tag; the OS language is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            language: None,
        }
    }
}

impl ClientConfig {
    /// Applies environment overrides. `lookup` is usually `std::env::var(..).ok()`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(language) = lookup(LANGUAGE_ENV).filter(|value| !value.trim().is_empty()) {
            self.language = Some(language);
        }
        self
    }

    /// Base URL without trailing slashes, ready for `format!("{base}/api/...")`.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
