//! Account domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type UserId = i64;

/// Free-form user preferences (favourite styles, budget, locale, ...).
pub type PreferenceBag = Map<String, Value>;

/// The account record returned by `/api/auth/me` and `/api/auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub preferences: Option<PreferenceBag>,
    pub created_at: String,
    #[serde(default)]
    pub last_login: Option<String>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Full name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Username/password pair sent form-encoded to `/api/auth/token`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterData {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl RegisterData {
    /// Credentials for signing in as the account being registered.
    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials::new(self.username.clone(), self.password.clone())
    }
}

impl std::fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterData")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Response of `/api/auth/token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
