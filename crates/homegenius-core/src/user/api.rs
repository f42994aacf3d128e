//! Remote authentication trait.

use async_trait::async_trait;

use super::model::{AccessToken, LoginCredentials, PreferenceBag, RegisterData, User};
use crate::error::Result;

/// Access to the backend's `/api/auth` endpoints.
///
/// `login` and `register` are the only calls made without a bearer token.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for an access token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken>;

    async fn register(&self, data: &RegisterData) -> Result<User>;

    /// Resolves the persisted token into the account it belongs to.
    async fn current_user(&self) -> Result<User>;

    async fn update_preferences(&self, preferences: &PreferenceBag) -> Result<User>;
}
