//! State repository trait.

use async_trait::async_trait;

use crate::error::Result;

/// Repository for the persisted access token and locale choice.
///
/// The token is shared between the API client (which reads it for every
/// request and drops it on 401) and the auth session store.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn get_access_token(&self) -> Option<String>;

    async fn set_access_token(&self, token: String) -> Result<()>;

    async fn clear_access_token(&self) -> Result<()>;

    async fn get_locale(&self) -> Option<String>;

    async fn set_locale(&self, locale: String) -> Result<()>;
}
