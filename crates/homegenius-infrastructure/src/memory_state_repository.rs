//! In-memory state repository.
//!
//! Used by tests and by `--ephemeral` CLI runs that must not touch the
//! user's saved session.

use async_trait::async_trait;
use homegenius_core::Result;
use homegenius_core::state::{PersistedState, StateRepository};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    state: RwLock<PersistedState>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the given contents (e.g. a token left by a previous run).
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn snapshot(&self) -> PersistedState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn get_access_token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
    }

    async fn set_access_token(&self, token: String) -> Result<()> {
        self.state.write().await.access_token = Some(token);
        Ok(())
    }

    async fn clear_access_token(&self) -> Result<()> {
        self.state.write().await.access_token = None;
        Ok(())
    }

    async fn get_locale(&self) -> Option<String> {
        self.state.read().await.locale.clone()
    }

    async fn set_locale(&self, locale: String) -> Result<()> {
        self.state.write().await.locale = Some(locale);
        Ok(())
    }
}
