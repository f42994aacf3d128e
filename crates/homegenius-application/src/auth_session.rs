use homegenius_core::user::{AuthApi, LoginCredentials, PreferenceBag, RegisterData, User};
use homegenius_core::state::StateRepository;
use homegenius_core::{ClientEvent, HomeGeniusError, Result};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Where the session stands.
///
/// `Authenticated` is the only state that carries a user, and it is only
/// entered after a token has been persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    /// `initialize` is resolving the persisted token.
    Resolving,
    Authenticated(User),
    Anonymous,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Resolving)
    }
}

/// Owns the signed-in user and keeps it consistent with the persisted token.
///
/// State is published on a watch channel; consumers read it with
/// [`snapshot`](Self::snapshot) or follow it with [`subscribe`](Self::subscribe).
pub struct AuthSessionStore {
    api: Arc<dyn AuthApi>,
    state_repository: Arc<dyn StateRepository>,
    session: watch::Sender<SessionState>,
}

impl AuthSessionStore {
    pub fn new(api: Arc<dyn AuthApi>, state_repository: Arc<dyn StateRepository>) -> Self {
        let (session, _) = watch::channel(SessionState::Uninitialized);
        Self {
            api,
            state_repository,
            session,
        }
    }

    /// Resolves a persisted token into a user.
    ///
    /// Without a token, or when the backend rejects it, the session ends up
    /// `Anonymous` (and the token is dropped). Never leaves `Resolving` behind.
    pub async fn initialize(&self) -> SessionState {
        self.session.send_replace(SessionState::Resolving);

        let next = match self.state_repository.get_access_token().await {
            None => SessionState::Anonymous,
            Some(_) => match self.api.current_user().await {
                Ok(user) => {
                    tracing::info!("[AuthSession] Restored session for {}", user.username);
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    tracing::warn!("[AuthSession] Stored token could not be resolved: {}", e);
                    self.drop_token().await;
                    SessionState::Anonymous
                }
            },
        };

        self.session.send_replace(next.clone());
        next
    }

    /// Exchanges credentials for a token, persists it and loads the user.
    ///
    /// On any failure the session is left as it was and the error returned.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User> {
        let token = self.api.login(credentials).await?;
        self.store_token(token.access_token).await?;

        let user = match self.api.current_user().await {
            Ok(user) => user,
            Err(e) => {
                self.drop_token().await;
                return Err(e);
            }
        };

        tracing::info!("[AuthSession] Logged in as {}", user.username);
        self.session
            .send_replace(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Creates the account, then signs in with the same credentials.
    ///
    /// The session becomes `Authenticated` with the user returned by the
    /// registration call. If the follow-up token request fails, the account
    /// exists but the session is unchanged and the error is returned.
    pub async fn register(&self, data: &RegisterData) -> Result<User> {
        let user = self.api.register(data).await?;
        tracing::info!("[AuthSession] Registered {}", user.username);

        let token = self.api.login(&data.credentials()).await?;
        self.store_token(token.access_token).await?;

        self.session
            .send_replace(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Drops the token and the user together. No network call.
    pub async fn logout(&self) {
        self.drop_token().await;
        self.end_session("logout");
    }

    /// Replaces the account preferences and the stored user.
    ///
    /// An authentication failure ends the session; other failures leave it
    /// untouched.
    pub async fn update_preferences(&self, preferences: &PreferenceBag) -> Result<User> {
        match self.api.update_preferences(preferences).await {
            Ok(user) => {
                self.session.send_if_modified(|state| match state {
                    SessionState::Authenticated(current) => {
                        *current = user.clone();
                        true
                    }
                    _ => false,
                });
                Ok(user)
            }
            Err(e) => {
                if e.is_auth_failure() {
                    self.drop_token().await;
                    self.end_session("preferences update rejected");
                }
                Err(e)
            }
        }
    }

    /// Current state. A session whose token has disappeared from storage
    /// (for instance after a 401 elsewhere) is ended first.
    pub async fn snapshot(&self) -> SessionState {
        let authenticated = self.session.borrow().is_authenticated();
        if authenticated {
            self.end_session_if_token_gone("token removed").await;
        }
        self.session.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    /// Ends the session when the API client reports an authentication
    /// failure and the token is still absent. An event that arrives after a
    /// fresh login finds the new token and leaves that session alone. The
    /// task stops once the event channel closes or the store has been
    /// dropped.
    pub fn listen(self: &Arc<Self>, mut events: broadcast::Receiver<ClientEvent>) -> JoinHandle<()> {
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                let reason = match events.recv().await {
                    Ok(ClientEvent::AuthenticationRequired { endpoint }) => {
                        tracing::debug!("[AuthSession] Authentication required by {}", endpoint);
                        "authentication required"
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!("[AuthSession] Skipped {} client events", skipped);
                        "authentication required"
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                match store.upgrade() {
                    Some(store) => store.end_session_if_token_gone(reason).await,
                    None => break,
                }
            }
        })
    }

    async fn store_token(&self, token: String) -> Result<()> {
        if token.trim().is_empty() {
            return Err(HomeGeniusError::internal("token response carried no access token"));
        }
        self.state_repository.set_access_token(token).await
    }

    async fn drop_token(&self) {
        if let Err(e) = self.state_repository.clear_access_token().await {
            tracing::warn!("[AuthSession] Failed to clear stored token: {}", e);
        }
    }

    async fn end_session_if_token_gone(&self, reason: &str) {
        if self.state_repository.get_access_token().await.is_some() {
            tracing::debug!("[AuthSession] Token present, keeping session ({})", reason);
            return;
        }
        self.end_session(reason);
    }

    fn end_session(&self, reason: &str) {
        let changed = self.session.send_if_modified(|state| {
            if matches!(state, SessionState::Anonymous) {
                return false;
            }
            *state = SessionState::Anonymous;
            true
        });
        if changed {
            tracing::info!("[AuthSession] Session ended ({})", reason);
        }
    }
}

#[cfg(test)]
#[path = "auth_session_test.rs"]
mod tests;
