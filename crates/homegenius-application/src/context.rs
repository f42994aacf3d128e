//! Wiring of the client: one HTTP client shared by every store.

use crate::auth_session::{AuthSessionStore, SessionState};
use crate::locale_service::LocaleService;
use crate::property_catalog::PropertyCatalogStore;
use homegenius_core::Result;
use homegenius_core::analysis::AnalysisApi;
use homegenius_core::config::ClientConfig;
use homegenius_core::property::PropertyApi;
use homegenius_core::recommendation::RecommendationApi;
use homegenius_core::state::StateRepository;
use homegenius_infrastructure::HttpApiClient;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Everything the presentation layer talks to.
///
/// Must be created inside a Tokio runtime: construction spawns the task that
/// ends the session when the API client reports a 401.
pub struct AppContext {
    config: ClientConfig,
    client: Arc<HttpApiClient>,
    session: Arc<AuthSessionStore>,
    catalog: PropertyCatalogStore,
    locale: LocaleService,
    listener: JoinHandle<()>,
}

impl AppContext {
    pub fn new(config: ClientConfig, state_repository: Arc<dyn StateRepository>) -> Result<Self> {
        let client = Arc::new(HttpApiClient::new(&config, state_repository.clone())?);
        let session = Arc::new(AuthSessionStore::new(client.clone(), state_repository.clone()));
        let listener = session.listen(client.subscribe());
        let catalog = PropertyCatalogStore::new(client.clone());
        let locale = LocaleService::new(state_repository, config.language.clone());

        tracing::debug!("[AppContext] Using backend {}", client.base_url());
        Ok(Self {
            config,
            client,
            session,
            catalog,
            locale,
            listener,
        })
    }

    /// Resolves the locale and the persisted session.
    pub async fn start(&self) -> SessionState {
        self.locale.resolve().await;
        self.session.initialize().await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthSessionStore {
        &self.session
    }

    pub fn catalog(&self) -> &PropertyCatalogStore {
        &self.catalog
    }

    pub fn locale(&self) -> &LocaleService {
        &self.locale
    }

    /// Listing create/update/delete, which bypass the catalog store.
    pub fn properties(&self) -> &dyn PropertyApi {
        self.client.as_ref()
    }

    pub fn analysis(&self) -> &dyn AnalysisApi {
        self.client.as_ref()
    }

    pub fn recommendations(&self) -> &dyn RecommendationApi {
        self.client.as_ref()
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ALICE_TOKEN, alice};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use homegenius_core::property::PropertySearchParams;
    use homegenius_core::state::PersistedState;
    use homegenius_infrastructure::InMemoryStateRepository;
    use std::time::Duration;
    use tokio::net::TcpListener;

    /// Resolves the session on `/me` but rejects every listing request.
    async fn backend_with_revoked_listings() -> String {
        let app = Router::new()
            .route("/api/auth/me", get(|| async { Json(alice()) }))
            .route("/api/properties/", get(|| async { StatusCode::UNAUTHORIZED }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_unauthorized_response_ends_the_session() {
        let state = Arc::new(InMemoryStateRepository::with_state(PersistedState {
            access_token: Some(ALICE_TOKEN.to_string()),
            locale: None,
        }));
        let config = ClientConfig {
            api_url: backend_with_revoked_listings().await,
            ..ClientConfig::default()
        };
        let context = AppContext::new(config, state.clone()).unwrap();
        assert_eq!(context.start().await.user(), Some(&alice()));
        let mut session = context.session().subscribe();

        let result = context.catalog().search(PropertySearchParams::default()).await;

        assert!(result.properties.is_empty());
        assert!(!result.loading);
        tokio::time::timeout(Duration::from_secs(1), session.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(*session.borrow(), SessionState::Anonymous);
        assert!(state.get_access_token().await.is_none());
        assert_eq!(context.session().snapshot().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_start_without_token_needs_no_backend() {
        let state = Arc::new(InMemoryStateRepository::with_state(PersistedState {
            access_token: None,
            locale: Some("de-DE".to_string()),
        }));
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        let context = AppContext::new(config, state).unwrap();

        assert_eq!(context.start().await, SessionState::Anonymous);
        assert_eq!(context.locale().active(), "de-DE");
        assert_eq!(context.config().api_url, "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_unresolvable_token_is_dropped() {
        let state = Arc::new(InMemoryStateRepository::with_state(PersistedState {
            access_token: Some("stale".to_string()),
            locale: None,
        }));
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        let context = AppContext::new(config, state.clone()).unwrap();

        assert_eq!(context.start().await, SessionState::Anonymous);
        assert!(state.get_access_token().await.is_none());
    }
}
