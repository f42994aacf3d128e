//! Mock remote APIs shared by the store tests.

use async_trait::async_trait;
use homegenius_core::property::{
    Property, PropertyApi, PropertyDraft, PropertyId, PropertyPage, PropertyPatch,
    PropertySearchParams,
};
use homegenius_core::state::StateRepository;
use homegenius_core::user::{AccessToken, AuthApi, LoginCredentials, PreferenceBag, RegisterData, User};
use homegenius_core::{HomeGeniusError, Result};
use homegenius_infrastructure::InMemoryStateRepository;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const ALICE_TOKEN: &str = "tok-alice";
pub const ALICE_PASSWORD: &str = "secret";

pub fn alice() -> User {
    User {
        id: 7,
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
        full_name: Some("Alice Andersson".to_string()),
        is_active: true,
        is_verified: true,
        preferences: None,
        created_at: "2024-01-01T00:00:00".to_string(),
        last_login: None,
    }
}

pub fn property(id: PropertyId, city: &str) -> Property {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Listing {}", id),
        "price": 3_500_000.0,
        "city": city,
        "created_at": "2024-05-01T10:00:00",
    }))
    .unwrap()
}

/// Accepts alice/secret, and resolves only alice's token on `/me`.
pub struct MockAuthApi {
    state: Arc<InMemoryStateRepository>,
    pub fail_current_user: AtomicBool,
    pub preference_error: Mutex<Option<HomeGeniusError>>,
    pub login_calls: AtomicUsize,
}

impl MockAuthApi {
    pub fn new(state: Arc<InMemoryStateRepository>) -> Self {
        Self {
            state,
            fail_current_user: AtomicBool::new(false),
            preference_error: Mutex::new(None),
            login_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if credentials.password != ALICE_PASSWORD {
            return Err(HomeGeniusError::AuthFailure);
        }
        Ok(AccessToken {
            access_token: ALICE_TOKEN.to_string(),
            token_type: "bearer".to_string(),
            expires_in: Some(1800),
        })
    }

    async fn register(&self, data: &RegisterData) -> Result<User> {
        if data.username == "taken" {
            return Err(HomeGeniusError::Validation {
                status: 400,
                detail: "Username already registered".to_string(),
            });
        }
        Ok(User {
            username: data.username.clone(),
            email: data.email.clone(),
            full_name: data.full_name.clone(),
            ..alice()
        })
    }

    async fn current_user(&self) -> Result<User> {
        if self.fail_current_user.load(Ordering::SeqCst) {
            return Err(HomeGeniusError::Server {
                status: 503,
                detail: "unavailable".to_string(),
            });
        }
        match self.state.get_access_token().await.as_deref() {
            Some(ALICE_TOKEN) => Ok(alice()),
            _ => Err(HomeGeniusError::AuthFailure),
        }
    }

    async fn update_preferences(&self, preferences: &PreferenceBag) -> Result<User> {
        if let Some(e) = self.preference_error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(User {
            preferences: Some(preferences.clone()),
            ..alice()
        })
    }
}

/// Scripted search responses. Each `search` call pops the next script entry;
/// an entry may hold its answer back until the test releases it.
#[derive(Default)]
pub struct MockPropertyApi {
    pub searches: Mutex<VecDeque<ScriptedSearch>>,
    pub featured: Mutex<VecDeque<Result<Vec<Property>>>>,
    pub calls: AtomicUsize,
}

pub struct ScriptedSearch {
    pub response: Result<PropertyPage>,
    pub gate: Option<oneshot::Receiver<()>>,
}

impl ScriptedSearch {
    pub fn ready(response: Result<PropertyPage>) -> Self {
        Self {
            response,
            gate: None,
        }
    }

    /// Answers only after the returned sender fires (or is dropped).
    pub fn gated(response: Result<PropertyPage>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                response,
                gate: Some(rx),
            },
            tx,
        )
    }
}

impl MockPropertyApi {
    pub fn push_search(&self, search: ScriptedSearch) {
        self.searches.lock().unwrap().push_back(search);
    }

    pub fn push_featured(&self, response: Result<Vec<Property>>) {
        self.featured.lock().unwrap().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn page(properties: Vec<Property>) -> PropertyPage {
    PropertyPage {
        total: properties.len() as u64,
        page: 1,
        limit: 20,
        total_pages: 1,
        properties,
    }
}

#[async_trait]
impl PropertyApi for MockPropertyApi {
    async fn search(&self, _params: &PropertySearchParams) -> Result<PropertyPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.searches.lock().unwrap().pop_front();
        let Some(scripted) = scripted else {
            return Err(HomeGeniusError::network("no scripted response"));
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.response
    }

    async fn get_by_id(&self, id: PropertyId) -> Result<Property> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match id {
            1 => Ok(property(1, "Stockholm")),
            500 => Err(HomeGeniusError::Server {
                status: 500,
                detail: "boom".to_string(),
            }),
            _ => Err(HomeGeniusError::not_found(format!("/api/properties/{}", id))),
        }
    }

    async fn featured(&self, _limit: u32) -> Result<Vec<Property>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.featured
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HomeGeniusError::network("no scripted response")))
    }

    async fn create(&self, _draft: &PropertyDraft) -> Result<Property> {
        Err(HomeGeniusError::internal("not scripted"))
    }

    async fn update(&self, _id: PropertyId, _patch: &PropertyPatch) -> Result<Property> {
        Err(HomeGeniusError::internal("not scripted"))
    }

    async fn delete(&self, _id: PropertyId) -> Result<()> {
        Err(HomeGeniusError::internal("not scripted"))
    }
}
