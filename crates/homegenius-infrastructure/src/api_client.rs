//! HTTP client for the HomeGenius REST API.
//!
//! One [`HttpApiClient`] implements every remote trait of the domain layer.
//! Requests carry the persisted bearer token, except the two auth calls that
//! obtain one. Any 401 answer clears that token and publishes
//! [`ClientEvent::AuthenticationRequired`], whichever call triggered it.

use async_trait::async_trait;
use homegenius_core::analysis::{
    AiAnalysis, AnalysisApi, AnalysisType, ImageAnalysis, ImageUpload, PricePrediction,
    StyleCategory,
};
use homegenius_core::config::ClientConfig;
use homegenius_core::property::{
    Property, PropertyApi, PropertyDraft, PropertyId, PropertyPage, PropertyPatch,
    PropertySearchParams,
};
use homegenius_core::recommendation::{RecommendationApi, RecommendationFeedback};
use homegenius_core::state::StateRepository;
use homegenius_core::user::{
    AccessToken, AuthApi, LoginCredentials, PreferenceBag, RegisterData, User, UserId,
};
use homegenius_core::{ClientEvent, HomeGeniusError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// Whether a request should carry the persisted bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credentials {
    Bearer,
    Anonymous,
}

/// reqwest-backed implementation of the remote API traits.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    state: Arc<dyn StateRepository>,
    events: broadcast::Sender<ClientEvent>,
}

impl HttpApiClient {
    /// Builds a client for `config.api_url` that reads and clears the token
    /// through `state`.
    pub fn new(config: &ClientConfig, state: Arc<dyn StateRepository>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HomeGeniusError::config(format!("Failed to build HTTP client: {}", e)))?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            state,
            events,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Receiver for client events (authentication failures).
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(&self, method: Method, path: &str, credentials: Credentials) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        if credentials == Credentials::Anonymous {
            return request;
        }
        match self.state.get_access_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and turns non-success statuses into errors.
    async fn execute(&self, path: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!("[ApiClient] -> {}", path);
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        tracing::debug!("[ApiClient] <- {} {}", status.as_u16(), path);

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(path).await;
            return Err(HomeGeniusError::AuthFailure);
        }

        let body = response.text().await.unwrap_or_default();
        Err(HomeGeniusError::from_status(status.as_u16(), path, &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let response = self.execute(path, request).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn handle_unauthorized(&self, path: &str) {
        tracing::info!("[ApiClient] 401 from {}, dropping stored token", path);
        if let Err(e) = self.state.clear_access_token().await {
            tracing::warn!("[ApiClient] Failed to clear stored token: {}", e);
        }
        let event = ClientEvent::AuthenticationRequired {
            endpoint: path.to_string(),
        };
        if self.events.send(event).is_err() {
            tracing::debug!("[ApiClient] No listeners for authentication events");
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path, Credentials::Bearer).await;
        self.fetch(path, request).await
    }

    async fn get_with_limit<T: DeserializeOwned>(&self, path: &str, limit: u32) -> Result<T> {
        let request = self
            .request(Method::GET, path, Credentials::Bearer)
            .await
            .query(&[("limit", limit)]);
        self.fetch(path, request).await
    }
}

fn transport_error(err: reqwest::Error) -> HomeGeniusError {
    if err.is_decode() {
        HomeGeniusError::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    } else {
        HomeGeniusError::network(err.to_string())
    }
}

#[async_trait]
impl PropertyApi for HttpApiClient {
    async fn search(&self, params: &PropertySearchParams) -> Result<PropertyPage> {
        let path = "/api/properties/";
        let request = self
            .request(Method::GET, path, Credentials::Bearer)
            .await
            .query(params);
        self.fetch(path, request).await
    }

    async fn get_by_id(&self, id: PropertyId) -> Result<Property> {
        self.get(&format!("/api/properties/{}", id)).await
    }

    async fn featured(&self, limit: u32) -> Result<Vec<Property>> {
        self.get_with_limit("/api/properties/featured/", limit).await
    }

    async fn create(&self, draft: &PropertyDraft) -> Result<Property> {
        let path = "/api/properties/";
        let request = self
            .request(Method::POST, path, Credentials::Bearer)
            .await
            .json(draft);
        self.fetch(path, request).await
    }

    async fn update(&self, id: PropertyId, patch: &PropertyPatch) -> Result<Property> {
        let path = format!("/api/properties/{}", id);
        let request = self
            .request(Method::PUT, &path, Credentials::Bearer)
            .await
            .json(patch);
        self.fetch(&path, request).await
    }

    async fn delete(&self, id: PropertyId) -> Result<()> {
        let path = format!("/api/properties/{}", id);
        let request = self.request(Method::DELETE, &path, Credentials::Bearer).await;
        self.execute(&path, request).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken> {
        let path = "/api/auth/token";
        let request = self
            .request(Method::POST, path, Credentials::Anonymous)
            .await
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ]);
        self.fetch(path, request).await
    }

    async fn register(&self, data: &RegisterData) -> Result<User> {
        let path = "/api/auth/register";
        let request = self
            .request(Method::POST, path, Credentials::Anonymous)
            .await
            .json(data);
        self.fetch(path, request).await
    }

    async fn current_user(&self) -> Result<User> {
        self.get("/api/auth/me").await
    }

    async fn update_preferences(&self, preferences: &PreferenceBag) -> Result<User> {
        let path = "/api/auth/me";
        let request = self
            .request(Method::PUT, path, Credentials::Bearer)
            .await
            .json(&serde_json::json!({ "preferences": preferences }));
        self.fetch(path, request).await
    }
}

#[async_trait]
impl AnalysisApi for HttpApiClient {
    async fn analyze_property(
        &self,
        property_id: PropertyId,
        analysis_type: AnalysisType,
    ) -> Result<AiAnalysis> {
        let path = "/api/ai/analyze-property";
        let request = self
            .request(Method::POST, path, Credentials::Bearer)
            .await
            .json(&serde_json::json!({
                "property_id": property_id,
                "analysis_type": analysis_type,
            }));
        self.fetch(path, request).await
    }

    async fn analyze_image(&self, upload: ImageUpload) -> Result<ImageAnalysis> {
        let path = "/api/ai/analyze-image";
        let mime = mime_guess::from_path(&upload.file_name).first_or_octet_stream();
        let file = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(mime.essence_str())
            .map_err(transport_error)?;

        let mut form = Form::new().part("file", file);
        if let Some(property_id) = upload.property_id {
            form = form.text("property_id", property_id.to_string());
        }
        form = form.text("analysis_type", upload.analysis_type.to_string());

        let request = self
            .request(Method::POST, path, Credentials::Bearer)
            .await
            .multipart(form);
        self.fetch(path, request).await
    }

    async fn property_analyses(
        &self,
        property_id: PropertyId,
        analysis_type: Option<AnalysisType>,
    ) -> Result<Vec<AiAnalysis>> {
        let path = format!("/api/ai/property/{}/analysis", property_id);
        let mut request = self.request(Method::GET, &path, Credentials::Bearer).await;
        if let Some(analysis_type) = analysis_type {
            request = request.query(&[("analysis_type", analysis_type.as_ref())]);
        }
        self.fetch(&path, request).await
    }

    async fn price_prediction(&self, property_id: PropertyId) -> Result<PricePrediction> {
        self.get(&format!("/api/ai/price-prediction/{}", property_id))
            .await
    }

    async fn style_categories(&self) -> Result<Vec<StyleCategory>> {
        self.get("/api/ai/styles/").await
    }
}

#[async_trait]
impl RecommendationApi for HttpApiClient {
    async fn for_user(
        &self,
        user_id: UserId,
        limit: u32,
        recommendation_type: Option<&str>,
    ) -> Result<Vec<Property>> {
        let path = format!("/api/recommendations/user/{}/properties", user_id);
        let mut request = self
            .request(Method::GET, &path, Credentials::Bearer)
            .await
            .query(&[("limit", limit)]);
        if let Some(recommendation_type) = recommendation_type {
            request = request.query(&[("recommendation_type", recommendation_type)]);
        }
        self.fetch(&path, request).await
    }

    async fn style_based(&self, style_keywords: &[String], limit: u32) -> Result<Vec<Property>> {
        let path = "/api/recommendations/style-based";
        let keywords: Vec<(&str, &str)> = style_keywords
            .iter()
            .map(|keyword| ("style_keywords", keyword.as_str()))
            .collect();
        let request = self
            .request(Method::GET, path, Credentials::Bearer)
            .await
            .query(&keywords)
            .query(&[("limit", limit)]);
        self.fetch(path, request).await
    }

    async fn similar(&self, property_id: PropertyId, limit: u32) -> Result<Vec<Property>> {
        self.get_with_limit(&format!("/api/recommendations/similar/{}", property_id), limit)
            .await
    }

    async fn trending(&self, limit: u32) -> Result<Vec<Property>> {
        self.get_with_limit("/api/recommendations/trending", limit)
            .await
    }

    async fn submit_feedback(&self, feedback: &RecommendationFeedback) -> Result<()> {
        let path = "/api/recommendations/feedback";
        let request = self
            .request(Method::POST, path, Credentials::Bearer)
            .await
            .json(feedback);
        self.execute(path, request).await?;
        Ok(())
    }
}
