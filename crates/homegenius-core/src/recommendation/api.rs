//! Remote recommendation trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::property::{Property, PropertyId};
use crate::user::UserId;

use super::RecommendationFeedback;

pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 10;

/// Access to the backend's `/api/recommendations` endpoints.
#[async_trait]
pub trait RecommendationApi: Send + Sync {
    /// Personal suggestions; `recommendation_type` narrows the strategy
    /// (e.g. `style`, `price`).
    async fn for_user(
        &self,
        user_id: UserId,
        limit: u32,
        recommendation_type: Option<&str>,
    ) -> Result<Vec<Property>>;

    async fn style_based(&self, style_keywords: &[String], limit: u32) -> Result<Vec<Property>>;

    async fn similar(&self, property_id: PropertyId, limit: u32) -> Result<Vec<Property>>;

    async fn trending(&self, limit: u32) -> Result<Vec<Property>>;

    async fn submit_feedback(&self, feedback: &RecommendationFeedback) -> Result<()>;
}
