//! Recommendation domain module.

mod api;

pub use api::{DEFAULT_RECOMMENDATION_LIMIT, RecommendationApi};

use serde::{Deserialize, Serialize};

/// Body of `POST /api/recommendations/feedback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationFeedback {
    pub recommendation_id: i64,
    pub feedback: String,
}
