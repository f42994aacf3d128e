//! Remote AI analysis trait.

use async_trait::async_trait;

use super::model::{AiAnalysis, AnalysisType, ImageAnalysis, ImageUpload, PricePrediction, StyleCategory};
use crate::error::Result;
use crate::property::PropertyId;

/// Access to the backend's `/api/ai` endpoints.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Runs a new analysis of a stored listing.
    async fn analyze_property(
        &self,
        property_id: PropertyId,
        analysis_type: AnalysisType,
    ) -> Result<AiAnalysis>;

    /// Uploads a photo for style and quality analysis.
    async fn analyze_image(&self, upload: ImageUpload) -> Result<ImageAnalysis>;

    /// Past analyses of a listing, optionally restricted to one type.
    async fn property_analyses(
        &self,
        property_id: PropertyId,
        analysis_type: Option<AnalysisType>,
    ) -> Result<Vec<AiAnalysis>>;

    async fn price_prediction(&self, property_id: PropertyId) -> Result<PricePrediction>;

    async fn style_categories(&self) -> Result<Vec<StyleCategory>>;
}
