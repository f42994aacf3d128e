//! AI analysis domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::property::PropertyId;

/// Kind of analysis requested from the inference service.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnalysisType {
    Price,
    Style,
    /// Price and style together. Default for property analyses.
    #[default]
    Combined,
}

/// One detected architectural/interior style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedStyle {
    pub style: String,
    /// 0.0 ..= 1.0
    pub confidence: f64,
}

impl DetectedStyle {
    /// Confidence as a whole percentage, the way listings show it.
    pub fn percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Stored result of `POST /api/ai/analyze-property`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub id: i64,
    pub property_id: PropertyId,
    #[serde(default)]
    pub predicted_price: Option<f64>,
    #[serde(default)]
    pub price_confidence: Option<f64>,
    #[serde(default)]
    pub price_factors: Option<Map<String, Value>>,
    #[serde(default)]
    pub detected_styles: Option<Vec<DetectedStyle>>,
    #[serde(default)]
    pub style_confidence: Option<f64>,
    #[serde(default)]
    pub style_features: Option<Map<String, Value>>,
    #[serde(default)]
    pub image_analysis: Option<Map<String, Value>>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub model_version: Option<String>,
    pub analysis_type: AnalysisType,
    /// Seconds spent in inference
    #[serde(default)]
    pub processing_time: Option<f64>,
    pub created_at: String,
}

/// Response of `POST /api/ai/analyze-image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub analysis_id: i64,
    #[serde(default)]
    pub detected_styles: Vec<DetectedStyle>,
    pub style_confidence: f64,
    pub quality_score: f64,
    pub processing_time: f64,
    #[serde(default)]
    pub recommendations: Option<Vec<Map<String, Value>>>,
}

/// Response of `GET /api/ai/price-prediction/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub predicted_price: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub factors: Option<Map<String, Value>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: String,
}

/// A photo to send to `POST /api/ai/analyze-image`.
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub property_id: Option<PropertyId>,
    pub analysis_type: AnalysisType,
}

impl ImageUpload {
    /// An upload with the image-analysis default type (`style`).
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            property_id: None,
            analysis_type: AnalysisType::Style,
        }
    }

    pub fn for_property(mut self, property_id: PropertyId) -> Self {
        self.property_id = Some(property_id);
        self
    }

    pub fn with_analysis_type(mut self, analysis_type: AnalysisType) -> Self {
        self.analysis_type = analysis_type;
        self
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("property_id", &self.property_id)
            .field("analysis_type", &self.analysis_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_analysis_type_wire_names() {
        assert_eq!(AnalysisType::Combined.to_string(), "combined");
        assert_eq!(AnalysisType::from_str("style").unwrap(), AnalysisType::Style);
        assert_eq!(AnalysisType::default(), AnalysisType::Combined);
        assert_eq!(serde_json::to_string(&AnalysisType::Price).unwrap(), "\"price\"");
    }

    #[test]
    fn test_image_upload_defaults_to_style() {
        let upload = ImageUpload::new("kitchen.jpg", vec![1, 2, 3]).for_property(4);
        assert_eq!(upload.analysis_type, AnalysisType::Style);
        assert_eq!(upload.property_id, Some(4));
    }

    #[test]
    fn test_detected_style_percent_is_clamped() {
        let style = DetectedStyle { style: "scandinavian".to_string(), confidence: 0.856 };
        assert_eq!(style.percent(), 86);
        let bogus = DetectedStyle { style: "modern".to_string(), confidence: 1.7 };
        assert_eq!(bogus.percent(), 100);
    }
}
