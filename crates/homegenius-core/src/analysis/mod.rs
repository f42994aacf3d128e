//! AI analysis domain module (price prediction, style detection, image scoring).

mod api;
mod model;

pub use api::AnalysisApi;
pub use model::{
    AiAnalysis, AnalysisType, DetectedStyle, ImageAnalysis, ImageUpload, PricePrediction,
    StyleCategory,
};
