use anyhow::{Context, Result};
use colored::Colorize;
use homegenius_application::AppContext;
use homegenius_core::analysis::{AnalysisType, ImageUpload};
use homegenius_core::locale::Label;
use homegenius_core::property::PropertyId;
use std::path::Path;

use super::print_rows;
use crate::render;

pub async fn analyze_property(
    context: &AppContext,
    id: PropertyId,
    analysis_type: AnalysisType,
) -> Result<()> {
    let analysis = context.analysis().analyze_property(id, analysis_type).await?;
    println!(
        "{}",
        format!("{} #{}", context.locale().label(Label::AiAnalysis), id).bold()
    );
    print_rows(&render::analysis(&analysis, context.locale().active()));
    Ok(())
}

pub async fn analyze_image(
    context: &AppContext,
    path: &Path,
    property: Option<PropertyId>,
    analysis_type: AnalysisType,
) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let mut upload = ImageUpload::new(file_name, bytes).with_analysis_type(analysis_type);
    if let Some(property_id) = property {
        upload = upload.for_property(property_id);
    }

    let result = context.analysis().analyze_image(upload).await?;
    println!("{}", context.locale().label(Label::StyleAnalysis).bold());
    print_rows(&[
        ("Styles".to_string(), render::styles(&result.detected_styles)),
        ("Confidence".to_string(), format!("{:.0}%", result.style_confidence * 100.0)),
        ("Quality".to_string(), format!("{:.2}", result.quality_score)),
        ("Analysis".to_string(), format!("#{}", result.analysis_id)),
    ]);
    Ok(())
}

pub async fn history(
    context: &AppContext,
    id: PropertyId,
    analysis_type: Option<AnalysisType>,
) -> Result<()> {
    let analyses = context.analysis().property_analyses(id, analysis_type).await?;
    if analyses.is_empty() {
        println!("{}", format!("No analyses for property #{}", id).bright_black());
        return Ok(());
    }
    for analysis in &analyses {
        println!("{}", format!("Analysis #{}", analysis.id).bold());
        print_rows(&render::analysis(analysis, context.locale().active()));
    }
    Ok(())
}

pub async fn price(context: &AppContext, id: PropertyId) -> Result<()> {
    let prediction = context.analysis().price_prediction(id).await?;
    let mut rows = vec![(
        context.locale().label(Label::PricePrediction).to_string(),
        context.locale().format_price(prediction.predicted_price),
    )];
    if let Some(confidence) = prediction.confidence {
        rows.push(("Confidence".to_string(), format!("{:.0}%", confidence * 100.0)));
    }
    if let Some(factors) = prediction.factors.filter(|factors| !factors.is_empty()) {
        rows.push(("Factors".to_string(), serde_json::Value::Object(factors).to_string()));
    }
    print_rows(&rows);
    Ok(())
}

pub async fn styles(context: &AppContext) -> Result<()> {
    let categories = context.analysis().style_categories().await?;
    for category in categories.iter().filter(|category| category.is_active) {
        println!("{}", category.name.bold());
        if let Some(description) = &category.description {
            println!("    {}", description);
        }
        if let Some(keywords) = category.keywords.as_ref().filter(|k| !k.is_empty()) {
            println!("    {}", keywords.join(", ").bright_black());
        }
    }
    Ok(())
}
