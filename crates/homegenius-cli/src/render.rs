//! Plain-text rendering of listings and analyses in the active locale.

use homegenius_core::analysis::{AiAnalysis, DetectedStyle};
use homegenius_core::locale::{self, Label};
use homegenius_core::property::Property;

/// `#id  title` on the first line, price and key facts on the second.
pub fn property_summary(property: &Property, locale_id: &str) -> (String, String) {
    let heading = format!("#{}  {}", property.id, property.title);

    let mut facts = vec![locale::format_price(property.price, locale_id)];
    if let Some(rooms) = property.rooms {
        facts.push(format!("{} {}", rooms, locale::get_label(Label::Rooms, locale_id)));
    }
    if let Some(area) = property.area {
        facts.push(locale::format_area(area, locale_id));
    }
    if let Some(city) = &property.city {
        facts.push(city.clone());
    }
    (heading, facts.join(" · "))
}

/// Labelled fields for the detail view; absent fields are skipped.
pub fn property_details(property: &Property, locale_id: &str) -> Vec<(String, String)> {
    let label = |key| locale::get_label(key, locale_id).to_string();
    let mut rows = vec![(
        label(Label::Price),
        locale::format_price(property.price, locale_id),
    )];

    if let Some(area) = property.area {
        rows.push((label(Label::Area), locale::format_area(area, locale_id)));
    }
    for (key, value) in [
        (Label::Rooms, property.rooms),
        (Label::Bedrooms, property.bedrooms),
        (Label::Bathrooms, property.bathrooms),
    ] {
        if let Some(value) = value {
            rows.push((label(key), value.to_string()));
        }
    }

    let address = [
        property.address.as_deref(),
        property.postal_code.as_deref(),
        property.city.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");
    if !address.is_empty() {
        rows.push(("Address".to_string(), address));
    }
    if let Some(kind) = &property.property_type {
        rows.push(("Type".to_string(), kind.clone()));
    }
    if let Some(year) = property.year_built {
        rows.push(("Built".to_string(), year.to_string()));
    }
    rows
}

pub fn styles(styles: &[DetectedStyle]) -> String {
    styles
        .iter()
        .map(|style| format!("{} {}%", style.style, style.percent()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn analysis(analysis: &AiAnalysis, locale_id: &str) -> Vec<(String, String)> {
    let mut rows = vec![("Type".to_string(), analysis.analysis_type.to_string())];
    if let Some(price) = analysis.predicted_price {
        let mut value = locale::format_price(price, locale_id);
        if let Some(confidence) = analysis.price_confidence {
            value.push_str(&format!(" ({:.0}%)", confidence * 100.0));
        }
        rows.push((locale::get_label(Label::PricePrediction, locale_id).to_string(), value));
    }
    if let Some(detected) = analysis.detected_styles.as_deref().filter(|s| !s.is_empty()) {
        rows.push((
            locale::get_label(Label::StyleAnalysis, locale_id).to_string(),
            styles(detected),
        ));
    }
    if let Some(score) = analysis.quality_score {
        rows.push(("Quality".to_string(), format!("{:.2}", score)));
    }
    rows.push(("Created".to_string(), analysis.created_at.clone()));
    rows
}
