use anyhow::{Context, Result};
use colored::Colorize;
use homegenius_application::AppContext;
use homegenius_core::locale::Label;
use homegenius_core::property::{PropertyDraft, PropertyId, PropertyPatch, PropertySearchParams};
use serde::de::DeserializeOwned;
use std::path::Path;

use super::{print_properties, print_rows};
use crate::render;

/// Parses `key=value` for `--filter`.
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

fn search_params(
    query: Option<String>,
    filters: &[(String, String)],
    page: Option<u32>,
    limit: Option<u32>,
) -> PropertySearchParams {
    let page = page.map(|value| value.to_string());
    let limit = limit.map(|value| value.to_string());

    let fields = filters
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .chain(query.as_deref().map(|value| ("query", value)))
        .chain(page.as_deref().map(|value| ("page", value)))
        .chain(limit.as_deref().map(|value| ("limit", value)));
    PropertySearchParams::from_form(fields)
}

pub async fn search(
    context: &AppContext,
    query: Option<String>,
    filters: Vec<(String, String)>,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    let locale_id = context.locale().active();
    let params = search_params(query, &filters, page, limit);
    let result = context.catalog().search(params).await;

    println!(
        "{} {} ({}/{})",
        context.locale().label(Label::Search).bold(),
        result.total,
        result.page,
        result.total_pages
    );
    print_properties(&result.properties, locale_id);
    Ok(())
}

pub async fn featured(context: &AppContext, limit: u32) -> Result<()> {
    let featured = context.catalog().load_featured(limit).await;
    println!("{}", context.locale().label(Label::Featured).bold());
    print_properties(&featured.properties, context.locale().active());
    Ok(())
}

pub async fn show(context: &AppContext, id: PropertyId) -> Result<()> {
    let Some(property) = context.catalog().get_by_id(id).await else {
        println!("{}", format!("Property {} not found", id).bright_black());
        return Ok(());
    };

    println!("{}", format!("#{}  {}", property.id, property.title).bold());
    if let Some(description) = &property.description {
        println!("{}", description);
    }
    print_rows(&render::property_details(&property, context.locale().active()));
    Ok(())
}

fn read_json<T: DeserializeOwned>(file: &Path) -> Result<T> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", file.display()))
}

pub async fn create(context: &AppContext, file: &Path) -> Result<()> {
    let draft: PropertyDraft = read_json(file)?;
    let property = context.properties().create(&draft).await?;
    println!("{}", format!("Created property #{}", property.id).green());
    Ok(())
}

pub async fn update(context: &AppContext, id: PropertyId, file: &Path) -> Result<()> {
    let patch: PropertyPatch = read_json(file)?;
    let property = context.properties().update(id, &patch).await?;
    println!("{}", format!("Updated property #{}", property.id).green());
    Ok(())
}

pub async fn delete(context: &AppContext, id: PropertyId) -> Result<()> {
    context.properties().delete(id).await?;
    println!("{}", format!("Deleted property #{}", id).green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("city=Stockholm").unwrap(),
            ("city".to_string(), "Stockholm".to_string())
        );
        assert_eq!(parse_filter("query=a=b").unwrap().1, "a=b");
        assert!(parse_filter("city").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn test_search_params_from_flags() {
        let filters = vec![
            ("min_price".to_string(), "2000000".to_string()),
            ("rooms".to_string(), "many".to_string()),
            ("colour".to_string(), "red".to_string()),
        ];

        let params = search_params(Some("Stockholm".to_string()), &filters, Some(2), None);

        assert_eq!(params.query.as_deref(), Some("Stockholm"));
        assert_eq!(params.min_price, Some(2_000_000.0));
        assert_eq!(params.rooms, None);
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, None);
    }
}
