pub mod account;
pub mod ai;
pub mod catalog;
pub mod locale;
pub mod recommend;

use colored::Colorize;
use homegenius_core::property::Property;

use crate::render;

/// Prints listings as two-line entries, or a note when there are none.
pub fn print_properties(properties: &[Property], locale_id: &str) {
    if properties.is_empty() {
        println!("{}", "No properties found".bright_black());
        return;
    }
    for property in properties {
        let (heading, facts) = render::property_summary(property, locale_id);
        println!("{}", heading.bold());
        println!("    {}", facts.green());
    }
}

/// Prints `label: value` rows with aligned values.
pub fn print_rows(rows: &[(String, String)]) {
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, value) in rows {
        let padding = width - label.chars().count();
        println!("  {}{}  {}", label.bright_black(), " ".repeat(padding), value);
    }
}
