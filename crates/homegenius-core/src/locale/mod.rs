//! Localization: locale registry, resolution and formatting helpers.
//!
//! # Module Structure
//!
//! - `registry`: locale configurations, label/placeholder keys
//! - `resolve`: persisted choice / runtime language / default resolution
//! - `format`: price and area rendering
//!
//! The free functions below work against [`Registry::builtin`] and fall back
//! to the default locale for unknown identifiers.
//!
//! ```
//! use homegenius_core::locale::{self, Label};
//!
//! assert_eq!(locale::format_price(1_000_000.0, "en-US"), "$1,000,000");
//! assert_eq!(locale::get_label(Label::Rooms, "de-DE"), "Zimmer");
//! ```

mod format;
mod registry;
mod resolve;

pub use registry::{
    DEFAULT_LOCALE, Label, Labels, LocaleConfig, Placeholder, Placeholders, Registry,
};
pub use resolve::{normalize_language_tag, resolve_locale};

pub fn format_price(amount: f64, locale_id: &str) -> String {
    Registry::builtin().config_or_default(locale_id).format_price(amount)
}

pub fn format_area(area: f64, locale_id: &str) -> String {
    Registry::builtin().config_or_default(locale_id).format_area(area)
}

pub fn get_label(key: Label, locale_id: &str) -> &'static str {
    Registry::builtin().label(key, locale_id)
}

pub fn get_placeholder(key: Placeholder, locale_id: &str) -> &'static str {
    Registry::builtin().placeholder(key, locale_id)
}

/// Registered locale identifiers in declaration order.
pub fn available_locales() -> Vec<&'static str> {
    Registry::builtin().ids().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_formats_like_default() {
        assert_eq!(format_price(1_000_000.0, "xx-XX"), "$1,000,000");
        assert_eq!(format_area(80.0, "xx-XX"), "80 sq ft");
    }

    #[test]
    fn test_get_label() {
        assert_eq!(get_label(Label::Rooms, "de-DE"), "Zimmer");
        assert_eq!(get_label(Label::Rooms, "xx-XX"), get_label(Label::Rooms, DEFAULT_LOCALE));
        assert_eq!(get_placeholder(Placeholder::MinArea, "fr-FR"), "Tout");
    }

    #[test]
    fn test_available_locales() {
        assert_eq!(available_locales().len(), 5);
        assert_eq!(available_locales()[0], "sv-SE");
    }
}
