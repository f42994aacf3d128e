//! Static locale registry.
//!
//! Every locale carries a complete label and placeholder set. A blank value
//! counts as missing and is served from the default locale instead.

use once_cell::sync::Lazy;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{HomeGeniusError, Result};

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Label keys shown next to values and as headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Label {
    Rooms,
    Bedrooms,
    Bathrooms,
    /// Doubles as the area unit (`m²`, `sq ft`).
    Area,
    Price,
    Search,
    Featured,
    AiAnalysis,
    StyleAnalysis,
    PricePrediction,
    Recommendations,
}

/// Placeholder keys for search form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Placeholder {
    Search,
    City,
    MinPrice,
    MaxPrice,
    MinArea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub rooms: &'static str,
    pub bedrooms: &'static str,
    pub bathrooms: &'static str,
    pub area: &'static str,
    pub price: &'static str,
    pub search: &'static str,
    pub featured: &'static str,
    pub ai_analysis: &'static str,
    pub style_analysis: &'static str,
    pub price_prediction: &'static str,
    pub recommendations: &'static str,
}

impl Labels {
    pub fn get(&self, key: Label) -> &'static str {
        match key {
            Label::Rooms => self.rooms,
            Label::Bedrooms => self.bedrooms,
            Label::Bathrooms => self.bathrooms,
            Label::Area => self.area,
            Label::Price => self.price,
            Label::Search => self.search,
            Label::Featured => self.featured,
            Label::AiAnalysis => self.ai_analysis,
            Label::StyleAnalysis => self.style_analysis,
            Label::PricePrediction => self.price_prediction,
            Label::Recommendations => self.recommendations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub search: &'static str,
    pub city: &'static str,
    pub min_price: &'static str,
    pub max_price: &'static str,
    pub min_area: &'static str,
}

impl Placeholders {
    pub fn get(&self, key: Placeholder) -> &'static str {
        match key {
            Placeholder::Search => self.search,
            Placeholder::City => self.city,
            Placeholder::MinPrice => self.min_price,
            Placeholder::MaxPrice => self.max_price,
            Placeholder::MinArea => self.min_area,
        }
    }
}

/// Display and format configuration of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// BCP 47 identifier, also the registry key
    pub id: &'static str,
    pub country: &'static str,
    pub currency: &'static str,
    /// ISO 4217 code used for price rendering
    pub currency_code: &'static str,
    pub language: &'static str,
    pub date_format: &'static str,
    /// Identifier of the digit grouping / symbol placement conventions
    pub number_format: &'static str,
    pub labels: Labels,
    pub placeholders: Placeholders,
}

/// Ordered set of locales with a designated default.
#[derive(Debug, Clone)]
pub struct Registry {
    locales: Vec<LocaleConfig>,
    default_index: usize,
}

static BUILTIN: Lazy<Registry> = Lazy::new(|| {
    Registry::new(builtin_locales(), DEFAULT_LOCALE).expect("built-in locale registry is incomplete")
});

impl Registry {
    /// Builds a registry and checks it.
    ///
    /// # Errors
    ///
    /// `Config` if `default_locale` is not among `locales`, if an identifier
    /// appears twice, or if the default locale leaves a label or placeholder blank.
    pub fn new(locales: Vec<LocaleConfig>, default_locale: &str) -> Result<Self> {
        let default_index = locales
            .iter()
            .position(|config| config.id == default_locale)
            .ok_or_else(|| {
                HomeGeniusError::config(format!("default locale '{default_locale}' is not registered"))
            })?;
        let registry = Self {
            locales,
            default_index,
        };
        registry.validate()?;
        Ok(registry)
    }

    /// The registry shipped with the client: `sv-SE`, `en-US`, `en-GB`,
    /// `de-DE`, `fr-FR`, defaulting to `en-US`.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    pub fn validate(&self) -> Result<()> {
        for (index, config) in self.locales.iter().enumerate() {
            if self.locales[..index].iter().any(|other| other.id == config.id) {
                return Err(HomeGeniusError::config(format!(
                    "locale '{}' is registered twice",
                    config.id
                )));
            }
        }

        let default = self.default_config();
        for key in Label::iter() {
            if default.labels.get(key).trim().is_empty() {
                return Err(HomeGeniusError::config(format!(
                    "default locale '{}' has no label '{}'",
                    default.id, key
                )));
            }
        }
        for key in Placeholder::iter() {
            if default.placeholders.get(key).trim().is_empty() {
                return Err(HomeGeniusError::config(format!(
                    "default locale '{}' has no placeholder '{}'",
                    default.id, key
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|config| config.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn default_config(&self) -> &LocaleConfig {
        &self.locales[self.default_index]
    }

    pub fn default_id(&self) -> &'static str {
        self.default_config().id
    }

    /// The locale's configuration, or the default locale's if unknown.
    pub fn config_or_default(&self, id: &str) -> &LocaleConfig {
        self.get(id).unwrap_or_else(|| self.default_config())
    }

    /// Registry keys in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.locales.iter().map(|config| config.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleConfig> {
        self.locales.iter()
    }

    pub fn label(&self, key: Label, id: &str) -> &'static str {
        match self.get(id).map(|config| config.labels.get(key)) {
            Some(value) if !value.trim().is_empty() => value,
            _ => self.default_config().labels.get(key),
        }
    }

    pub fn placeholder(&self, key: Placeholder, id: &str) -> &'static str {
        match self.get(id).map(|config| config.placeholders.get(key)) {
            Some(value) if !value.trim().is_empty() => value,
            _ => self.default_config().placeholders.get(key),
        }
    }
}

fn builtin_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            id: "sv-SE",
            country: "Sweden",
            currency: "SEK",
            currency_code: "SEK",
            language: "sv-SE",
            date_format: "sv-SE",
            number_format: "sv-SE",
            labels: Labels {
                rooms: "rum",
                bedrooms: "sovrum",
                bathrooms: "badrum",
                area: "m²",
                price: "Pris",
                search: "Sök",
                featured: "Utvalda bostäder",
                ai_analysis: "AI-analys",
                style_analysis: "Stilanalys",
                price_prediction: "Prisprognos",
                recommendations: "Rekommendationer",
            },
            placeholders: Placeholders {
                search: "Sök efter bostäder, platser eller stilar...",
                city: "Stockholm, Göteborg...",
                min_price: "0",
                max_price: "Ingen gräns",
                min_area: "Valfri",
            },
        },
        LocaleConfig {
            id: "en-US",
            country: "United States",
            currency: "USD",
            currency_code: "USD",
            language: "en-US",
            date_format: "en-US",
            number_format: "en-US",
            labels: Labels {
                rooms: "rooms",
                bedrooms: "bedrooms",
                bathrooms: "bathrooms",
                area: "sq ft",
                price: "Price",
                search: "Search",
                featured: "Featured Properties",
                ai_analysis: "AI Analysis",
                style_analysis: "Style Analysis",
                price_prediction: "Price Prediction",
                recommendations: "Recommendations",
            },
            placeholders: Placeholders {
                search: "Search for properties, locations, or styles...",
                city: "New York, Los Angeles...",
                min_price: "0",
                max_price: "No limit",
                min_area: "Any",
            },
        },
        LocaleConfig {
            id: "en-GB",
            country: "United Kingdom",
            currency: "GBP",
            currency_code: "GBP",
            language: "en-GB",
            date_format: "en-GB",
            number_format: "en-GB",
            labels: Labels {
                rooms: "rooms",
                bedrooms: "bedrooms",
                bathrooms: "bathrooms",
                area: "sq ft",
                price: "Price",
                search: "Search",
                featured: "Featured Properties",
                ai_analysis: "AI Analysis",
                style_analysis: "Style Analysis",
                price_prediction: "Price Prediction",
                recommendations: "Recommendations",
            },
            placeholders: Placeholders {
                search: "Search for properties, locations, or styles...",
                city: "London, Manchester...",
                min_price: "0",
                max_price: "No limit",
                min_area: "Any",
            },
        },
        LocaleConfig {
            id: "de-DE",
            country: "Germany",
            currency: "EUR",
            currency_code: "EUR",
            language: "de-DE",
            date_format: "de-DE",
            number_format: "de-DE",
            labels: Labels {
                rooms: "Zimmer",
                bedrooms: "Schlafzimmer",
                bathrooms: "Badezimmer",
                area: "m²",
                price: "Preis",
                search: "Suchen",
                featured: "Empfohlene Immobilien",
                ai_analysis: "KI-Analyse",
                style_analysis: "Stilanalyse",
                price_prediction: "Preisvorhersage",
                recommendations: "Empfehlungen",
            },
            placeholders: Placeholders {
                search: "Nach Immobilien, Standorten oder Stilen suchen...",
                city: "Berlin, München...",
                min_price: "0",
                max_price: "Keine Grenze",
                min_area: "Beliebig",
            },
        },
        LocaleConfig {
            id: "fr-FR",
            country: "France",
            currency: "EUR",
            currency_code: "EUR",
            language: "fr-FR",
            date_format: "fr-FR",
            number_format: "fr-FR",
            labels: Labels {
                rooms: "pièces",
                bedrooms: "chambres",
                bathrooms: "salles de bain",
                area: "m²",
                price: "Prix",
                search: "Rechercher",
                featured: "Propriétés en vedette",
                ai_analysis: "Analyse IA",
                style_analysis: "Analyse de style",
                price_prediction: "Prédiction de prix",
                recommendations: "Recommandations",
            },
            placeholders: Placeholders {
                search: "Rechercher des propriétés, lieux ou styles...",
                city: "Paris, Lyon...",
                min_price: "0",
                max_price: "Aucune limite",
                min_area: "Tout",
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = Registry::builtin();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.default_id(), "en-US");
    }

    #[test]
    fn test_ids_keep_declaration_order() {
        let ids: Vec<_> = Registry::builtin().ids().collect();
        assert_eq!(ids, vec!["sv-SE", "en-US", "en-GB", "de-DE", "fr-FR"]);
    }

    #[test]
    fn test_label_lookup_and_fallback() {
        let registry = Registry::builtin();
        assert_eq!(registry.label(Label::Rooms, "de-DE"), "Zimmer");
        assert_eq!(registry.label(Label::Rooms, "xx-XX"), "rooms");
        assert_eq!(registry.placeholder(Placeholder::City, "sv-SE"), "Stockholm, Göteborg...");
        assert_eq!(registry.placeholder(Placeholder::MaxPrice, "xx-XX"), "No limit");
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let mut locales = builtin_locales();
        locales[3].labels.featured = "";
        let registry = Registry::new(locales, DEFAULT_LOCALE).unwrap();
        assert_eq!(registry.label(Label::Featured, "de-DE"), "Featured Properties");
        assert_eq!(registry.label(Label::Price, "de-DE"), "Preis");
    }

    #[test]
    fn test_default_missing_key_is_a_config_error() {
        let mut locales = builtin_locales();
        locales[1].placeholders.min_area = " ";
        let err = Registry::new(locales, DEFAULT_LOCALE).unwrap_err();
        assert!(err.to_string().contains("minArea"));
    }

    #[test]
    fn test_unknown_default_is_rejected() {
        let err = Registry::new(builtin_locales(), "nl-NL").unwrap_err();
        assert!(matches!(err, HomeGeniusError::Config(_)));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut locales = builtin_locales();
        locales.push(locales[0].clone());
        assert!(Registry::new(locales, DEFAULT_LOCALE).is_err());
    }

    #[test]
    fn test_label_keys_use_camel_case_names() {
        assert_eq!(Label::AiAnalysis.to_string(), "aiAnalysis");
        assert_eq!(Label::from_str("pricePrediction").unwrap(), Label::PricePrediction);
        assert_eq!(Placeholder::MinPrice.as_ref(), "minPrice");
    }
}
