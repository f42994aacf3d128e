//! Price and area rendering.
//!
//! Mirrors the output of the platform number formatter for the registered
//! number formats: grouping separator, currency symbol and its placement.
//! Prices are always rendered without fractional digits.

use super::registry::{Label, LocaleConfig};

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

/// Digit grouping and sign conventions of one number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberConventions {
    group_separator: &'static str,
    minus_sign: &'static str,
    symbol_first: bool,
}

impl NumberConventions {
    fn for_format(number_format: &str) -> Self {
        match number_format {
            "sv-SE" => Self {
                group_separator: NBSP,
                minus_sign: "\u{2212}",
                symbol_first: false,
            },
            "de-DE" => Self {
                group_separator: ".",
                minus_sign: "-",
                symbol_first: false,
            },
            "fr-FR" => Self {
                group_separator: NARROW_NBSP,
                minus_sign: "-",
                symbol_first: false,
            },
            // en-US, en-GB and anything unknown
            _ => Self {
                group_separator: ",",
                minus_sign: "-",
                symbol_first: true,
            },
        }
    }
}

fn currency_symbol(currency_code: &str, number_format: &str) -> String {
    match (currency_code, number_format) {
        ("USD", "en-US") => "$".to_string(),
        ("USD", _) => "US$".to_string(),
        ("GBP", _) => "£".to_string(),
        ("EUR", _) => "€".to_string(),
        ("SEK", "sv-SE") => "kr".to_string(),
        (code, _) => code.to_string(),
    }
}

/// Inserts `separator` between groups of three digits.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

impl LocaleConfig {
    /// Renders `amount` in the locale's currency, rounded to whole units.
    pub fn format_price(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return amount.to_string();
        }

        let conventions = NumberConventions::for_format(self.number_format);
        let symbol = currency_symbol(self.currency_code, self.number_format);
        let rounded = amount.round();
        let digits = format!("{:.0}", rounded.abs());
        let number = group_digits(&digits, conventions.group_separator);
        let sign = if rounded < 0.0 { conventions.minus_sign } else { "" };

        if conventions.symbol_first {
            // A bare ISO code needs a gap ("SEK 1,000"), a symbol does not ("$1,000").
            let gap = if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
                NBSP
            } else {
                ""
            };
            format!("{sign}{symbol}{gap}{number}")
        } else {
            format!("{sign}{number}{NBSP}{symbol}")
        }
    }

    /// Renders `area` followed by the locale's area unit.
    pub fn format_area(&self, area: f64) -> String {
        format!("{} {}", area, self.labels.get(Label::Area))
    }
}
