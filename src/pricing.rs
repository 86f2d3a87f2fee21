//! Price scaling and display

use serde::{Deserialize, Serialize};

/// How raw backend prices map to currency units.
///
/// `Legacy` reproduces the old storefront rule where any amount above 1000 was
/// assumed to be in ten-thousandths of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceScale {
    #[default]
    Units,
    Legacy,
}

impl PriceScale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "units" | "unit" => Some(Self::Units),
            "legacy" => Some(Self::Legacy),
            _ => None,
        }
    }

    /// Convert a raw backend amount into currency units
    pub fn apply(self, raw: f64) -> f64 {
        match self {
            Self::Units => raw,
            Self::Legacy if raw > 1000.0 => raw / 10_000.0,
            Self::Legacy => raw,
        }
    }
}

impl std::fmt::Display for PriceScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceScale::Units => write!(f, "units"),
            PriceScale::Legacy => write!(f, "legacy"),
        }
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render an amount already in currency units
pub fn format_price(amount: f64, currency: &str) -> String {
    let amount = amount.max(0.0);
    let number = if amount >= 1000.0 {
        group_thousands(amount.round() as u64)
    } else {
        format!("{:.2}", amount)
    };

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}", symbol, number),
        None => format!("{} {}", number, currency.to_uppercase()),
    }
}

/// Scale a raw backend price, then render it; USD when no currency is given
pub fn display_price(raw: f64, currency: Option<&str>, scale: PriceScale) -> String {
    format_price(scale.apply(raw), currency.unwrap_or("USD"))
}
