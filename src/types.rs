//! Core types and structures for domain-toolkit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw sub-scores behind a valuation, kept for display and audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationFactors {
    pub length: usize,
    pub tld: String,
    pub keyword_score: i32,
    pub brandability_score: i32,
    pub market_score: i32,
}

/// Human-readable label for each valuation factor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationBreakdown {
    pub length: String,
    pub tld: String,
    pub keywords: String,
    pub brandability: String,
    pub market: String,
}

/// Outcome of a single domain valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    pub domain: String,
    pub score: u32,
    pub estimated_value: u64,
    pub factors: ValuationFactors,
    pub breakdown: ValuationBreakdown,
    pub timestamp: DateTime<Utc>,
}

impl ValuationResult {
    /// Coarse quality band used by the CLI
    pub fn grade(&self) -> ValuationGrade {
        match self.score {
            80.. => ValuationGrade::Excellent,
            60..=79 => ValuationGrade::Good,
            40..=59 => ValuationGrade::Fair,
            _ => ValuationGrade::Low,
        }
    }
}

/// Quality band derived from a valuation score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationGrade {
    Excellent,
    Good,
    Fair,
    Low,
}

impl std::fmt::Display for ValuationGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValuationGrade::Excellent => write!(f, "excellent"),
            ValuationGrade::Good => write!(f, "good"),
            ValuationGrade::Fair => write!(f, "fair"),
            ValuationGrade::Low => write!(f, "low"),
        }
    }
}

/// Availability answer from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub domain: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub period: Option<u32>,
}

/// Curated domain suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub domain: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub estimation_price: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Suggestion {
    /// Price to show for this suggestion, preferring the estimation
    pub fn display_price(&self) -> Option<f64> {
        self.estimation_price.or(self.price)
    }
}

/// Domain saved by the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Availability check stored in the user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub domain: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
}

impl From<&Availability> for CheckRecord {
    fn from(availability: &Availability) -> Self {
        Self {
            domain: availability.domain.clone(),
            available: availability.available,
            price: availability.price,
            currency: availability.currency.clone(),
            checked_at: Some(Utc::now()),
        }
    }
}

/// Backend ids arrive either as numbers or strings
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
