//! Display labels for valuation factors

use super::estimator::tld_score;
use crate::types::{ValuationBreakdown, ValuationFactors};

pub fn length_label(length: usize) -> &'static str {
    match length {
        0..=3 => "Premium Short",
        4..=5 => "Short",
        6..=7 => "Medium",
        8..=10 => "Long",
        _ => "Very Long",
    }
}

pub fn tld_label(tld: &str) -> &'static str {
    match tld_score(tld) {
        90.. => "Premium",
        75..=89 => "Popular",
        60..=74 => "Good",
        _ => "Standard",
    }
}

pub fn keyword_label(score: i32) -> &'static str {
    match score {
        30.. => "High Value",
        15..=29 => "Valuable",
        _ => "Generic",
    }
}

pub fn brandability_label(score: i32) -> &'static str {
    match score {
        10.. => "Excellent",
        5..=9 => "Good",
        0..=4 => "Fair",
        _ => "Poor",
    }
}

pub fn market_label(score: i32) -> &'static str {
    match score {
        25.. => "Trending",
        15..=24 => "Strong Demand",
        1..=14 => "Moderate Demand",
        _ => "Niche",
    }
}

pub fn breakdown(factors: &ValuationFactors) -> ValuationBreakdown {
    ValuationBreakdown {
        length: length_label(factors.length).to_string(),
        tld: tld_label(&factors.tld).to_string(),
        keywords: keyword_label(factors.keyword_score).to_string(),
        brandability: brandability_label(factors.brandability_score).to_string(),
        market: market_label(factors.market_score).to_string(),
    }
}
