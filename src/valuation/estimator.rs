//! Heuristic domain valuation
//!
//! Scores a domain from lexical features of its name and TLD, then maps the
//! score to an estimated price. The computation is pure: the only non-derived
//! field of the result is its timestamp.

use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;

use super::labels;
use crate::domain::{DomainParts, DomainValidator};
use crate::error::Result;
use crate::types::{ValuationFactors, ValuationResult};

/// Lowest and highest composite score
pub const MIN_SCORE: i32 = 10;
pub const MAX_SCORE: i32 = 100;

const BRANDABILITY_LIMIT: i32 = 20;
const MARKET_CAP: i32 = 30;
const KEYWORD_POINTS: i32 = 15;

const DEFAULT_TLD_SCORE: i32 = 50;
const DEFAULT_BASE_VALUE: f64 = 500.0;

/// Keywords that add value wherever they appear in the name
pub const PREMIUM_KEYWORDS: &[&str] = &[
    "app", "tech", "ai", "crypto", "bitcoin", "nft", "web", "cloud", "data", "smart",
    "digital", "online", "shop", "store", "buy", "sell", "trade", "money", "pay", "bank",
];

const TECH_TLDS: &[&str] = &["tech", "ai", "dev", "app"];
const TECH_KEYWORDS: &[&str] = &[
    "tech", "app", "soft", "code", "dev", "data", "cloud", "ai", "bot", "cyber",
];

const STARTUP_TLDS: &[&str] = &["io", "co"];
const STARTUP_KEYWORDS: &[&str] = &["hub", "lab", "labs", "ly", "ify", "go", "get", "try", "io", "up"];

const TRENDING_KEYWORDS: &[&str] = &["ai", "ml", "blockchain", "crypto", "nft", "metaverse", "web3"];

/// Quality of a TLD on a 0-100 scale
pub fn tld_score(tld: &str) -> i32 {
    match tld {
        "com" => 100,
        "ai" => 90,
        "io" => 85,
        "net" => 80,
        "org" | "cloud" => 75,
        "co" | "app" => 70,
        "tech" => 65,
        "dev" => 60,
        _ => DEFAULT_TLD_SCORE,
    }
}

/// Typical resale base price for a TLD
pub fn tld_base_value(tld: &str) -> f64 {
    match tld {
        "com" => 1000.0,
        "ai" => 900.0,
        "io" => 800.0,
        "net" | "app" => 600.0,
        "org" => 550.0,
        "co" | "dev" | "cloud" => 500.0,
        "tech" => 450.0,
        _ => DEFAULT_BASE_VALUE,
    }
}

fn length_score(length: usize) -> i32 {
    match length {
        0..=3 => 40,
        4..=5 => 30,
        6..=7 => 20,
        8..=10 => 10,
        _ => 5,
    }
}

fn length_multiplier(length: usize) -> f64 {
    match length {
        0..=3 => 3.0,
        4..=5 => 2.0,
        6..=7 => 1.5,
        8..=10 => 1.2,
        _ => 1.0,
    }
}

fn keyword_score(name: &str) -> i32 {
    let matches = PREMIUM_KEYWORDS.iter().filter(|k| name.contains(*k)).count() as i32;
    matches * KEYWORD_POINTS
}

struct BrandPatterns {
    leading_vowels: Regex,
    vowel_run: Regex,
    leading_consonants: Regex,
    consonant_run: Regex,
}

fn brand_patterns() -> &'static BrandPatterns {
    static PATTERNS: OnceLock<BrandPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        const C: &str = "[bcdfghjklmnpqrstvwxyz]";
        BrandPatterns {
            leading_vowels: Regex::new("^[aeiou]{2}").expect("valid pattern"),
            vowel_run: Regex::new("[aeiou]{3}").expect("valid pattern"),
            leading_consonants: Regex::new(&format!("^{C}{{2}}")).expect("valid pattern"),
            consonant_run: Regex::new(&format!("{C}{{4}}")).expect("valid pattern"),
        }
    })
}

fn has_triple_repeat(name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn brandability_score(name: &str) -> i32 {
    let patterns = brand_patterns();
    let mut score = 0;

    if patterns.leading_vowels.is_match(name) {
        score += 10;
    }
    if patterns.vowel_run.is_match(name) {
        score += 5;
    }
    if patterns.leading_consonants.is_match(name) {
        score += 8;
    }
    if patterns.consonant_run.is_match(name) {
        score -= 5;
    }
    if has_triple_repeat(name) {
        score -= 10;
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        score -= 5;
    }
    if name.contains('-') {
        score -= 8;
    }

    score.clamp(-BRANDABILITY_LIMIT, BRANDABILITY_LIMIT)
}

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name.contains(k))
}

fn market_score(name: &str, tld: &str) -> i32 {
    let mut score = 0;

    if TECH_TLDS.contains(&tld) && contains_any(name, TECH_KEYWORDS) {
        score += 20;
    }
    if STARTUP_TLDS.contains(&tld) && contains_any(name, STARTUP_KEYWORDS) {
        score += 15;
    }
    if contains_any(name, TRENDING_KEYWORDS) {
        score += 25;
    }

    score.min(MARKET_CAP)
}

/// Round a raw price to the granularity of its tier
pub fn round_to_tier(raw: f64) -> u64 {
    let step = if raw < 100.0 {
        10.0
    } else if raw < 1_000.0 {
        50.0
    } else if raw < 10_000.0 {
        100.0
    } else {
        1_000.0
    };
    ((raw / step).round() * step) as u64
}

/// Sub-scores of a domain before they are combined
pub fn compute_factors(parts: &DomainParts) -> ValuationFactors {
    ValuationFactors {
        length: parts.name.chars().count(),
        tld: parts.tld.clone(),
        keyword_score: keyword_score(&parts.name),
        brandability_score: brandability_score(&parts.name),
        market_score: market_score(&parts.name, &parts.tld),
    }
}

/// Composite score, rounded to the nearest integer and clamped to `[MIN_SCORE, MAX_SCORE]`
pub fn composite_score(factors: &ValuationFactors) -> u32 {
    // the TLD term can be fractional (io 8.5, org 7.5)
    let sum = f64::from(length_score(factors.length))
        + f64::from(tld_score(&factors.tld)) / 10.0
        + f64::from(factors.keyword_score)
        + f64::from(factors.brandability_score)
        + f64::from(factors.market_score);
    (sum.round() as i32).clamp(MIN_SCORE, MAX_SCORE) as u32
}

/// Estimated price for a scored domain
pub fn estimated_value(score: u32, factors: &ValuationFactors) -> u64 {
    let base = tld_base_value(&factors.tld);
    let score_multiplier = f64::from(score) / 50.0;
    round_to_tier(base * score_multiplier * length_multiplier(factors.length))
}

/// Estimate the value of a domain.
///
/// Fails only on empty or whitespace-only input.
pub fn estimate(domain_text: &str) -> Result<ValuationResult> {
    let (domain, parts) = DomainValidator::new().parse_loose(domain_text)?;

    let factors = compute_factors(&parts);
    let score = composite_score(&factors);
    let estimated_value = estimated_value(score, &factors);
    let breakdown = labels::breakdown(&factors);

    tracing::debug!(
        domain = %domain,
        score,
        estimated_value,
        keyword_score = factors.keyword_score,
        brandability_score = factors.brandability_score,
        market_score = factors.market_score,
        "Domain valuation computed"
    );

    Ok(ValuationResult {
        domain,
        score,
        estimated_value,
        factors,
        breakdown,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_premium_domain() {
        let result = estimate("ai.com").unwrap();
        assert_eq!(result.domain, "ai.com");
        assert_eq!(result.factors.length, 2);
        assert_eq!(result.factors.keyword_score, 15);
        assert_eq!(result.factors.brandability_score, 10);
        assert_eq!(result.factors.market_score, 25);
        assert_eq!(result.score, 100);
        assert_eq!(result.estimated_value, 6000);
    }

    #[test]
    fn test_long_plain_domain() {
        let result = estimate("averagebusinessname.net").unwrap();
        assert_eq!(result.factors.length, 19);
        assert_eq!(result.factors.keyword_score, 0);
        assert_eq!(result.factors.brandability_score, 0);
        assert_eq!(result.factors.market_score, 0);
        assert_eq!(result.score, 13);
        assert_eq!(result.estimated_value, 150);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(estimate("").is_err());
        assert!(estimate("   ").is_err());
    }

    #[test]
    fn test_fractional_tld_points_round_half_up() {
        // length 7 (20) + io 8.5 = 28.5
        let io = estimate("example.io").unwrap();
        assert_eq!(io.score, 29);
        assert_eq!(io.estimated_value, 700);

        // length 7 (20) + org 7.5 = 27.5
        let org = estimate("example.org").unwrap();
        assert_eq!(org.score, 28);
        assert_eq!(org.estimated_value, 450);
    }

    #[test]
    fn test_empty_name_still_valued() {
        let result = estimate(".com").unwrap();
        assert_eq!(result.domain, ".com");
        assert_eq!(result.factors.length, 0);
        assert_eq!(result.factors.tld, "com");
        // length bucket 40 + com 10
        assert_eq!(result.score, 50);
        assert_eq!(result.estimated_value, 3000);
    }

    #[test]
    fn test_missing_tld_defaults_to_com() {
        let bare = estimate("Nova").unwrap();
        let dotted = estimate("nova.com").unwrap();
        assert_eq!(bare.domain, "nova");
        assert_eq!(bare.factors.tld, "com");
        assert_eq!(bare.score, dotted.score);
        assert_eq!(bare.estimated_value, dotted.estimated_value);
    }

    #[test]
    fn test_brandability_rules() {
        assert_eq!(brandability_score("aeon"), 15);
        assert_eq!(brandability_score("strong"), 8);
        assert_eq!(brandability_score("abcdfg"), -5);
        assert_eq!(brandability_score("baaab"), -5);
        assert_eq!(brandability_score("go4it"), -5);
        assert_eq!(brandability_score("my-site"), 0);
        assert_eq!(brandability_score("azzzz-9"), -20);
    }

    #[test]
    fn test_market_score_is_capped() {
        // tech tld + tech keyword (20) + trending (25)
        assert_eq!(market_score("aibot", "app"), 30);
        assert_eq!(market_score("launchhub", "io"), 15);
        assert_eq!(market_score("launchhub", "com"), 0);
        assert_eq!(market_score("codebase", "dev"), 20);
    }

    #[test]
    fn test_keyword_matches_are_uncapped() {
        // app, web, shop, store
        assert_eq!(keyword_score("webappshopstore"), 60);
    }

    #[test]
    fn test_tier_rounding() {
        assert_eq!(round_to_tier(54.0), 50);
        assert_eq!(round_to_tier(96.0), 100);
        assert_eq!(round_to_tier(783.0), 800);
        assert_eq!(round_to_tier(1_249.0), 1_200);
        assert_eq!(round_to_tier(14_400.0), 14_000);
    }

    #[test]
    fn test_tld_sensitivity() {
        let ai = estimate("example.ai").unwrap();
        let dev = estimate("example.dev").unwrap();
        assert_eq!(ai.factors, ValuationFactors { tld: "ai".to_string(), ..dev.factors.clone() });
        assert!(ai.estimated_value > dev.estimated_value);
    }

    #[test]
    fn test_unknown_tld_uses_defaults() {
        let result = estimate("name.zzz").unwrap();
        assert_eq!(result.factors.tld, "zzz");
        assert_eq!(tld_score("zzz"), 50);
        assert_eq!(tld_base_value("zzz"), 500.0);
    }
}
