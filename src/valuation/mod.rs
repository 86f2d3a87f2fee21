//! Domain valuation
//!
//! A fixed scoring function over the name and TLD of a domain, plus a small
//! session wrapper that keeps recent results.

pub mod estimator;
pub mod history;
pub mod labels;

pub use estimator::{estimate, round_to_tier, tld_base_value, tld_score, MAX_SCORE, MIN_SCORE};
pub use history::{ValuationSession, DEFAULT_HISTORY_LIMIT};
