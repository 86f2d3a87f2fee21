//! Domain Toolkit - domain valuation, availability and idea tooling
//!
//! The valuation heuristic in [`valuation`] is a pure function and can be used
//! on its own. Everything that talks to the backend goes through the traits in
//! [`api`], and [`app::Toolkit`] wires the pieces together.

pub mod ads;
pub mod api;
pub mod app;
pub mod combiner;
pub mod config;
pub mod consent;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod storage;
pub mod types;
pub mod valuation;
pub mod watch;

// Re-export commonly used types
pub use error::{Result, ToolkitError};
pub use types::{
    Availability, CheckRecord, Favorite, Suggestion, ValuationBreakdown, ValuationFactors,
    ValuationGrade, ValuationResult,
};

// Re-export main functionality
pub use app::Toolkit;
pub use config::AppConfig;
pub use valuation::{estimate, ValuationSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
