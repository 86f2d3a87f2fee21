//! In-memory valuation history

use parking_lot::RwLock;
use std::collections::VecDeque;

use super::estimator::estimate;
use crate::error::Result;
use crate::types::ValuationResult;

/// Default number of results kept
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Estimator front that remembers the most recent results, newest first.
///
/// History lives only as long as the session; nothing is persisted.
#[derive(Debug)]
pub struct ValuationSession {
    history: RwLock<VecDeque<ValuationResult>>,
    limit: usize,
}

impl ValuationSession {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            history: RwLock::new(VecDeque::with_capacity(limit)),
            limit,
        }
    }

    /// Estimate and record the result; invalid input leaves history untouched
    pub fn estimate(&self, domain_text: &str) -> Result<ValuationResult> {
        let result = estimate(domain_text)?;
        self.record(result.clone());
        Ok(result)
    }

    fn record(&self, result: ValuationResult) {
        if self.limit == 0 {
            return;
        }
        let mut history = self.history.write();
        history.push_front(result);
        history.truncate(self.limit);
    }

    /// Snapshot of the history, newest first
    pub fn history(&self) -> Vec<ValuationResult> {
        self.history.read().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<ValuationResult> {
        self.history.read().front().cloned()
    }

    pub fn clear(&self) {
        self.history.write().clear();
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for ValuationSession {
    fn default() -> Self {
        Self::new()
    }
}
