//! Word combiner - turns keywords into ranked domain ideas

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::DEFAULT_TLD;
use crate::error::{Result, ToolkitError};
use crate::valuation::estimate;

/// Combination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineConfig {
    /// Also produce `first-second` forms
    pub hyphenate: bool,
    /// Upper bound on returned ideas
    pub max_results: usize,
    /// Ideas with a longer name are skipped
    pub max_name_length: usize,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            hyphenate: false,
            max_results: 50,
            max_name_length: 63,
        }
    }
}

/// A scored domain idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainIdea {
    pub name: String,
    pub tld: String,
    pub full_domain: String,
    pub score: u32,
    pub estimated_value: u64,
}

/// Builds domain ideas from keyword pairs
#[derive(Debug, Clone, Default)]
pub struct WordCombiner {
    config: CombineConfig,
}

impl WordCombiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CombineConfig) -> Self {
        Self { config }
    }

    /// Lowercase, keep ASCII alphanumerics, drop empty and repeated words
    pub fn sanitize_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        words
            .iter()
            .map(|w| {
                w.as_ref()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }

    fn candidate_names(&self, words: &[String]) -> Vec<String> {
        let mut names = Vec::new();
        for (i, first) in words.iter().enumerate() {
            for (j, second) in words.iter().enumerate() {
                if i == j {
                    continue;
                }
                names.push(format!("{}{}", first, second));
                if self.config.hyphenate {
                    names.push(format!("{}-{}", first, second));
                }
            }
        }
        names.retain(|n| n.len() <= self.config.max_name_length);
        names
    }

    /// Every ordered pair of distinct words under every TLD, best first.
    ///
    /// Needs at least two usable words. An empty TLD list means `.com`.
    pub fn combine<S: AsRef<str>>(&self, words: &[S], tlds: &[String]) -> Result<Vec<DomainIdea>> {
        let words = Self::sanitize_words(words);
        if words.len() < 2 {
            return Err(ToolkitError::invalid_input("Enter at least two different words to combine"));
        }

        let tlds: Vec<String> = if tlds.is_empty() {
            vec![DEFAULT_TLD.to_string()]
        } else {
            tlds.iter()
                .map(|t| t.trim().trim_start_matches('.').to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        };

        let mut ideas = Vec::new();
        for name in self.candidate_names(&words) {
            for tld in &tlds {
                let full_domain = format!("{}.{}", name, tld);
                let valuation = estimate(&full_domain)?;
                ideas.push(DomainIdea {
                    name: name.clone(),
                    tld: tld.clone(),
                    full_domain,
                    score: valuation.score,
                    estimated_value: valuation.estimated_value,
                });
            }
        }

        ideas.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.estimated_value.cmp(&a.estimated_value))
                .then_with(|| a.full_domain.cmp(&b.full_domain))
        });
        ideas.truncate(self.config.max_results);

        tracing::debug!(
            words = words.len(),
            tlds = tlds.len(),
            ideas = ideas.len(),
            "Word combination completed"
        );

        Ok(ideas)
    }

    /// Pick one idea at random
    pub fn pick_random<'a, R: Rng + ?Sized>(ideas: &'a [DomainIdea], rng: &mut R) -> Option<&'a DomainIdea> {
        ideas.choose(rng)
    }
}
