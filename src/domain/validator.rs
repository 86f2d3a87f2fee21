//! Domain name normalization and validation utilities

use crate::error::{Result, ToolkitError};
use regex::Regex;
use std::sync::OnceLock;

/// TLD assumed when the input has none
pub const DEFAULT_TLD: &str = "com";

/// A domain split on its first dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub name: String,
    pub tld: String,
}

impl DomainParts {
    /// Split normalized text on the first `.`; a missing or empty TLD becomes `com`
    pub fn split(normalized: &str) -> Self {
        match normalized.split_once('.') {
            Some((name, tld)) if !tld.is_empty() => Self {
                name: name.to_string(),
                tld: tld.to_string(),
            },
            Some((name, _)) => Self {
                name: name.to_string(),
                tld: DEFAULT_TLD.to_string(),
            },
            None => Self {
                name: normalized.to_string(),
                tld: DEFAULT_TLD.to_string(),
            },
        }
    }

    /// Full domain as `name.tld`
    pub fn full_domain(&self) -> String {
        format!("{}.{}", self.name, self.tld)
    }
}

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("label pattern is valid")
    })
}

fn tld_regex() -> &'static Regex {
    static TLD: OnceLock<Regex> = OnceLock::new();
    TLD.get_or_init(|| Regex::new(r"^[a-z]{2,63}$").expect("tld pattern is valid"))
}

/// Domain name validator
#[derive(Debug, Clone, Default)]
pub struct DomainValidator;

impl DomainValidator {
    /// Create a new domain validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim and lowercase user input
    pub fn normalize(&self, domain: &str) -> String {
        domain.trim().to_lowercase()
    }

    /// Normalize free text for valuation; only blank input is rejected.
    ///
    /// The name part may be empty (`.com`), which values as a very short name.
    pub fn parse_loose(&self, input: &str) -> Result<(String, DomainParts)> {
        let normalized = self.normalize(input);
        if normalized.is_empty() {
            return Err(ToolkitError::invalid_input("Please enter a domain name"));
        }

        let parts = DomainParts::split(&normalized);
        Ok((normalized, parts))
    }

    /// Strict syntax validation used before asking the backend about a domain
    pub fn validate(&self, domain: &str) -> Result<DomainParts> {
        let domain = self.normalize(domain);

        if domain.is_empty() {
            return Err(ToolkitError::invalid_input("Domain name cannot be empty"));
        }

        if domain.len() > 253 {
            return Err(ToolkitError::invalid_input("Domain name too long (max 253 characters)"));
        }

        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(ToolkitError::invalid_input("Domain cannot start or end with a dot"));
        }

        let (name, tld) = domain
            .rsplit_once('.')
            .ok_or_else(|| ToolkitError::invalid_input(format!("'{}' is missing a TLD", domain)))?;

        for label in name.split('.') {
            if !label_regex().is_match(label) {
                return Err(ToolkitError::invalid_input(format!(
                    "Invalid label '{}' in '{}'",
                    label, domain
                )));
            }
        }

        if !tld_regex().is_match(tld) {
            return Err(ToolkitError::invalid_input(format!("Invalid TLD '{}'", tld)));
        }

        Ok(DomainParts {
            name: name.to_string(),
            tld: tld.to_string(),
        })
    }
}

/// Utility functions for domain input
pub mod utils {
    /// Split user input that may hold several domains
    pub fn parse_domain_input(input: &str) -> Vec<String> {
        input
            .split(&[',', ' ', '\n', '\t'][..])
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
