//! Composition root
//!
//! [`Toolkit`] wires configuration, backend access, storage and the ad host
//! together and exposes the operations the front-end screens need.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

use crate::ads::{AdLoader, AdSlot, ScriptHost};
use crate::api::{DomainApi, HttpApiClient, UserApi};
use crate::config::AppConfig;
use crate::consent::{ConsentCategory, ConsentManager};
use crate::domain::DomainValidator;
use crate::error::Result;
use crate::pricing;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::types::{Availability, CheckRecord, Favorite, Suggestion, ValuationResult};
use crate::valuation::ValuationSession;
use crate::watch::{NavigationKind, WatchParams, WatchView};

pub struct Toolkit {
    config: AppConfig,
    domains: Arc<dyn DomainApi>,
    users: Arc<dyn UserApi>,
    validator: DomainValidator,
    valuations: ValuationSession,
    consent: ConsentManager,
    ads: AdLoader,
}

impl Toolkit {
    pub fn new(
        config: AppConfig,
        domains: Arc<dyn DomainApi>,
        users: Arc<dyn UserApi>,
        store: Arc<dyn KeyValueStore>,
        script_host: Arc<dyn ScriptHost>,
    ) -> Self {
        let valuations = ValuationSession::with_limit(config.history_limit);
        let ads = AdLoader::new(config.ads.clone(), script_host);

        Self {
            config,
            domains,
            users,
            validator: DomainValidator::new(),
            valuations,
            consent: ConsentManager::new(store),
            ads,
        }
    }

    /// Build with the HTTP backend client and the configured storage
    pub fn from_config(config: AppConfig, script_host: Arc<dyn ScriptHost>) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(HttpApiClient::new(
            config.api_base_url.clone(),
            config.api_token.clone(),
            config.request_timeout,
        )?);

        let store: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => Arc::new(JsonFileStore::new(path.clone())),
            None => Arc::new(MemoryStore::new()),
        };

        Ok(Self::new(config, client.clone(), client, store, script_host))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn consent(&self) -> &ConsentManager {
        &self.consent
    }

    // --- valuation ---

    pub fn estimate(&self, domain_text: &str) -> Result<ValuationResult> {
        self.valuations.estimate(domain_text)
    }

    pub fn valuation_history(&self) -> Vec<ValuationResult> {
        self.valuations.history()
    }

    // --- availability ---

    /// Check one domain and add it to the user's history.
    ///
    /// Failing to record the check does not fail the check.
    pub async fn check_domain(&self, domain: &str) -> Result<Availability> {
        let parts = self.validator.validate(domain)?;
        let domain = parts.full_domain();
        let start = Instant::now();

        let availability = self.domains.check_availability(&domain).await?;

        tracing::debug!(
            domain = %domain,
            available = availability.available,
            duration_ms = %start.elapsed().as_millis(),
            "Availability check completed"
        );

        if let Err(e) = self.users.record_check(&CheckRecord::from(&availability)).await {
            tracing::warn!(domain = %domain, error = %e, "Failed to record domain check");
        }

        Ok(availability)
    }

    /// Check several domains concurrently; failed checks are logged and left out
    pub async fn check_domains(&self, domains: &[String]) -> Vec<Availability> {
        let batch_start = Instant::now();
        let results = join_all(domains.iter().map(|d| self.check_domain(d))).await;

        let mut checked = Vec::with_capacity(results.len());
        let mut error_count = 0u32;
        for (domain, result) in domains.iter().zip(results) {
            match result {
                Ok(availability) => checked.push(availability),
                Err(e) => {
                    error_count += 1;
                    tracing::warn!(domain = %domain, error = %e, "Failed to check domain");
                }
            }
        }

        tracing::info!(
            domains_requested = domains.len(),
            domains_processed = checked.len(),
            errors = error_count,
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "Batch availability check completed"
        );

        checked
    }

    // --- lists that degrade to empty ---

    pub async fn suggestions(&self, limit: usize) -> Vec<Suggestion> {
        self.domains.public_suggestions(limit).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load suggestions");
            Vec::new()
        })
    }

    pub async fn favorites(&self) -> Vec<Favorite> {
        self.users.favorites().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load favorites");
            Vec::new()
        })
    }

    pub async fn recent_checks(&self, limit: usize) -> Vec<CheckRecord> {
        self.users.checks(limit).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load recent checks");
            Vec::new()
        })
    }

    // --- favorites ---

    pub async fn add_favorite(&self, domain: &str) -> Result<Favorite> {
        let parts = self.validator.validate(domain)?;
        self.users.add_favorite(&parts.full_domain()).await
    }

    pub async fn remove_favorite(&self, id: &str) -> Result<()> {
        self.users.remove_favorite(id).await
    }

    // --- ads, watch, prices ---

    /// Fill an ad slot when marketing cookies are allowed
    pub fn place_ad(&self, slot: &AdSlot) -> bool {
        if !self.consent.allows(ConsentCategory::Marketing) {
            tracing::debug!(slot = %slot.slot_id, "Skipping ad slot without marketing consent");
            return false;
        }
        self.ads.place(slot)
    }

    pub fn resolve_watch(&self, query: &str, navigation: NavigationKind) -> WatchView {
        WatchParams::from_query(query).resolve(navigation, &self.config.home_url)
    }

    /// Render a backend price using the configured unit scale
    pub fn display_price(&self, raw: f64, currency: Option<&str>) -> String {
        pricing::display_price(raw, currency, self.config.price_scale)
    }
}
