//! Backend API access
//!
//! The backend owns availability data, curated suggestions and user history.
//! These traits are the only way the rest of the crate talks to it.

pub mod client;

pub use client::HttpApiClient;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::types::{Availability, CheckRecord, Favorite, Suggestion};

/// Public domain endpoints
#[async_trait]
pub trait DomainApi: Send + Sync {
    /// Ask whether a domain can be registered
    async fn check_availability(&self, domain: &str) -> Result<Availability>;

    /// Curated suggestions shown to every visitor
    async fn public_suggestions(&self, limit: usize) -> Result<Vec<Suggestion>>;
}

/// Endpoints scoped to the signed-in user
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn favorites(&self) -> Result<Vec<Favorite>>;

    async fn add_favorite(&self, domain: &str) -> Result<Favorite>;

    async fn remove_favorite(&self, id: &str) -> Result<()>;

    async fn checks(&self, limit: usize) -> Result<Vec<CheckRecord>>;

    async fn record_check(&self, record: &CheckRecord) -> Result<()>;
}

/// List payloads arrive either bare or wrapped in `{ "data": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Wrapped { data } => data,
            ListEnvelope::Bare(items) => items,
        }
    }
}

/// Single objects may also be wrapped in `{ "data": {...} }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            ItemEnvelope::Wrapped { data } => data,
            ItemEnvelope::Bare(item) => item,
        }
    }
}
