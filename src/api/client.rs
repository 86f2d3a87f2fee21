//! HTTP JSON client for the backend API

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use super::{DomainApi, ItemEnvelope, ListEnvelope, UserApi};
use crate::error::{Result, ToolkitError};
use crate::types::{Availability, CheckRecord, Favorite, Suggestion};

/// Backend client implementing both API traits
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct FavoriteRequest<'a> {
    domain: &'a str,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("domain-toolkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ToolkitError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/user/favorites/{id}` with the id as a single encoded path segment
    fn favorite_url(&self, id: &str) -> Result<Url> {
        let id = id.trim();
        if id.is_empty() || id == "." || id == ".." {
            return Err(ToolkitError::invalid_input(format!("Invalid favorite id '{}'", id)));
        }

        let mut url = Url::parse(&self.url("/user/favorites"))?;
        url.path_segments_mut()
            .map_err(|_| ToolkitError::config(format!("API base URL '{}' cannot take a path", self.base_url)))?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        let response = self
            .authorize(request)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                let mapped = ToolkitError::from(e);
                tracing::debug!(url = %url, error = %mapped, "Backend request failed");
                mapped
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        tracing::debug!(url = %url, status = status.as_u16(), message = %message, "Backend returned an error");
        Err(ToolkitError::api(message, status.as_u16()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        let response = self.send(self.client.get(&url).query(query), &url).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ToolkitError::parse(e.to_string(), Some(text)))
}

/// Pull `message`/`error`/`detail` out of an error body when it is JSON
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(|s| s.to_string())
}

#[async_trait]
impl DomainApi for HttpApiClient {
    async fn check_availability(&self, domain: &str) -> Result<Availability> {
        let envelope: ItemEnvelope<Availability> = self
            .get_json("/domains/check", &[("domain", domain.to_string())])
            .await?;
        Ok(envelope.into_inner())
    }

    async fn public_suggestions(&self, limit: usize) -> Result<Vec<Suggestion>> {
        let envelope: ListEnvelope<Suggestion> = self
            .get_json("/domains/suggestions/public", &[("limit", limit.to_string())])
            .await?;
        Ok(envelope.into_vec())
    }
}

#[async_trait]
impl UserApi for HttpApiClient {
    async fn favorites(&self) -> Result<Vec<Favorite>> {
        let envelope: ListEnvelope<Favorite> = self.get_json("/user/favorites", &[]).await?;
        Ok(envelope.into_vec())
    }

    async fn add_favorite(&self, domain: &str) -> Result<Favorite> {
        let url = self.url("/user/favorites");
        let request = self.client.post(&url).json(&FavoriteRequest { domain });
        let response = self.send(request, &url).await?;
        let envelope: ItemEnvelope<Favorite> = decode(response).await?;
        Ok(envelope.into_inner())
    }

    async fn remove_favorite(&self, id: &str) -> Result<()> {
        let url = self.favorite_url(id)?;
        self.send(self.client.delete(url.clone()), url.as_str()).await?;
        Ok(())
    }

    async fn checks(&self, limit: usize) -> Result<Vec<CheckRecord>> {
        let envelope: ListEnvelope<CheckRecord> = self
            .get_json("/user/checks", &[("limit", limit.to_string())])
            .await?;
        Ok(envelope.into_vec())
    }

    async fn record_check(&self, record: &CheckRecord) -> Result<()> {
        let url = self.url("/user/checks");
        self.send(self.client.post(&url).json(record), &url).await?;
        Ok(())
    }
}
