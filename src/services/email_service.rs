use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::info;
use serde_json::Value;

use crate::models::email::{EmailRecord, EmailsResponse, FetchEmailsRequest, InboxStats};

/// Client for the upstream email backend. Cheap to clone; clones share the
/// email cache.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<Mutex<Option<CachedEmails>>>,
    cache_ttl: Duration,
}

struct CachedEmails {
    fetched_at: Instant,
    emails: Vec<EmailRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),
}

impl UpstreamClient {
    pub fn new(base_url: String, cache_ttl: Duration) -> Self {
        UpstreamClient {
            http: reqwest::Client::new(),
            base_url,
            cache: Arc::new(Mutex::new(None)),
            cache_ttl,
        }
    }

    /// Returns the email list, served from the cache while it is fresh.
    pub async fn emails(&self) -> Result<Vec<EmailRecord>, UpstreamError> {
        if let Some(cached) = self.cached_emails() {
            return Ok(cached);
        }

        let response = self
            .http
            .get(format!("{}/api/emails", self.base_url))
            .send()
            .await
            .map_err(|e| UpstreamError::Connection(e.to_string()))?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }
        let body: EmailsResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let mut cache = self.cache.lock().unwrap();
        *cache = Some(CachedEmails {
            fetched_at: Instant::now(),
            emails: body.emails.clone(),
        });
        Ok(body.emails)
    }

    pub async fn stats(&self) -> Result<InboxStats, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/api/stats", self.base_url))
            .send()
            .await
            .map_err(|e| UpstreamError::Connection(e.to_string()))?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// Triggers backend ingestion. The response body is opaque and passed
    /// through; the only local effect is dropping the cached email view.
    pub async fn trigger_fetch(&self, request: &FetchEmailsRequest) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/api/fetch-emails", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::Connection(e.to_string()))?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        info!("email fetch triggered upstream; invalidating cached views");
        self.invalidate_cache();
        Ok(body)
    }

    pub fn invalidate_cache(&self) {
        let mut cache = self.cache.lock().unwrap();
        *cache = None;
    }

    fn cached_emails(&self) -> Option<Vec<EmailRecord>> {
        let cache = self.cache.lock().unwrap();
        cache
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < self.cache_ttl)
            .map(|c| c.emails.clone())
    }

    #[cfg(test)]
    fn seed_cache(&self, emails: Vec<EmailRecord>) {
        let mut cache = self.cache.lock().unwrap();
        *cache = Some(CachedEmails {
            fetched_at: Instant::now(),
            emails,
        });
    }
}

// Trait mirror of the client surface so handler-level logic can be exercised
// against a scripted source in tests.
#[cfg(test)]
#[async_trait::async_trait]
pub trait EmailSource {
    async fn emails(&self) -> Result<Vec<EmailRecord>, UpstreamError>;
    async fn stats(&self) -> Result<InboxStats, UpstreamError>;
    async fn trigger_fetch(&self, request: &FetchEmailsRequest) -> Result<Value, UpstreamError>;
}

#[cfg(test)]
#[async_trait::async_trait]
impl EmailSource for UpstreamClient {
    async fn emails(&self) -> Result<Vec<EmailRecord>, UpstreamError> {
        self.emails().await
    }

    async fn stats(&self) -> Result<InboxStats, UpstreamError> {
        self.stats().await
    }

    async fn trigger_fetch(&self, request: &FetchEmailsRequest) -> Result<Value, UpstreamError> {
        self.trigger_fetch(request).await
    }
}
