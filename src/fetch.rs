use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::FetchError;

pub const USER_AGENT: &str = "Mozilla/5.0";

/// Source of page bodies. Non-success statuses are errors.
pub trait Transport {
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        debug!(
            "GET {} -> {} ({} bytes, {}ms)",
            url,
            status.as_u16(),
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Between two listing pages of one category.
    Listing,
    /// After every detail fetch attempt.
    Detail,
}

/// Rate limiting between requests.
pub trait Pacer {
    async fn pause(&self, kind: Pause);
}

pub struct FixedPacer {
    pub listing: Duration,
    pub detail: Duration,
}

impl Pacer for FixedPacer {
    async fn pause(&self, kind: Pause) {
        let d = match kind {
            Pause::Listing => self.listing,
            Pause::Detail => self.detail,
        };
        tokio::time::sleep(d).await;
    }
}

pub struct NoPacer;

impl Pacer for NoPacer {
    async fn pause(&self, _kind: Pause) {}
}
