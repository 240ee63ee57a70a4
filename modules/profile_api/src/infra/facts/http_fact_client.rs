use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::instrument;
use url::Url;

use crate::domain::error::FactError;
use crate::domain::ports::FactSource;

/// HTTP adapter implementing the FactSource port against the external
/// cat-fact service.
///
/// Holds one pooled client built with the configured timeout. The client is
/// internally synchronized; no cross-request mutable state lives here.
pub struct HttpFactClient {
    client: reqwest::Client,
    url: Url,
}

impl HttpFactClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build fact HTTP client")?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl FactSource for HttpFactClient {
    #[instrument(
        name = "profile_api.http.facts.fetch_fact",
        skip_all,
        fields(url = %self.url)
    )]
    async fn fetch_fact(&self) -> Result<Option<String>, FactError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FactError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactError::status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FactError::decode(e.to_string()))?;

        // A 2xx body without a `fact` string is not an error, just no fact.
        Ok(body
            .get("fact")
            .and_then(|v| v.as_str())
            .map(str::to_owned))
    }
}
