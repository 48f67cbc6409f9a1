//! HTTP client for the OpenRouter catalog endpoints.
//!
//! `GET {base}/models` and `GET {base}/providers`, both answering
//! `{"data": [...]}`. No API key is needed for either.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use modelboard_types::{Model, Provider};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::{Catalog, decode_records};
use crate::config::Config;

const MODELS_PATH: &str = "/models";
const PROVIDERS_PATH: &str = "/providers";
const USER_AGENT: &str = concat!("modelboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Builds a client for `base_url` (no trailing slash) with an optional request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Uses the configured base URL (env override included) and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url()?, config.api_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch_models(&self) -> Result<Vec<Model>> {
        let values = self.fetch_data(MODELS_PATH).await?;
        Ok(decode_records(values, "model"))
    }

    pub async fn fetch_providers(&self) -> Result<Vec<Provider>> {
        let values = self.fetch_data(PROVIDERS_PATH).await?;
        Ok(decode_records(values, "provider"))
    }

    /// Fetches both lists concurrently. Fails if either request fails.
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let (models, providers) = tokio::try_join!(self.fetch_models(), self.fetch_providers())?;
        info!(
            models = models.len(),
            providers = providers.len(),
            "Fetched catalog"
        );
        Ok(Catalog::new(models, providers))
    }

    async fn fetch_data(&self, path: &str) -> Result<Vec<Value>> {
        let url = self.endpoint(path);
        debug!(%url, "Requesting catalog data");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!(
                "Catalog request to {url} failed with status {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
        }

        let envelope: Envelope = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))?;
        Ok(envelope.data)
    }
}
