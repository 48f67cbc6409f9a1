//! CLI command handlers.

pub mod browse;
pub mod config;
pub mod models;
pub mod providers;

use std::path::Path;

use anyhow::{Context, Result};
use modelboard_core::Catalog;
use modelboard_core::config::Config;
use modelboard_core::openrouter::CatalogClient;

/// Loads the catalog from `snapshot` when given, otherwise from the API.
pub async fn load_catalog(config: &Config, snapshot: Option<&Path>) -> Result<Catalog> {
    if let Some(path) = snapshot {
        return Catalog::load(path);
    }

    let client = CatalogClient::from_config(config)?;
    tracing::debug!(base_url = client.base_url(), "Fetching catalog");
    client.fetch_catalog().await.context("fetch catalog")
}
