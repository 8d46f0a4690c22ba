use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Connection pool for the scoring backend. Times out after `upstream_timeout_secs`.
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .context("Failed to build upstream HTTP client")?;
        Ok(Self { config, http })
    }
}
