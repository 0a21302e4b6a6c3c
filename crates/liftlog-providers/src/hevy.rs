// ABOUTME: Hevy REST client fetching paginated workout listings
// ABOUTME: Authenticates with an api-key header and maps failures onto ProviderError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::constants::hevy::{API_KEY_HEADER, DEFAULT_BASE_URL, PROVIDER_NAME, WORKOUTS_PATH};
use crate::constants::http::DEFAULT_TIMEOUT_SECS;
use crate::errors::provider::{ProviderError, ProviderResult};
use crate::http_client::shared_client;
use crate::source::{WorkoutPage, WorkoutSource};

/// Connection settings for the Hevy API
#[derive(Clone)]
pub struct HevyConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Personal API key
    pub api_key: String,
    /// Request timeout, reported in timeout errors
    pub timeout: Duration,
}

impl fmt::Debug for HevyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HevyConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HevyConfig {
    /// Settings for the public API endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }
}

/// Hevy workout listing client
#[derive(Debug, Clone)]
pub struct HevyClient {
    config: HevyConfig,
    client: Client,
}

impl HevyClient {
    /// Create a client on the shared connection pool
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when the API key is blank
    pub fn new(config: HevyConfig) -> ProviderResult<Self> {
        Self::with_client(config, shared_client().clone())
    }

    /// Create a client on a caller-supplied connection pool
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when the API key is blank
    pub fn with_client(config: HevyConfig, client: Client) -> ProviderResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::ConfigurationError {
                provider: PROVIDER_NAME.to_owned(),
                message: "HEVY_API_KEY is empty".to_owned(),
            });
        }
        Ok(Self { config, client })
    }

    fn workouts_url(&self) -> String {
        format!("{}{WORKOUTS_PATH}", self.config.base_url)
    }

    fn transport_error(&self, error: &reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout {
                provider: PROVIDER_NAME.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            ProviderError::NetworkError {
                provider: PROVIDER_NAME.to_owned(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl WorkoutSource for HevyClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn fetch_page(&self, page: u32, page_size: u32) -> ProviderResult<WorkoutPage> {
        let response = self
            .client
            .get(self.workouts_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, "application/json")
            .query(&[("page", page), ("pageSize", page_size)])
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(
                PROVIDER_NAME,
                status.as_u16(),
                body,
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(&e)
            } else {
                ProviderError::ParseError {
                    provider: PROVIDER_NAME.to_owned(),
                    message: e.to_string(),
                }
            }
        })?;

        let envelope = WorkoutPage::from_body(&body);
        debug!(
            items = envelope.items.len(),
            page_count = envelope.page_count,
            "fetched workout page"
        );
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_rejected() {
        let result = HevyClient::with_client(HevyConfig::new("  "), Client::new());
        assert!(matches!(
            result,
            Err(ProviderError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_url_and_debug_redaction() {
        let config = HevyConfig::new("secret-key").with_base_url("http://localhost:8080/");
        let client = HevyClient::with_client(config, Client::new()).unwrap();
        assert_eq!(client.workouts_url(), "http://localhost:8080/v1/workouts");
        let rendered = format!("{:?}", client.config);
        assert!(!rendered.contains("secret-key"));
    }
}
