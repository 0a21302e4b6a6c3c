// ABOUTME: Shared HTTP client with connection pooling for remote source calls
// ABOUTME: Initialized once from configuration, falling back to default timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::warn;

use crate::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};

/// Timeouts applied to outbound source requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

static CLIENT_CONFIG: OnceLock<HttpClientConfig> = OnceLock::new();

static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Record the timeouts for the shared client
///
/// Only the first call takes effect, and only if it happens before the first
/// [`shared_client`] call.
pub fn initialize_shared_client(config: HttpClientConfig) {
    let _ = CLIENT_CONFIG.set(config);
}

/// Build a standalone client with the given timeouts
///
/// Falls back to reqwest's defaults, without the configured timeouts, if the
/// builder fails. The fallback is logged at warn level.
#[must_use]
pub fn build_client(config: HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(concat!("liftlog/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            warn!(
                error = %e,
                timeout_secs = config.timeout.as_secs(),
                connect_timeout_secs = config.connect_timeout.as_secs(),
                "HTTP client builder failed; using default client without configured timeouts"
            );
            Client::new()
        })
}

/// Process-wide pooled client
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| build_client(CLIENT_CONFIG.get().copied().unwrap_or_default()))
}
