// ABOUTME: Environment configuration management for liftlog
// ABOUTME: Parses and validates environment variables into typed settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::{hevy, http, storage, sync};
use crate::errors::{AppError, AppResult, ErrorCode};
use liftlog_providers::{HevyConfig, HttpClientConfig, RetryPolicy};

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an empty value or a non-SQLite scheme
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::config("DATABASE_URL is empty"));
        }
        if let Some(path) = trimmed.strip_prefix("sqlite:") {
            let path = path.trim_start_matches("//");
            return if path == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path),
                })
            };
        }
        if trimmed.contains("://") {
            return Err(AppError::config(format!(
                "unsupported database URL '{trimmed}', only sqlite is supported"
            )));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to a connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        let path = storage::DEFAULT_DATABASE_URL
            .strip_prefix("sqlite:")
            .unwrap_or(storage::DEFAULT_DATABASE_URL);
        Self::SQLite {
            path: PathBuf::from(path),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Remote source settings
#[derive(Clone, PartialEq, Eq)]
pub struct HevySettings {
    /// API root
    pub base_url: String,
    /// Personal API key; syncing is unavailable without it
    pub api_key: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl fmt::Debug for HevySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HevySettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Default for HevySettings {
    fn default() -> Self {
        Self {
            base_url: hevy::DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(http::DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(http::DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl HevySettings {
    /// Timeouts for the shared HTTP client
    #[must_use]
    pub const fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        }
    }

    /// Client settings, available only when an API key is configured
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `HEVY_API_KEY` is unset
    pub fn client_config(&self) -> AppResult<HevyConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::new(ErrorCode::ConfigMissing, "HEVY_API_KEY is not set"))?;
        let mut config = HevyConfig::new(api_key).with_base_url(self.base_url.as_str());
        config.timeout = self.timeout;
        Ok(config)
    }
}

/// Sync orchestrator settings
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    /// Workouts requested per page
    pub page_size: u32,
    /// Minimum time between lazy full syncs
    pub cooldown: Duration,
    /// Per-page retry schedule
    pub retry: RetryPolicy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            page_size: sync::DEFAULT_PAGE_SIZE,
            cooldown: Duration::from_secs(sync::DEFAULT_COOLDOWN_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl SyncSettings {
    /// Cooldown as a calendar duration for timestamp arithmetic
    #[must_use]
    pub fn cooldown_duration(&self) -> ChronoDuration {
        ChronoDuration::from_std(self.cooldown).unwrap_or_else(|_| ChronoDuration::days(36_500))
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Storage
    pub database: DatabaseConfig,
    /// Remote source
    pub hevy: HevySettings,
    /// Sync tuning
    pub sync: SyncSettings,
}

impl AppConfig {
    /// Load configuration from environment variables, seeding from `.env`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for malformed or out-of-range values
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {e}");
        }

        let config = Self::from_vars()?;
        config.validate()?;
        info!(
            database = %config.database.url,
            base_url = %config.hevy.base_url,
            page_size = config.sync.page_size,
            cooldown_secs = config.sync.cooldown.as_secs(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Read the process environment without touching `.env` or validating
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a numeric variable does not parse
    pub fn from_vars() -> AppResult<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| storage::DEFAULT_DATABASE_URL.to_owned());

        let retry = RetryPolicy {
            max_attempts: parse_var("SYNC_MAX_ATTEMPTS", sync::DEFAULT_MAX_ATTEMPTS)?,
            base_delay: Duration::from_millis(parse_var(
                "SYNC_RETRY_BASE_DELAY_MS",
                sync::DEFAULT_RETRY_BASE_DELAY_MS,
            )?),
            max_delay: Duration::from_millis(parse_var(
                "SYNC_RETRY_MAX_DELAY_MS",
                sync::DEFAULT_RETRY_MAX_DELAY_MS,
            )?),
            ..RetryPolicy::default()
        };

        Ok(Self {
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&database_url)?,
            },
            hevy: HevySettings {
                base_url: env::var("HEVY_BASE_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or_else(|| hevy::DEFAULT_BASE_URL.to_owned()),
                api_key: env::var("HEVY_API_KEY")
                    .ok()
                    .map(|key| key.trim().to_owned())
                    .filter(|key| !key.is_empty()),
                timeout: Duration::from_secs(parse_var(
                    "HTTP_TIMEOUT_SECS",
                    http::DEFAULT_TIMEOUT_SECS,
                )?),
                connect_timeout: Duration::from_secs(parse_var(
                    "HTTP_CONNECT_TIMEOUT_SECS",
                    http::DEFAULT_CONNECT_TIMEOUT_SECS,
                )?),
            },
            sync: SyncSettings {
                page_size: parse_var("SYNC_PAGE_SIZE", sync::DEFAULT_PAGE_SIZE)?,
                cooldown: Duration::from_secs(parse_var(
                    "SYNC_COOLDOWN_SECONDS",
                    sync::DEFAULT_COOLDOWN_SECS,
                )?),
                retry,
            },
        })
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a zero page size, zero attempts, a zero
    /// request timeout, or a retry base delay above its cap
    pub fn validate(&self) -> AppResult<()> {
        if self.sync.page_size == 0 {
            return Err(AppError::config("SYNC_PAGE_SIZE must be positive"));
        }
        if self.sync.retry.max_attempts == 0 {
            return Err(AppError::config("SYNC_MAX_ATTEMPTS must be at least 1"));
        }
        if self.sync.retry.base_delay > self.sync.retry.max_delay {
            return Err(AppError::config(
                "SYNC_RETRY_BASE_DELAY_MS must not exceed SYNC_RETRY_MAX_DELAY_MS",
            ));
        }
        if self.hevy.timeout.is_zero() {
            return Err(AppError::config("HTTP_TIMEOUT_SECS must be positive"));
        }
        Ok(())
    }
}

/// Parse an optional variable, falling back to `default` when unset or blank
fn parse_var<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("invalid {key} value '{raw}': {e}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "DATABASE_URL",
        "HEVY_API_KEY",
        "HEVY_BASE_URL",
        "SYNC_PAGE_SIZE",
        "SYNC_COOLDOWN_SECONDS",
        "SYNC_MAX_ATTEMPTS",
        "SYNC_RETRY_BASE_DELAY_MS",
        "SYNC_RETRY_MAX_DELAY_MS",
        "HTTP_TIMEOUT_SECS",
        "HTTP_CONNECT_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for key in VARS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_database_url_parsing() {
        let file = DatabaseUrl::parse_url("sqlite:./test.db").unwrap();
        assert_eq!(file.to_connection_string(), "sqlite:./test.db");
        assert!(!file.is_memory());

        assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());

        let bare = DatabaseUrl::parse_url("./some/path.db").unwrap();
        assert_eq!(bare.to_connection_string(), "sqlite:./some/path.db");

        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("  ").is_err());
        assert_eq!(
            DatabaseUrl::default().to_connection_string(),
            storage::DEFAULT_DATABASE_URL
        );
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();
        let config = AppConfig::from_vars().unwrap();
        assert_eq!(config.sync.page_size, 10);
        assert_eq!(config.sync.cooldown, Duration::from_secs(300));
        assert_eq!(config.sync.retry.max_attempts, 1);
        assert_eq!(config.hevy.base_url, "https://api.hevyapp.com");
        assert_eq!(config.hevy.timeout, Duration::from_secs(30));
        assert!(config.hevy.api_key.is_none());
        assert!(config.hevy.client_config().is_err());
        config.validate().unwrap();
    }

    #[test]
    #[serial]
    fn test_overrides_are_parsed() {
        clear_env();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("HEVY_API_KEY", " key-123 ");
        env::set_var("SYNC_PAGE_SIZE", "25");
        env::set_var("SYNC_COOLDOWN_SECONDS", "0");
        env::set_var("SYNC_MAX_ATTEMPTS", "4");

        let config = AppConfig::from_vars().unwrap();
        assert!(config.database.url.is_memory());
        assert_eq!(config.hevy.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.sync.page_size, 25);
        assert!(config.sync.cooldown.is_zero());
        assert_eq!(config.sync.retry.max_attempts, 4);
        assert_eq!(config.hevy.client_config().unwrap().api_key, "key-123");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_are_errors() {
        clear_env();
        env::set_var("SYNC_PAGE_SIZE", "ten");
        assert!(AppConfig::from_vars().is_err());
        clear_env();
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.validate().unwrap();

        config.sync.page_size = 0;
        assert!(config.validate().is_err());

        config.sync.page_size = 10;
        config.sync.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_is_redacted() {
        let settings = HevySettings {
            api_key: Some("very-secret".to_owned()),
            ..HevySettings::default()
        };
        assert!(!format!("{settings:?}").contains("very-secret"));
    }
}
