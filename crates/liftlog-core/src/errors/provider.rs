// ABOUTME: Structured error types for the remote workout source
// ABOUTME: Separates retryable transport failures from fatal API and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Failure talking to the remote workout source
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The remote source answered with a non-success status
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status returned by the source
        status_code: u16,
        /// Response body or reason phrase
        message: String,
        /// Whether repeating the request may succeed
        retryable: bool,
    },

    /// The request never produced a response
    #[error("{provider} network error: {message}")]
    NetworkError {
        /// Provider name
        provider: String,
        /// Transport failure description
        message: String,
    },

    /// The request exceeded the configured timeout
    #[error("{provider} request timed out after {timeout_secs}s")]
    Timeout {
        /// Provider name
        provider: String,
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// The credential was rejected
    #[error("{provider} authentication failed: {reason}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// Rejection reason
        reason: String,
    },

    /// The source throttled the client
    #[error("{provider} rate limit exceeded")]
    RateLimitExceeded {
        /// Provider name
        provider: String,
        /// Seconds the source asked us to wait, when provided
        retry_after_secs: Option<u64>,
    },

    /// The response body was not the expected JSON shape
    #[error("{provider} returned an unparseable response: {message}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Parse failure description
        message: String,
    },

    /// The client is missing configuration (credential, base URL)
    #[error("{provider} is not configured: {message}")]
    ConfigurationError {
        /// Provider name
        provider: String,
        /// What is missing
        message: String,
    },
}

impl ProviderError {
    /// Whether a retry of the same request could plausibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError { retryable, .. } => *retryable,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimitExceeded { .. } => {
                true
            }
            Self::AuthenticationFailed { .. }
            | Self::ParseError { .. }
            | Self::ConfigurationError { .. } => false,
        }
    }

    /// Build an API error from a status code, classifying retryability
    #[must_use]
    pub fn from_status(provider: &str, status_code: u16, message: impl Into<String>) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationFailed {
                provider: provider.to_owned(),
                reason: message.into(),
            },
            429 => Self::RateLimitExceeded {
                provider: provider.to_owned(),
                retry_after_secs: None,
            },
            _ => Self::ApiError {
                provider: provider.to_owned(),
                status_code,
                message: message.into(),
                retryable: status_code >= 500,
            },
        }
    }
}

/// Result alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
