// ABOUTME: Application constants for the remote source, sync cadence, and storage
// ABOUTME: Single place for defaults that configuration falls back to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Defaults for the Hevy workout source
pub mod hevy {
    /// Provider name used in logs and errors
    pub const PROVIDER_NAME: &str = "hevy";
    /// Production API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.hevyapp.com";
    /// Paginated workout listing path
    pub const WORKOUTS_PATH: &str = "/v1/workouts";
    /// Header carrying the static credential
    pub const API_KEY_HEADER: &str = "api-key";
}

/// Sync cadence defaults
pub mod sync {
    /// Workouts requested per page
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    /// Minimum seconds between lazily triggered full syncs
    pub const DEFAULT_COOLDOWN_SECS: u64 = 300;
    /// Attempts per page; one attempt means no retry
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;
    /// First backoff delay when retries are enabled
    pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;
    /// Upper bound on a single backoff delay
    pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 8_000;
}

/// HTTP client defaults
pub mod http {
    /// Per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Connection establishment timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Storage defaults
pub mod storage {
    /// Database used when `DATABASE_URL` is unset
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/liftlog.db";
    /// Primary key of the singleton sync-state row
    pub const SYNC_STATE_ID: i64 = 1;
}

/// Service identity for structured logs
pub mod service_names {
    /// Name reported at startup
    pub const LIFTLOG: &str = "liftlog";
}
