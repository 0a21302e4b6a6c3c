// ABOUTME: Configuration module for liftlog runtime settings
// ABOUTME: Database location, Hevy credentials, sync tuning, and HTTP timeouts from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for liftlog
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file). There is no configuration file.

/// Environment configuration
pub mod environment;

pub use environment::{AppConfig, DatabaseConfig, DatabaseUrl, HevySettings, SyncSettings};
