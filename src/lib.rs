// ABOUTME: Main library entry point for the liftlog workout sync and analytics engine
// ABOUTME: Wires configuration, SQLite storage, the sync orchestrator, and analytics reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog
//!
//! Pulls a user's workout history from the Hevy API into SQLite and derives
//! training analytics from it on demand.
//!
//! ## Architecture
//!
//! - **Sync**: a cooldown-gated orchestrator fetches every page from a
//!   [`WorkoutSource`](liftlog_providers::WorkoutSource), normalizes it, and
//!   merges each page in its own transaction
//! - **Database**: `sqlx` SQLite pool with idempotent migrations and one file
//!   per table group
//! - **Analytics**: storage reads feeding the pure engines in
//!   `liftlog-intelligence` (records, progress, muscle radar, year dashboard)
//! - **Config / Logging**: environment-driven settings and a `tracing`
//!   subscriber
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftlog::config::environment::AppConfig;
//! use liftlog::database::Database;
//! use liftlog::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let database = Database::new(&config.database.url.to_connection_string()).await?;
//!     println!("{} workouts stored", database.workout_count().await?);
//!     Ok(())
//! }
//! ```

/// Storage reads wired to the analytics engines
pub mod analytics;

/// Environment-driven configuration
pub mod config;

/// SQLite storage and repositories
pub mod database;

/// Structured logging setup
pub mod logging;

/// Cooldown-gated ingestion pipeline
pub mod sync;

pub use liftlog_core::{constants, dates, errors, models};
