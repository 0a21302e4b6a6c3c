// ABOUTME: SQLite storage for workouts, sets, sync state, and the exercise catalog
// ABOUTME: Owns the connection pool and runs idempotent schema migrations at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! One [`Database`] handle wraps a `sqlx` SQLite pool. Each table group keeps
//! its migration and queries in its own file as an `impl Database` block.
//! Writes that must commit together (one page of a sync pass) go through the
//! connection-level functions in [`workouts`] inside a transaction.

mod analytics;
mod catalog;
mod sync_state;
/// Workout and set persistence
pub mod workouts;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};

/// Storage handle shared by the sync pipeline and analytics reads
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// `sqlite::memory:` URLs get a single long-lived connection so every
    /// query sees the same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the URL is malformed, the file cannot be
    /// created, or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:");
        if !in_memory {
            ensure_parent_dir(options.get_filename()).await?;
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open {database_url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = database_url, "database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a transaction
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if no connection can be acquired
    pub async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_workouts().await?;
        self.migrate_sync_state().await?;
        self.migrate_catalog().await?;
        debug!("migrations applied");
        Ok(())
    }

    /// Run a list of DDL statements in order
    async fn execute_all(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
        assert_eq!(db.workout_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("liftlog.db");
        let url = format!("sqlite:{}", path.display());
        let db = Database::new(&url).await.unwrap();
        assert_eq!(db.set_count().await.unwrap(), 0);
        assert!(path.exists());
    }
}
