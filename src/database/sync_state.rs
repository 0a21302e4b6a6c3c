// ABOUTME: Singleton sync-state row holding the last successful full sync time
// ABOUTME: Created lazily on first read and stamped only after a complete pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use sqlx::Row;

use super::Database;
use crate::constants::storage::SYNC_STATE_ID;
use crate::errors::{AppError, AppResult};
use crate::models::SyncState;

impl Database {
    /// Create the sync state table
    pub(super) async fn migrate_sync_state(&self) -> AppResult<()> {
        self.execute_all(&[r"
            CREATE TABLE IF NOT EXISTS sync_state (
                id INTEGER PRIMARY KEY,
                last_sync_ts TEXT
            )
            "])
        .await
    }

    /// Read the singleton row, creating it (never synced) when absent
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert or select fails
    pub async fn get_or_create_sync_state(&self) -> AppResult<SyncState> {
        sqlx::query("INSERT OR IGNORE INTO sync_state (id, last_sync_ts) VALUES (?, NULL)")
            .bind(SYNC_STATE_ID)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create sync state: {e}")))?;

        let row = sqlx::query("SELECT id, last_sync_ts FROM sync_state WHERE id = ?")
            .bind(SYNC_STATE_ID)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read sync state: {e}")))?;

        Ok(SyncState {
            id: row.try_get("id")?,
            last_sync_ts: row.try_get("last_sync_ts")?,
        })
    }

    /// Stamp the completion time of a successful full sync
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert fails
    pub async fn record_successful_sync(&self, completed_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO sync_state (id, last_sync_ts) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET last_sync_ts = excluded.last_sync_ts
            ",
        )
        .bind(SYNC_STATE_ID)
        .bind(completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record sync time: {e}")))?;
        Ok(())
    }
}
