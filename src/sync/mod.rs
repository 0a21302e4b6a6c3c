// ABOUTME: Sync orchestrator pulling every page from a workout source into storage
// ABOUTME: Cooldown-gated lazy sync plus an unconditional forced pass, one pass in flight at a time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sync
//!
//! A full pass walks pages `1..=page_count`, re-reading the page count from
//! every response, and merges each page in its own transaction. A failure
//! stops the pass and propagates; pages already merged stay committed and
//! the last-sync timestamp is left untouched.

/// Per-page ingestion into storage
pub mod merger;

use chrono::{DateTime, Utc};
use liftlog_providers::WorkoutSource;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::config::SyncSettings;
use crate::database::Database;
use crate::errors::AppResult;
use merger::{merge_page, PageMerge};

/// Counts from one full sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Pages fetched and merged
    pub pages: u32,
    /// Workouts inserted or refreshed
    pub workouts_merged: u64,
    /// Records skipped for lacking an identity
    pub workouts_skipped: u64,
    /// New set rows
    pub sets_inserted: u64,
    /// Sets already stored under the same identity
    pub sets_dropped: u64,
}

impl SyncReport {
    fn absorb(&mut self, page: PageMerge) {
        self.pages += 1;
        self.workouts_merged += page.workouts_merged;
        self.workouts_skipped += page.workouts_skipped;
        self.sets_inserted += page.sets_inserted;
        self.sets_dropped += page.sets_dropped;
    }
}

/// Result of a cooldown-gated sync request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The last successful sync is recent enough; nothing was fetched
    Skipped {
        /// When that sync finished
        last_sync_ts: Option<DateTime<Utc>>,
    },
    /// A full pass ran and the sync time was stamped
    Completed(SyncReport),
}

/// Drives a [`WorkoutSource`] into the database
pub struct SyncService {
    database: Database,
    source: Arc<dyn WorkoutSource>,
    settings: SyncSettings,
    in_flight: Mutex<()>,
}

impl SyncService {
    /// Create a sync service
    #[must_use]
    pub fn new(database: Database, source: Arc<dyn WorkoutSource>, settings: SyncSettings) -> Self {
        Self {
            database,
            source,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    /// Storage handle shared with readers
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Run a full pass unless the last successful one is within the cooldown
    ///
    /// Concurrent callers queue behind the pass in flight and then see the
    /// fresh timestamp, so they return `Skipped` instead of fetching again.
    ///
    /// # Errors
    ///
    /// Propagates source and storage failures; the sync time is then not stamped
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn ensure_synced(&self) -> AppResult<SyncOutcome> {
        let cooldown = self.settings.cooldown_duration();

        let state = self.database.get_or_create_sync_state().await?;
        if state.is_within_cooldown(Utc::now(), cooldown) {
            debug!(last_sync_ts = ?state.last_sync_ts, "within cooldown, skipping sync");
            return Ok(SyncOutcome::Skipped {
                last_sync_ts: state.last_sync_ts,
            });
        }

        let _guard = self.in_flight.lock().await;

        let state = self.database.get_or_create_sync_state().await?;
        if state.is_within_cooldown(Utc::now(), cooldown) {
            debug!("another caller finished a sync while we waited");
            return Ok(SyncOutcome::Skipped {
                last_sync_ts: state.last_sync_ts,
            });
        }

        let report = self.run_pass().await?;
        self.database.record_successful_sync(Utc::now()).await?;
        Ok(SyncOutcome::Completed(report))
    }

    /// Run a full pass regardless of the cooldown
    ///
    /// The last-sync timestamp is not updated.
    ///
    /// # Errors
    ///
    /// Propagates source and storage failures
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn force_sync(&self) -> AppResult<SyncReport> {
        let _guard = self.in_flight.lock().await;
        self.run_pass().await
    }

    async fn run_pass(&self) -> AppResult<SyncReport> {
        let page_size = self.settings.page_size;
        let mut report = SyncReport::default();
        let mut page = 1_u32;

        loop {
            let label = format!("{} page {page}", self.source.name());
            let fetched = self
                .settings
                .retry
                .run(&label, || self.source.fetch_page(page, page_size))
                .await?;
            let page_count = fetched.page_count;

            let merged = merge_page(&self.database, &fetched.items).await?;
            debug!(
                page,
                page_count,
                records = fetched.items.len(),
                sets_inserted = merged.sets_inserted,
                "page merged"
            );
            report.absorb(merged);

            if page >= page_count {
                break;
            }
            page += 1;
        }

        info!(
            pages = report.pages,
            workouts_merged = report.workouts_merged,
            workouts_skipped = report.workouts_skipped,
            sets_inserted = report.sets_inserted,
            sets_dropped = report.sets_dropped,
            "sync pass finished"
        );
        Ok(report)
    }
}
