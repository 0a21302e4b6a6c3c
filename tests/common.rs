// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides an in-memory database, a scripted workout source, and payload builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `liftlog`

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration};
use liftlog::config::SyncSettings;
use liftlog::database::Database;
use liftlog::sync::SyncService;
use liftlog_providers::{ProviderError, ProviderResult, RetryPolicy, WorkoutPage, WorkoutSource};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::env;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Sync settings with a five minute cooldown and no retries
pub fn test_sync_settings() -> SyncSettings {
    SyncSettings {
        page_size: 10,
        cooldown: Duration::from_secs(300),
        retry: RetryPolicy::no_retry(),
    }
}

/// Build a sync service over a scripted source
pub fn create_sync_service(database: &Database, source: &Arc<ScriptedSource>) -> SyncService {
    SyncService::new(database.clone(), source.clone(), test_sync_settings())
}

/// In-memory paginated source with a fetch counter and failure injection
pub struct ScriptedSource {
    pages: Mutex<Vec<Vec<Value>>>,
    failing_page: Mutex<Option<u32>>,
    page_counts: Mutex<HashMap<u32, u32>>,
    fetches: AtomicU32,
}

impl ScriptedSource {
    pub fn new(pages: Vec<Vec<Value>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages),
            failing_page: Mutex::new(None),
            page_counts: Mutex::new(HashMap::new()),
            fetches: AtomicU32::new(0),
        })
    }

    /// Replace the remote data seen by later fetches
    pub fn set_pages(&self, pages: Vec<Vec<Value>>) {
        *self.pages.lock().unwrap() = pages;
    }

    /// Make fetches of `page` time out (or stop doing so with `None`)
    pub fn fail_on(&self, page: Option<u32>) {
        *self.failing_page.lock().unwrap() = page;
    }

    /// Report `count` as the page count when `page` is fetched, instead of
    /// the number of scripted pages
    pub fn report_page_count(&self, page: u32, count: u32) {
        self.page_counts.lock().unwrap().insert(page, count);
    }

    /// Number of `fetch_page` calls so far
    pub fn fetch_count(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkoutSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_page(&self, page: u32, _page_size: u32) -> ProviderResult<WorkoutPage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if *self.failing_page.lock().unwrap() == Some(page) {
            return Err(ProviderError::Timeout {
                provider: "scripted".to_owned(),
                timeout_secs: 30,
            });
        }

        let pages = self.pages.lock().unwrap();
        let page_count = self
            .page_counts
            .lock()
            .unwrap()
            .get(&page)
            .copied()
            .unwrap_or_else(|| u32::try_from(pages.len().max(1)).unwrap());
        let items = pages
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_default();
        Ok(WorkoutPage { items, page_count })
    }
}

/// One set payload in the remote shape
pub fn set_json(weight_kg: f64, reps: i64) -> Value {
    json!({ "weight_kg": weight_kg, "reps": reps, "type": "normal" })
}

/// One exercise entry in the remote shape
pub fn exercise_json(title: &str, template_id: &str, sets: Vec<Value>) -> Value {
    json!({
        "title": title,
        "exercise_template_id": template_id,
        "sets": sets,
    })
}

/// One workout in the remote shape starting at `start` (RFC 3339) and lasting an hour
pub fn workout_json(id: &str, title: &str, start: &str, exercises: Vec<Value>) -> Value {
    let end = DateTime::parse_from_rfc3339(start)
        .map(|t| (t + ChronoDuration::hours(1)).to_rfc3339())
        .unwrap();
    json!({
        "id": id,
        "title": title,
        "start_time": start,
        "end_time": end,
        "exercises": exercises,
    })
}

/// Flag a workout as ignored directly in storage
pub async fn mark_ignored(database: &Database, workout_id: &str) -> Result<()> {
    sqlx::query("UPDATE workouts SET ignored = 1 WHERE id = ?")
        .bind(workout_id)
        .execute(database.pool())
        .await?;
    Ok(())
}

/// Move the stored last-sync time into the past
pub async fn rewind_last_sync(database: &Database, by: ChronoDuration) -> Result<()> {
    let state = database.get_or_create_sync_state().await?;
    if let Some(last) = state.last_sync_ts {
        database.record_successful_sync(last - by).await?;
    }
    Ok(())
}
