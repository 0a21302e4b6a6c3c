// ABOUTME: Ingestion merger writing one fetched page of workouts inside a single transaction
// ABOUTME: Upserts each workout then inserts its sets, dropping sets whose identity already exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use liftlog_providers::normalize_workout;
use serde_json::Value;
use tracing::debug;

use crate::database::workouts::{insert_set, upsert_workout};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::NewWorkout;

/// What one page contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMerge {
    /// Workouts inserted or refreshed
    pub workouts_merged: u64,
    /// Records skipped for lacking an identity
    pub workouts_skipped: u64,
    /// New set rows
    pub sets_inserted: u64,
    /// Sets whose identity was already stored
    pub sets_dropped: u64,
}

/// Normalize and persist one page of raw workout records
///
/// The page commits as a unit. A failure rolls back this page only; pages
/// merged earlier in the pass stay committed.
///
/// # Errors
///
/// Returns `DatabaseError` if any write or the commit fails
pub async fn merge_page(database: &Database, records: &[Value]) -> AppResult<PageMerge> {
    let mut stats = PageMerge::default();
    let workouts: Vec<NewWorkout> = records
        .iter()
        .filter_map(|record| {
            let normalized = normalize_workout(record);
            if normalized.is_none() {
                stats.workouts_skipped += 1;
            }
            normalized
        })
        .collect();

    let mut tx = database.begin().await?;

    for workout in &workouts {
        upsert_workout(&mut tx, workout).await?;
        for exercise in &workout.exercises {
            for set in &exercise.sets {
                if insert_set(&mut tx, &workout.id, exercise, set).await? {
                    stats.sets_inserted += 1;
                } else {
                    debug!(
                        workout_id = %workout.id,
                        template_id = exercise.template_id.as_deref().unwrap_or(""),
                        set_index = set.set_index,
                        "set already stored, keeping existing row"
                    );
                    stats.sets_dropped += 1;
                }
            }
        }
        stats.workouts_merged += 1;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit page: {e}")))?;

    Ok(stats)
}
