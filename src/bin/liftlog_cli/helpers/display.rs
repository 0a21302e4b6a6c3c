// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for liftlog-cli
// ABOUTME: Command results go to stdout as pretty JSON; logs stay on stderr

use liftlog::errors::{AppError, AppResult};
use liftlog::sync::{SyncOutcome, SyncReport};
use serde::Serialize;
use tracing::info;

/// Print any serializable result as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Log a one-line summary of a sync pass
pub fn log_sync_report(report: &SyncReport) {
    info!(
        "Synced {} page(s): {} workout(s) merged, {} skipped, {} new set(s), {} already stored",
        report.pages,
        report.workouts_merged,
        report.workouts_skipped,
        report.sets_inserted,
        report.sets_dropped
    );
}

/// Log what a lazy sync did
pub fn log_sync_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Skipped { last_sync_ts } => match last_sync_ts {
            Some(at) => info!("Last sync at {} is within the cooldown", at.format("%Y-%m-%d %H:%M UTC")),
            None => info!("Sync skipped"),
        },
        SyncOutcome::Completed(report) => log_sync_report(report),
    }
}
