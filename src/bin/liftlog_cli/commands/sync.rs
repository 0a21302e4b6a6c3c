// ABOUTME: Sync command for liftlog-cli
// ABOUTME: Runs a cooldown-gated sync, or a full forced pass with --force
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use liftlog::errors::AppResult;
use liftlog::sync::SyncOutcome;

use crate::helpers::context::CliContext;
use crate::helpers::display::{log_sync_outcome, log_sync_report, print_json};

/// Pull workouts from Hevy and print what happened
pub async fn run(context: &CliContext, force: bool) -> AppResult<()> {
    let service = context.sync_service()?;

    let outcome = if force {
        let report = service.force_sync().await?;
        log_sync_report(&report);
        SyncOutcome::Completed(report)
    } else {
        let outcome = service.ensure_synced().await?;
        log_sync_outcome(&outcome);
        outcome
    };

    print_json(&outcome)
}
