// ABOUTME: Singleton sync-state row recording the last successful full sync
// ABOUTME: Owns the cooldown decision so the orchestrator stays a thin coordinator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Process-wide sync bookkeeping (a single row with a fixed id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// Fixed primary key
    pub id: i64,
    /// Completion time of the last successful `ensure_synced` pass
    pub last_sync_ts: Option<DateTime<Utc>>,
}

impl SyncState {
    /// Whether `now` is still inside the cooldown window started by the last sync
    ///
    /// A state that has never synced is never within the cooldown. A last-sync
    /// timestamp in the future (clock skew) counts as within the window.
    #[must_use]
    pub fn is_within_cooldown(&self, now: DateTime<Utc>, cooldown: Duration) -> bool {
        self.last_sync_ts
            .is_some_and(|last| now.signed_duration_since(last) < cooldown)
    }
}
