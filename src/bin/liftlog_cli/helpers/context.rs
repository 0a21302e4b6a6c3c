// ABOUTME: Shared state for liftlog-cli commands
// ABOUTME: Builds the Hevy-backed sync service on demand and the analytics service up front
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use liftlog::analytics::AnalyticsService;
use liftlog::config::AppConfig;
use liftlog::database::Database;
use liftlog::errors::AppResult;
use liftlog::sync::{SyncOutcome, SyncService};
use liftlog_providers::{initialize_shared_client, HevyClient};
use std::sync::Arc;

/// Everything a command needs
pub struct CliContext {
    pub config: AppConfig,
    pub database: Database,
    pub analytics: AnalyticsService,
}

impl CliContext {
    pub fn new(config: AppConfig, database: Database) -> Self {
        Self {
            analytics: AnalyticsService::new(database.clone()),
            config,
            database,
        }
    }

    /// Sync service over the Hevy API; fails when no API key is configured
    pub fn sync_service(&self) -> AppResult<SyncService> {
        let client_config = self.config.hevy.client_config()?;
        initialize_shared_client(self.config.hevy.http_client_config());
        let client = HevyClient::new(client_config)?;
        Ok(SyncService::new(
            self.database.clone(),
            Arc::new(client),
            self.config.sync.clone(),
        ))
    }

    pub async fn ensure_synced(&self) -> AppResult<SyncOutcome> {
        self.sync_service()?.ensure_synced().await
    }
}
