// ABOUTME: Analytics service joining storage reads to the pure training-metric engines
// ABOUTME: Personal records, exercise progress, muscle radar summaries, and year dashboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Datelike;
use liftlog_intelligence::{
    build_progress, compute_records, summarize_year, tally_muscles, MuscleSummary,
    PersonalRecord, ProgressReport, RecordMetric, YearSummary,
};
use tracing::debug;

use crate::database::Database;
use crate::dates::DateRange;
use crate::errors::{AppError, AppResult};
use crate::models::{Workout, WorkoutDetail, WorkoutFilter};

/// Read-only analytics over synced data
///
/// Ignored workouts never contribute to any result.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    database: Database,
}

impl AnalyticsService {
    /// Create the service over a database handle
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Best set per exercise under `metric`, optionally within one year
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the candidate query fails
    pub async fn records(
        &self,
        metric: RecordMetric,
        year: Option<i32>,
    ) -> AppResult<Vec<PersonalRecord>> {
        let candidates = self.database.record_candidates(year).await?;
        let records = compute_records(&candidates, metric);
        debug!(
            metric = metric.as_str(),
            candidates = candidates.len(),
            records = records.len(),
            "records computed"
        );
        Ok(records)
    }

    /// Per-workout best sets of one exercise over a date range
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank template id, `DatabaseError`
    /// if a query fails
    pub async fn progress(&self, template_id: &str, range: DateRange) -> AppResult<ProgressReport> {
        let template_id = template_id.trim();
        if template_id.is_empty() {
            return Err(AppError::missing_field("exercise_template_id"));
        }
        let rows = self.database.progress_rows(template_id, &range).await?;
        let catalog = self.database.get_exercise(template_id).await?;
        Ok(build_progress(
            template_id,
            catalog.as_ref().map(|exercise| exercise.exercise_title.as_str()),
            range,
            &rows,
        ))
    }

    /// Muscle counts and radar tallies for a range and the range before it
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails
    pub async fn muscle_summary(&self, range: DateRange) -> AppResult<MuscleSummary> {
        let current = tally_muscles(&self.database.workout_muscle_rows(&range).await?);
        let previous = tally_muscles(
            &self
                .database
                .workout_muscle_rows(&range.preceding())
                .await?,
        );
        Ok(MuscleSummary::new(range, current, &previous))
    }

    /// Volume, frequency, and record rollup for one calendar year
    ///
    /// The record count is the number of all-time `max_weight` records whose
    /// winning set was performed during `year`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unrepresentable year, `DatabaseError` if
    /// a query fails
    pub async fn year_dashboard(&self, year: i32) -> AppResult<YearSummary> {
        let (workouts, sets) = self.database.dashboard_rows(year).await?;
        let all_time = self.records(RecordMetric::MaxWeight, None).await?;
        let pr_count = all_time
            .iter()
            .filter(|record| record.date.is_some_and(|date| date.year() == year))
            .count();
        Ok(summarize_year(
            year,
            &workouts,
            &sets,
            u32::try_from(pr_count).unwrap_or(u32::MAX),
        ))
    }

    /// Stored workouts matching `filter`, newest first
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails
    pub async fn workouts(&self, filter: &WorkoutFilter) -> AppResult<Vec<Workout>> {
        self.database.list_workouts(filter).await
    }

    /// One workout with its sets
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn workout(&self, workout_id: &str) -> AppResult<WorkoutDetail> {
        self.database.get_workout(workout_id).await
    }
}
