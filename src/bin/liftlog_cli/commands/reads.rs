// ABOUTME: Analytics read commands for liftlog-cli
// ABOUTME: Workouts, records, exercise progress, muscle radar, and the year dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveTime, Utc};
use liftlog::dates::{parse_day, DateRange};
use liftlog::errors::AppResult;
use liftlog::models::WorkoutFilter;
use liftlog_intelligence::RecordMetric;
use tracing::info;

use crate::helpers::context::CliContext;
use crate::helpers::display::print_json;

/// List workouts
pub async fn workouts(
    context: &CliContext,
    year: Option<i32>,
    from: Option<String>,
    to: Option<String>,
    include_ignored: bool,
) -> AppResult<()> {
    let filter = WorkoutFilter {
        year,
        from: from.as_deref().map(start_of_day).transpose()?,
        to: to.as_deref().map(end_of_day).transpose()?,
        include_ignored,
    };
    let workouts = context.analytics.workouts(&filter).await?;
    info!("{} workout(s)", workouts.len());
    print_json(&workouts)
}

/// Show one workout
pub async fn workout(context: &CliContext, id: &str) -> AppResult<()> {
    let detail = context.analytics.workout(id).await?;
    print_json(&detail)
}

/// Personal records under a metric
pub async fn records(
    context: &CliContext,
    metric: &str,
    reps: Option<i64>,
    year: Option<i32>,
) -> AppResult<()> {
    let metric = RecordMetric::parse(metric, reps)?;
    let records = context.analytics.records(metric, year).await?;
    info!("{} record(s) for {metric}", records.len());
    print_json(&records)
}

/// Progress series for one exercise
pub async fn progress(context: &CliContext, template_id: &str, from: &str, to: &str) -> AppResult<()> {
    let range = DateRange::parse(from, to)?;
    let report = context.analytics.progress(template_id, range).await?;
    print_json(&report)
}

/// Muscle coverage against the preceding period
pub async fn muscles(context: &CliContext, from: &str, to: &str) -> AppResult<()> {
    let range = DateRange::parse(from, to)?;
    let summary = context.analytics.muscle_summary(range).await?;
    print_json(&summary)
}

/// Year rollup
pub async fn dashboard(context: &CliContext, year: i32) -> AppResult<()> {
    let summary = context.analytics.year_dashboard(year).await?;
    print_json(&summary)
}

fn start_of_day(value: &str) -> AppResult<DateTime<Utc>> {
    Ok(parse_day(value)?.and_time(NaiveTime::MIN).and_utc())
}

fn end_of_day(value: &str) -> AppResult<DateTime<Utc>> {
    let last_instant = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    Ok(parse_day(value)?.and_time(last_instant).and_utc())
}
