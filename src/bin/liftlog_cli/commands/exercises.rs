// ABOUTME: Exercise catalog commands for liftlog-cli
// ABOUTME: Handles list, discover, add, set-muscles, and set-equipment operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use liftlog::errors::AppResult;
use serde_json::json;
use tracing::info;

use crate::helpers::context::CliContext;
use crate::helpers::display::print_json;

/// List the catalog
pub async fn list(context: &CliContext) -> AppResult<()> {
    let exercises = context.database.list_exercises().await?;
    print_json(&exercises)
}

/// Register catalog entries for template ids found in synced sets
pub async fn discover(context: &CliContext) -> AppResult<()> {
    let added = context.database.discover_exercises().await?;
    info!("{added} new catalog entr{}", if added == 1 { "y" } else { "ies" });
    print_json(&json!({ "added": added }))
}

/// Add or retitle an exercise
pub async fn add(context: &CliContext, title: &str, template_id: Option<&str>) -> AppResult<()> {
    let id = context.database.upsert_exercise(title, template_id).await?;
    print_json(&json!({ "id": id, "exercise_title": title.trim(), "exercise_template_id": template_id }))
}

/// Replace an exercise's muscles
pub async fn set_muscles(context: &CliContext, template_id: &str, muscles: &[String]) -> AppResult<()> {
    let exercise = context
        .database
        .set_exercise_muscles(template_id, muscles)
        .await?;
    info!("{} now trains {} muscle(s)", exercise.exercise_title, exercise.muscles.len());
    print_json(&exercise)
}

/// Replace an exercise's equipment
pub async fn set_equipment(
    context: &CliContext,
    template_id: &str,
    equipment: &[String],
) -> AppResult<()> {
    let exercise = context
        .database
        .set_exercise_equipment(template_id, equipment)
        .await?;
    info!("{} now uses {} equipment item(s)", exercise.exercise_title, exercise.equipment.len());
    print_json(&exercise)
}
