// ABOUTME: Per-exercise progress curve built from one best set per workout
// ABOUTME: Best set cascade is heaviest load, then most reps, then highest set index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::dates::DateRange;

/// Title reported when neither the catalog nor any set names the exercise
pub const UNNAMED_EXERCISE: &str = "Unnamed exercise";

/// One set of the requested template inside the requested range
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSetRow {
    /// Owning workout
    pub workout_id: String,
    /// Nominal workout date
    pub workout_date: DateTime<Utc>,
    /// Exercise title as stored on the set
    pub exercise_title: String,
    /// Set position within its exercise
    pub set_index: i64,
    /// Repetitions
    pub reps: Option<i64>,
    /// Load in kilograms
    pub weight_kg: Option<f64>,
}

/// Best set of one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// Workout the set belongs to
    pub workout_id: String,
    /// Nominal workout date
    pub date: DateTime<Utc>,
    /// Load of the best set
    pub weight_kg: f64,
    /// Reps of the best set
    pub reps: Option<i64>,
    /// Position of the best set
    pub set_index: i64,
}

/// Raw counts over the filtered range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Every set in range, weighted or not
    pub total_sets: usize,
    /// Distinct workouts with at least one set in range
    pub workouts_count: usize,
}

/// Progress curve for one exercise template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Requested template id
    pub exercise_template_id: String,
    /// Catalog title, else the first set's title
    pub exercise_title: String,
    /// Requested inclusive range
    pub range: DateRange,
    /// Raw counts
    pub summary: ProgressSummary,
    /// One point per workout, oldest first
    pub series: Vec<ProgressPoint>,
}

/// Cascade order: weight, then reps (absent below any count), then set index
fn cascade(a: &ProgressSetRow, b: &ProgressSetRow) -> Ordering {
    let weight_a = a.weight_kg.unwrap_or(f64::NEG_INFINITY);
    let weight_b = b.weight_kg.unwrap_or(f64::NEG_INFINITY);
    weight_a
        .total_cmp(&weight_b)
        .then_with(|| a.reps.cmp(&b.reps))
        .then_with(|| a.set_index.cmp(&b.set_index))
}

/// Build the progress report from every set of the template in `range`
///
/// `rows` must already exclude ignored workouts. Sets without a load count
/// toward the summary but are never chosen as a best set; a workout whose
/// sets are all unweighted contributes no point.
#[must_use]
pub fn build_progress(
    template_id: &str,
    catalog_title: Option<&str>,
    range: DateRange,
    rows: &[ProgressSetRow],
) -> ProgressReport {
    let mut workouts = HashSet::new();
    let mut best: BTreeMap<(DateTime<Utc>, &str), &ProgressSetRow> = BTreeMap::new();

    for row in rows {
        workouts.insert(row.workout_id.as_str());
        if row.weight_kg.is_none() {
            continue;
        }
        best.entry((row.workout_date, row.workout_id.as_str()))
            .and_modify(|current| {
                if cascade(row, current).is_gt() {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    let series = best
        .into_values()
        .filter_map(|row| {
            Some(ProgressPoint {
                workout_id: row.workout_id.clone(),
                date: row.workout_date,
                weight_kg: row.weight_kg?,
                reps: row.reps,
                set_index: row.set_index,
            })
        })
        .collect();

    let exercise_title = catalog_title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .or_else(|| {
            rows.iter()
                .map(|row| row.exercise_title.trim())
                .find(|title| !title.is_empty())
        })
        .unwrap_or(UNNAMED_EXERCISE)
        .to_owned();

    ProgressReport {
        exercise_template_id: template_id.to_owned(),
        exercise_title,
        range,
        summary: ProgressSummary {
            total_sets: rows.len(),
            workouts_count: workouts.len(),
        },
        series,
    }
}
