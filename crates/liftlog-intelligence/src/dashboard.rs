// ABOUTME: Calendar-year rollup of training frequency and volume
// ABOUTME: Monthly buckets, distinct training days and exercises, and top exercises by volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::records::{record_key, UNKNOWN_TITLE};

/// How many exercises the top-by-volume list keeps
pub const TOP_EXERCISES: usize = 5;

/// A dated, non-ignored workout inside the year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardWorkoutRow {
    /// Workout id
    pub workout_id: String,
    /// Nominal date
    pub date: DateTime<Utc>,
}

/// A set belonging to one of the year's workouts
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSetRow {
    /// Nominal date of the owning workout
    pub workout_date: DateTime<Utc>,
    /// Exercise title
    pub exercise_title: String,
    /// Exercise template id
    pub exercise_template_id: Option<String>,
    /// Load in kilograms
    pub weight_kg: Option<f64>,
    /// Repetitions
    pub reps: Option<i64>,
}

impl DashboardSetRow {
    /// `weight * reps` when both are present and positive
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: rep counts are small integers
    pub fn volume(&self) -> Option<f64> {
        let weight = self.weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
        let reps = self.reps.filter(|r| *r > 0)?;
        Some(weight * reps as f64)
    }
}

/// Volume lifted on one exercise during the year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseVolume {
    /// Display title
    pub exercise_title: String,
    /// Template id, when known
    pub exercise_template_id: Option<String>,
    /// Total `weight * reps`, rounded to two decimals
    pub volume_kg: f64,
    /// Sets that contributed volume
    pub sets: u32,
}

/// Year-at-a-glance training summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    /// Calendar year
    pub year: i32,
    /// Non-ignored workouts in the year
    pub workouts_count: u32,
    /// Distinct calendar days with a workout
    pub training_days: u32,
    /// Total `weight * reps`, rounded to two decimals
    pub total_volume_kg: f64,
    /// Distinct exercise titles (trimmed, case-insensitive)
    pub unique_exercises: u32,
    /// Max-weight personal records first set during the year
    pub pr_count: u32,
    /// Volume per month, January first
    pub volume_by_month: [f64; 12],
    /// Workouts per month, January first
    pub workouts_by_month: [u32; 12],
    /// Exercises with the most volume, largest first
    pub top_exercises: Vec<ExerciseVolume>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Roll up one calendar year
///
/// Rows outside `year` are ignored, so callers may pass a superset.
#[must_use]
pub fn summarize_year(
    year: i32,
    workouts: &[DashboardWorkoutRow],
    sets: &[DashboardSetRow],
    pr_count: u32,
) -> YearSummary {
    let mut workouts_by_month = [0_u32; 12];
    let mut days: HashSet<NaiveDate> = HashSet::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for workout in workouts.iter().filter(|w| w.date.year() == year) {
        if !seen.insert(workout.workout_id.as_str()) {
            continue;
        }
        workouts_by_month[workout.date.month0() as usize] += 1;
        days.insert(workout.date.date_naive());
    }

    let mut volume_by_month = [0.0_f64; 12];
    let mut total_volume = 0.0;
    let mut titles: HashSet<String> = HashSet::new();
    let mut per_exercise: HashMap<String, ExerciseVolume> = HashMap::new();

    for set in sets.iter().filter(|s| s.workout_date.year() == year) {
        let title = set.exercise_title.trim();
        if !title.is_empty() {
            titles.insert(title.to_lowercase());
        }
        let Some(volume) = set.volume() else {
            continue;
        };
        total_volume += volume;
        volume_by_month[set.workout_date.month0() as usize] += volume;

        let entry = per_exercise
            .entry(record_key(set.exercise_template_id.as_deref(), title))
            .or_insert_with(|| ExerciseVolume {
                exercise_title: if title.is_empty() {
                    UNKNOWN_TITLE.to_owned()
                } else {
                    title.to_owned()
                },
                exercise_template_id: set.exercise_template_id.clone(),
                volume_kg: 0.0,
                sets: 0,
            });
        entry.volume_kg += volume;
        entry.sets += 1;
    }

    let mut top_exercises: Vec<ExerciseVolume> = per_exercise
        .into_values()
        .map(|mut exercise| {
            exercise.volume_kg = round2(exercise.volume_kg);
            exercise
        })
        .collect();
    top_exercises.sort_by(|a, b| {
        b.volume_kg
            .total_cmp(&a.volume_kg)
            .then_with(|| a.exercise_title.cmp(&b.exercise_title))
    });
    top_exercises.truncate(TOP_EXERCISES);

    YearSummary {
        year,
        workouts_count: count(seen.len()),
        training_days: count(days.len()),
        total_volume_kg: round2(total_volume),
        unique_exercises: count(titles.len()),
        pr_count,
        volume_by_month: volume_by_month.map(round2),
        workouts_by_month,
        top_exercises,
    }
}
