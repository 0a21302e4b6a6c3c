// ABOUTME: Workout and exercise-set models in their stored and freshly normalized forms
// ABOUTME: The (workout id, template id, set index) triple is the set identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged training session as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Remote-assigned identifier, stable across syncs
    pub id: String,
    /// Workout title (empty when the source had none)
    pub title: String,
    /// Nominal date used for every time-range filter
    pub date: Option<DateTime<Utc>>,
    /// Session start
    pub start_time: Option<DateTime<Utc>>,
    /// Session end
    pub end_time: Option<DateTime<Utc>>,
    /// Elapsed seconds between start and end, clamped at zero
    pub duration_seconds: Option<i64>,
    /// Excluded from every aggregation when true
    pub ignored: bool,
    /// Optional workout classification
    pub type_id: Option<i64>,
    /// Original payload for later re-derivation
    #[serde(skip_serializing)]
    pub raw_json: Option<String>,
}

/// One recorded set as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Surrogate row id
    pub id: i64,
    /// Owning workout
    pub workout_id: String,
    /// Exercise display title
    pub exercise_title: String,
    /// Stable movement identifier, when the source supplied one
    pub exercise_template_id: Option<String>,
    /// 1-based position of the set within its exercise entry
    pub set_index: i64,
    /// Repetitions performed
    pub reps: Option<i64>,
    /// Load in kilograms
    pub weight_kg: Option<f64>,
    /// Distance covered
    pub distance: Option<f64>,
    /// Duration in seconds
    pub duration_seconds: Option<i64>,
    /// Set-type label (normal, warmup, dropset, ...)
    pub set_type: Option<String>,
    /// Original payload
    #[serde(skip_serializing)]
    pub raw_json: Option<String>,
}

/// A workout together with all of its sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDetail {
    /// The workout row
    #[serde(flatten)]
    pub workout: Workout,
    /// Its sets ordered by exercise title, then set index
    pub sets: Vec<ExerciseSet>,
}

/// Listing filter for workouts
#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
    /// Restrict to one calendar year
    pub year: Option<i32>,
    /// Earliest nominal date (inclusive)
    pub from: Option<DateTime<Utc>>,
    /// Latest nominal date (inclusive)
    pub to: Option<DateTime<Utc>>,
    /// Include workouts flagged as ignored
    pub include_ignored: bool,
}

/// Normalized workout ready to be merged into storage
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    /// Identity resolved from the first present id-like field
    pub id: String,
    /// Title, empty when absent
    pub title: String,
    /// Nominal date
    pub date: Option<DateTime<Utc>>,
    /// Session start
    pub start_time: Option<DateTime<Utc>>,
    /// Session end
    pub end_time: Option<DateTime<Utc>>,
    /// Derived duration
    pub duration_seconds: Option<i64>,
    /// Serialized source record
    pub raw_json: String,
    /// Nested exercise entries in source order
    pub exercises: Vec<NewExercise>,
}

/// Normalized exercise entry within a workout
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    /// Display title, empty when absent
    pub title: String,
    /// Movement identifier
    pub template_id: Option<String>,
    /// Sets in source order
    pub sets: Vec<NewExerciseSet>,
}

/// Normalized set
#[derive(Debug, Clone, PartialEq)]
pub struct NewExerciseSet {
    /// 1-based source position; the uniqueness key component
    pub set_index: i64,
    /// Repetitions
    pub reps: Option<i64>,
    /// Load in kilograms
    pub weight_kg: Option<f64>,
    /// Distance
    pub distance: Option<f64>,
    /// Duration in seconds
    pub duration_seconds: Option<i64>,
    /// Set-type label
    pub set_type: Option<String>,
    /// Serialized source record
    pub raw_json: String,
}

impl NewWorkout {
    /// Total number of sets across every exercise entry
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|exercise| exercise.sets.len()).sum()
    }
}
