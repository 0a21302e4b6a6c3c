// ABOUTME: Personal-record engine selecting the best set per exercise under a metric
// ABOUTME: Supports max weight, Epley estimated 1RM, and max weight at an exact rep count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::errors::{AppError, AppResult};

/// Group key used when a set has neither a template id nor a title
pub const UNKNOWN_KEY: &str = "unknown";

/// Display title used when a set has no title
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Scoring rule for personal records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "metric", content = "reps", rename_all = "snake_case")]
pub enum RecordMetric {
    /// Heaviest load lifted
    MaxWeight,
    /// Estimated one-repetition maximum (Epley)
    E1rm,
    /// Heaviest load lifted for exactly this many reps
    MaxWeightAtReps(i64),
}

impl RecordMetric {
    /// Parse a metric name, taking the rep target for `max_weight_at_reps`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown name, or when
    /// `max_weight_at_reps` is requested without a positive rep target
    pub fn parse(name: &str, reps: Option<i64>) -> AppResult<Self> {
        match name.trim() {
            "max_weight" => Ok(Self::MaxWeight),
            "e1rm" => Ok(Self::E1rm),
            "max_weight_at_reps" => match reps {
                Some(target) if target > 0 => Ok(Self::MaxWeightAtReps(target)),
                _ => Err(AppError::invalid_input(
                    "max_weight_at_reps requires a positive reps value",
                )),
            },
            other => Err(AppError::invalid_input(format!(
                "unknown record metric '{other}' (expected max_weight, e1rm or max_weight_at_reps)"
            ))),
        }
    }

    /// Stable metric name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxWeight => "max_weight",
            Self::E1rm => "e1rm",
            Self::MaxWeightAtReps(_) => "max_weight_at_reps",
        }
    }

    /// Score one set, or `None` when the set does not qualify for this metric
    #[must_use]
    pub fn score(self, weight_kg: f64, reps: Option<i64>) -> Option<f64> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return None;
        }
        match self {
            Self::MaxWeight => Some(weight_kg),
            Self::E1rm => reps
                .filter(|count| *count > 0)
                .map(|count| epley_e1rm(weight_kg, count)),
            Self::MaxWeightAtReps(target) => (reps == Some(target)).then_some(weight_kg),
        }
    }
}

impl fmt::Display for RecordMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxWeightAtReps(target) => write!(f, "{}({target})", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Epley estimated one-rep max: `weight * (1 + reps / 30)`
#[must_use]
#[allow(clippy::cast_precision_loss)] // Safe: rep counts are small integers
pub fn epley_e1rm(weight_kg: f64, reps: i64) -> f64 {
    weight_kg * (1.0 + reps as f64 / 30.0)
}

/// Grouping key: template id, else trimmed lower-cased title, else `unknown`
#[must_use]
pub fn record_key(template_id: Option<&str>, title: &str) -> String {
    if let Some(template) = template_id.filter(|id| !id.is_empty()) {
        return template.to_owned();
    }
    let normalized = title.trim().to_lowercase();
    if normalized.is_empty() {
        UNKNOWN_KEY.to_owned()
    } else {
        normalized
    }
}

/// One weighted set from a non-ignored workout
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCandidate {
    /// Owning workout
    pub workout_id: String,
    /// Owning workout title
    pub workout_title: String,
    /// Nominal workout date
    pub workout_date: Option<DateTime<Utc>>,
    /// Exercise title as stored
    pub exercise_title: String,
    /// Exercise template id
    pub exercise_template_id: Option<String>,
    /// Set position within its exercise
    pub set_index: i64,
    /// Repetitions
    pub reps: Option<i64>,
    /// Load in kilograms
    pub weight_kg: f64,
}

/// Best set for one exercise group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Group key the record was computed under
    pub key: String,
    /// Exercise title, `Unknown` when the set had none
    pub exercise_title: String,
    /// Template id of the winning set
    pub exercise_template_id: Option<String>,
    /// Metric name
    pub metric: String,
    /// Winning score
    pub value: f64,
    /// Load of the winning set
    pub weight_kg: f64,
    /// Reps of the winning set
    pub reps: Option<i64>,
    /// Date the record was set
    pub date: Option<DateTime<Utc>>,
    /// Workout the record was set in
    pub workout_id: String,
    /// Title of that workout
    pub workout_title: String,
    /// Set position of the winning set
    pub set_index: i64,
}

/// Earliest date first, undated sets last, then workout id, then set index
fn precedence(a: &RecordCandidate, b: &RecordCandidate) -> Ordering {
    let by_date = match (a.workout_date, b.workout_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date
        .then_with(|| a.workout_id.cmp(&b.workout_id))
        .then_with(|| a.set_index.cmp(&b.set_index))
}

/// Best qualifying set per exercise group, sorted by score descending
///
/// A challenger replaces the incumbent when its score is strictly greater.
/// Equal scores go to the set performed first (see [`precedence`]), so the
/// result does not depend on the order of `candidates`.
#[must_use]
pub fn compute_records(candidates: &[RecordCandidate], metric: RecordMetric) -> Vec<PersonalRecord> {
    let mut best: HashMap<String, (f64, &RecordCandidate)> = HashMap::new();

    for candidate in candidates {
        let Some(score) = metric.score(candidate.weight_kg, candidate.reps) else {
            continue;
        };
        let key = record_key(
            candidate.exercise_template_id.as_deref(),
            &candidate.exercise_title,
        );
        match best.get_mut(&key) {
            Some((incumbent_score, incumbent)) => {
                let wins = score > *incumbent_score
                    || (score.total_cmp(incumbent_score).is_eq()
                        && precedence(candidate, incumbent).is_lt());
                if wins {
                    *incumbent_score = score;
                    *incumbent = candidate;
                }
            }
            None => {
                best.insert(key, (score, candidate));
            }
        }
    }

    let mut records: Vec<PersonalRecord> = best
        .into_iter()
        .map(|(key, (value, set))| {
            let title = set.exercise_title.trim();
            PersonalRecord {
                key,
                exercise_title: if title.is_empty() {
                    UNKNOWN_TITLE.to_owned()
                } else {
                    title.to_owned()
                },
                exercise_template_id: set.exercise_template_id.clone(),
                metric: metric.as_str().to_owned(),
                value,
                weight_kg: set.weight_kg,
                reps: set.reps,
                date: set.workout_date,
                workout_id: set.workout_id.clone(),
                workout_title: set.workout_title.clone(),
                set_index: set.set_index,
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.exercise_title.cmp(&b.exercise_title))
            .then_with(|| a.key.cmp(&b.key))
    });
    records
}
