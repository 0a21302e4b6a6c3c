// ABOUTME: Maps heterogeneous remote workout payloads onto canonical typed values
// ABOUTME: Ordered alias lists per field, lenient timestamp parsing, and numeric coercion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Payload Normalizer
//!
//! The remote source has renamed fields across API versions. Each logical
//! field is therefore described by an ordered list of candidate keys in
//! [`aliases`], and resolved through the single lookup function [`pick`].
//!
//! Normalization never fails: unparseable timestamps and non-numeric values
//! degrade to `None`, and records without an identity are skipped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::models::{NewExercise, NewExerciseSet, NewWorkout};

/// Candidate key lists, in priority order, for every field read from the source
pub mod aliases {
    /// Workout identity
    pub const WORKOUT_ID: &[&str] = &["id", "workout_id", "uuid"];
    /// Workout title
    pub const WORKOUT_TITLE: &[&str] = &["title", "name"];
    /// Session start
    pub const START_TIME: &[&str] = &["start_time", "startTime"];
    /// Session end
    pub const END_TIME: &[&str] = &["end_time", "endTime"];
    /// Nominal date; falls back to the parsed end time when none resolves
    pub const NOMINAL_DATE: &[&str] = &[
        "start_time",
        "startTime",
        "date",
        "performed_at",
        "created_at",
    ];
    /// Nested exercise entries
    pub const EXERCISES: &[&str] = &["exercises", "items", "workout_exercises"];
    /// Exercise display title
    pub const EXERCISE_TITLE: &[&str] = &["title", "name", "exercise_title"];
    /// Exercise template identifier
    pub const TEMPLATE_ID: &[&str] = &[
        "exercise_template_id",
        "exerciseTemplateId",
        "template_id",
        "exercise_id",
    ];
    /// Nested set entries
    pub const SETS: &[&str] = &["sets", "exercise_sets"];
    /// Repetitions
    pub const REPS: &[&str] = &["reps", "rep_count", "repetitions"];
    /// Load in kilograms
    pub const WEIGHT_KG: &[&str] = &["weight_kg", "weightKg", "weight", "kg"];
    /// Distance
    pub const DISTANCE: &[&str] = &["distance", "distance_m", "meters", "distance_meters"];
    /// Set duration
    pub const SET_DURATION: &[&str] = &[
        "duration_seconds",
        "durationSeconds",
        "seconds",
        "duration",
    ];
    /// Set-type label
    pub const SET_TYPE: &[&str] = &["type", "set_type", "kind"];
    /// Page count of the listing envelope
    pub const PAGE_COUNT: &[&str] = &["page_count", "pageCount"];
    /// Workout list of the listing envelope
    pub const WORKOUTS: &[&str] = &["workouts"];
}

/// Timestamp layouts carrying an explicit offset, tried after RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// Offset-less layouts, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// First non-null value among `keys`, in order
///
/// Returns `None` when `record` is not an object or none of the keys is
/// present with a non-null value.
#[must_use]
pub fn pick<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = record.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Textual form of an identifier or label; blank strings and non-scalars are absent
#[must_use]
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Parse an ISO-8601-like timestamp, treating a trailing `Z` as `+00:00`
///
/// Offset-less timestamps and bare dates are read as UTC. Anything else is
/// `None`.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .map_or_else(|| trimmed.to_owned(), |rest| format!("{rest}+00:00"));

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed.with_timezone(&Utc));
    }
    for layout in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, layout) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, layout) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}

/// Timestamp parse of a JSON value; only strings can carry a timestamp
#[must_use]
pub fn timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(parse_timestamp)
}

/// Seconds between the record's start and end, clamped at zero
#[must_use]
pub fn derive_duration(record: &Value) -> Option<i64> {
    let start = pick(record, aliases::START_TIME).and_then(timestamp_value)?;
    let end = pick(record, aliases::END_TIME).and_then(timestamp_value)?;
    Some(end.signed_duration_since(start).num_seconds().max(0))
}

/// Numeric or numeric-string value as a finite float
#[must_use]
pub fn coerce_float(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                text.parse::<f64>().ok()
            }
        }
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Numeric or numeric-string value truncated to an integer through a float
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Safe: `as` saturates and the input is finite
pub fn coerce_int(value: &Value) -> Option<i64> {
    coerce_float(value).map(|number| number.trunc() as i64)
}

/// Normalize one raw workout record
///
/// Returns `None` when the record is not an object or has no identity. Nested
/// exercise entries with neither a title nor a template id, and set entries
/// that are not objects, are skipped individually. Set indexes follow source
/// position, so a skipped set leaves a gap rather than shifting its siblings.
#[must_use]
pub fn normalize_workout(record: &Value) -> Option<NewWorkout> {
    if !record.is_object() {
        debug!("skipping workout record that is not an object");
        return None;
    }
    let Some(id) = pick(record, aliases::WORKOUT_ID).and_then(as_text) else {
        debug!("skipping workout record without an id");
        return None;
    };

    let start_time = pick(record, aliases::START_TIME).and_then(timestamp_value);
    let end_time = pick(record, aliases::END_TIME).and_then(timestamp_value);
    let date = pick(record, aliases::NOMINAL_DATE)
        .and_then(timestamp_value)
        .or(end_time);

    let exercises = list_field(record, aliases::EXERCISES)
        .filter_map(|entry| normalize_exercise(&id, entry))
        .collect();

    Some(NewWorkout {
        title: pick(record, aliases::WORKOUT_TITLE)
            .and_then(as_text)
            .unwrap_or_default(),
        date,
        start_time,
        end_time,
        duration_seconds: derive_duration(record),
        raw_json: record.to_string(),
        exercises,
        id,
    })
}

fn normalize_exercise(workout_id: &str, entry: &Value) -> Option<NewExercise> {
    if !entry.is_object() {
        debug!(workout_id, "skipping exercise entry that is not an object");
        return None;
    }
    let title = pick(entry, aliases::EXERCISE_TITLE)
        .and_then(as_text)
        .unwrap_or_default();
    let template_id = pick(entry, aliases::TEMPLATE_ID).and_then(as_text);
    if title.trim().is_empty() && template_id.is_none() {
        debug!(workout_id, "skipping exercise entry without title or template id");
        return None;
    }

    let sets = list_field(entry, aliases::SETS)
        .enumerate()
        .filter_map(|(position, set)| normalize_set(position, set))
        .collect();

    Some(NewExercise {
        title,
        template_id,
        sets,
    })
}

fn normalize_set(position: usize, set: &Value) -> Option<NewExerciseSet> {
    if !set.is_object() {
        return None;
    }
    Some(NewExerciseSet {
        set_index: i64::try_from(position).map_or(i64::MAX, |index| index + 1),
        reps: pick(set, aliases::REPS).and_then(coerce_int),
        weight_kg: pick(set, aliases::WEIGHT_KG).and_then(coerce_float),
        distance: pick(set, aliases::DISTANCE).and_then(coerce_float),
        duration_seconds: pick(set, aliases::SET_DURATION).and_then(coerce_int),
        set_type: pick(set, aliases::SET_TYPE).and_then(as_text),
        raw_json: set.to_string(),
    })
}

/// Elements of the first present list-valued alias; non-lists read as empty
fn list_field<'a>(record: &'a Value, keys: &[&str]) -> impl Iterator<Item = &'a Value> {
    pick(record, keys)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pick_skips_nulls_and_respects_order() {
        let record = json!({"id": null, "workout_id": "w-2", "uuid": "w-3"});
        assert_eq!(pick(&record, aliases::WORKOUT_ID), Some(&json!("w-2")));
        assert_eq!(pick(&record, &["missing"]), None);
        assert_eq!(pick(&json!([1, 2]), aliases::WORKOUT_ID), None);
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let utc = parse_timestamp("2024-03-01T10:00:00Z").unwrap();
        assert_eq!(utc.to_rfc3339(), "2024-03-01T10:00:00+00:00");

        let offset = parse_timestamp("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(offset, utc);

        let fractional = parse_timestamp("2024-03-01T10:00:00.250Z").unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 250);

        let naive = parse_timestamp("2024-03-01 10:00:00").unwrap();
        assert_eq!(naive, utc);

        let day = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_garbage_is_absent() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45T99:00:00Z").is_none());
        assert!(timestamp_value(&json!(1_700_000_000)).is_none());
    }

    #[test]
    fn test_derive_duration() {
        let record = json!({
            "start_time": "2024-03-01T10:00:00Z",
            "end_time": "2024-03-01T11:15:30Z"
        });
        assert_eq!(derive_duration(&record), Some(4530));

        let reversed = json!({
            "start_time": "2024-03-01T11:00:00Z",
            "end_time": "2024-03-01T10:00:00Z"
        });
        assert_eq!(derive_duration(&reversed), Some(0));

        let open = json!({"start_time": "2024-03-01T11:00:00Z", "end_time": "soon"});
        assert_eq!(derive_duration(&open), None);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce_int(&json!(8)), Some(8));
        assert_eq!(coerce_int(&json!("8")), Some(8));
        assert_eq!(coerce_int(&json!("8.9")), Some(8));
        assert_eq!(coerce_int(&json!(7.99)), Some(7));
        assert_eq!(coerce_int(&json!("eight")), None);
        assert_eq!(coerce_int(&json!("")), None);
        assert_eq!(coerce_int(&json!(true)), None);
        assert_eq!(coerce_float(&json!("102.5")), Some(102.5));
        assert_eq!(coerce_float(&json!("inf")), None);
        assert_eq!(coerce_float(&json!({"kg": 3})), None);
    }

    #[test]
    fn test_normalize_workout_resolves_aliases() {
        let record = json!({
            "workout_id": 42,
            "name": "Push day",
            "startTime": "2024-03-01T10:00:00Z",
            "endTime": "2024-03-01T11:00:00Z",
            "workout_exercises": [
                {
                    "exerciseTemplateId": "T-BENCH",
                    "exercise_title": "Bench Press",
                    "exercise_sets": [
                        {"weightKg": "80", "rep_count": 10, "kind": "normal"},
                        {"weight": 85.5, "reps": "8"}
                    ]
                }
            ]
        });

        let workout = normalize_workout(&record).unwrap();
        assert_eq!(workout.id, "42");
        assert_eq!(workout.title, "Push day");
        assert_eq!(workout.duration_seconds, Some(3600));
        assert_eq!(workout.date, workout.start_time);
        assert_eq!(workout.exercises.len(), 1);

        let exercise = &workout.exercises[0];
        assert_eq!(exercise.template_id.as_deref(), Some("T-BENCH"));
        assert_eq!(exercise.title, "Bench Press");
        assert_eq!(exercise.sets[0].set_index, 1);
        assert_eq!(exercise.sets[0].weight_kg, Some(80.0));
        assert_eq!(exercise.sets[0].reps, Some(10));
        assert_eq!(exercise.sets[0].set_type.as_deref(), Some("normal"));
        assert_eq!(exercise.sets[1].set_index, 2);
        assert_eq!(exercise.sets[1].reps, Some(8));
    }

    #[test]
    fn test_nominal_date_falls_back_to_end_time() {
        let record = json!({
            "id": "w-1",
            "start_time": "not a date",
            "end_time": "2024-03-01T11:00:00Z"
        });
        let workout = normalize_workout(&record).unwrap();
        assert!(workout.start_time.is_none());
        assert_eq!(workout.date, workout.end_time);

        let explicit = json!({"id": "w-2", "date": "2024-02-01", "end_time": "2024-03-01T11:00:00Z"});
        let workout = normalize_workout(&explicit).unwrap();
        assert_eq!(workout.date, parse_timestamp("2024-02-01"));
    }

    #[test]
    fn test_identity_missing_records_are_skipped() {
        assert!(normalize_workout(&json!({"title": "no id"})).is_none());
        assert!(normalize_workout(&json!({"id": ""})).is_none());
        assert!(normalize_workout(&json!("w-1")).is_none());

        let record = json!({
            "id": "w-1",
            "exercises": [
                {"sets": [{"reps": 5}]},
                "garbage",
                {"title": "Row", "sets": [{"reps": 5}, null, 3, {"reps": 6}]}
            ]
        });
        let workout = normalize_workout(&record).unwrap();
        assert_eq!(workout.exercises.len(), 1);
        let indexes: Vec<i64> = workout.exercises[0]
            .sets
            .iter()
            .map(|set| set.set_index)
            .collect();
        assert_eq!(indexes, vec![1, 4]);
    }
}
