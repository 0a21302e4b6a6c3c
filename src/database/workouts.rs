// ABOUTME: Workout and exercise-set tables with idempotent upsert and insert-or-ignore writes
// ABOUTME: Set identity is (workout id, template id, set index) enforced by a unique expression index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ExerciseSet, NewExercise, NewExerciseSet, NewWorkout, Workout, WorkoutDetail, WorkoutFilter,
};

const WORKOUT_COLUMNS: &str =
    "id, title, date, start_time, end_time, duration_seconds, ignored, type_id, raw_json";

const SET_COLUMNS: &str = "id, workout_id, exercise_title, exercise_template_id, set_index, \
     reps, weight_kg, distance, duration_seconds, set_type, raw_json";

impl Database {
    /// Create workout tables
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS workout_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL DEFAULT '',
                date TEXT,
                start_time TEXT,
                end_time TEXT,
                duration_seconds INTEGER,
                ignored INTEGER NOT NULL DEFAULT 0,
                type_id INTEGER REFERENCES workout_types(id) ON DELETE SET NULL,
                raw_json TEXT
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date)",
            r"
            CREATE TABLE IF NOT EXISTS exercise_sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_title TEXT NOT NULL DEFAULT '',
                exercise_template_id TEXT,
                set_index INTEGER NOT NULL,
                reps INTEGER,
                weight_kg REAL,
                distance REAL,
                duration_seconds INTEGER,
                set_type TEXT,
                raw_json TEXT
            )
            ",
            "DROP INDEX IF EXISTS uq_exercise_sets_identity",
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS uq_exercise_sets_exercise_identity
                ON exercise_sets(
                    workout_id,
                    IFNULL(exercise_template_id, 'title:' || lower(trim(exercise_title))),
                    set_index
                )
            ",
            "CREATE INDEX IF NOT EXISTS idx_exercise_sets_template ON exercise_sets(exercise_template_id)",
        ])
        .await
    }

    /// Fetch one workout with all of its sets
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, `DatabaseError` otherwise
    pub async fn get_workout(&self, workout_id: &str) -> AppResult<WorkoutDetail> {
        let row = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?"
        ))
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?
        .ok_or_else(|| AppError::not_found(format!("Workout {workout_id}")))?;

        let workout = row_to_workout(&row)?;

        let set_rows = sqlx::query(&format!(
            "SELECT {SET_COLUMNS} FROM exercise_sets WHERE workout_id = ? \
             ORDER BY exercise_title, set_index"
        ))
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout sets: {e}")))?;

        let sets = set_rows
            .iter()
            .map(row_to_set)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(WorkoutDetail { workout, sets })
    }

    /// List workouts newest first; undated workouts sort last
    ///
    /// Any date restriction excludes undated workouts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails, `InvalidInput` for an
    /// out-of-range year
    pub async fn list_workouts(&self, filter: &WorkoutFilter) -> AppResult<Vec<Workout>> {
        let (year_start, year_end) = match filter.year {
            Some(year) => {
                let (start, end) = year_bounds(year)?;
                (Some(start), Some(end))
            }
            None => (None, None),
        };

        let rows = sqlx::query(&format!(
            r"
            SELECT {WORKOUT_COLUMNS} FROM workouts
            WHERE (?1 IS NULL OR date >= ?1)
              AND (?2 IS NULL OR date < ?2)
              AND (?3 IS NULL OR date >= ?3)
              AND (?4 IS NULL OR date <= ?4)
              AND (?5 OR ignored = 0)
            ORDER BY date IS NULL, date DESC, id
            "
        ))
        .bind(year_start)
        .bind(year_end)
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.include_ignored)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// Number of stored workouts, ignored ones included
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails
    pub async fn workout_count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM workouts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count workouts: {e}")))
    }

    /// Number of stored sets
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails
    pub async fn set_count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM exercise_sets")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count sets: {e}")))
    }
}

// ============================================================================
// Connection-level writes (run inside a caller-owned transaction)
// ============================================================================

/// Insert a workout or refresh its mutable fields
///
/// The `ignored` flag and `type_id` are never touched by a re-sync.
///
/// # Errors
///
/// Returns `DatabaseError` if the statement fails
pub async fn upsert_workout(conn: &mut SqliteConnection, workout: &NewWorkout) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO workouts (id, title, date, start_time, end_time, duration_seconds, raw_json)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            date = excluded.date,
            start_time = excluded.start_time,
            end_time = excluded.end_time,
            duration_seconds = excluded.duration_seconds,
            raw_json = excluded.raw_json
        ",
    )
    .bind(&workout.id)
    .bind(&workout.title)
    .bind(workout.date)
    .bind(workout.start_time)
    .bind(workout.end_time)
    .bind(workout.duration_seconds)
    .bind(&workout.raw_json)
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to upsert workout {}: {e}", workout.id)))?;

    Ok(())
}

/// Insert a set unless one with the same identity already exists
///
/// Returns `true` when a row was written. An existing set is left as it was,
/// so edits to already-synced sets are not picked up.
///
/// # Errors
///
/// Returns `DatabaseError` if the statement fails
pub async fn insert_set(
    conn: &mut SqliteConnection,
    workout_id: &str,
    exercise: &NewExercise,
    set: &NewExerciseSet,
) -> AppResult<bool> {
    let result = sqlx::query(
        r"
        INSERT INTO exercise_sets (
            workout_id, exercise_title, exercise_template_id, set_index,
            reps, weight_kg, distance, duration_seconds, set_type, raw_json
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(workout_id)
    .bind(&exercise.title)
    .bind(exercise.template_id.as_deref())
    .bind(set.set_index)
    .bind(set.reps)
    .bind(set.weight_kg)
    .bind(set.distance)
    .bind(set.duration_seconds)
    .bind(set.set_type.as_deref())
    .bind(&set.raw_json)
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert set for {workout_id}: {e}")))?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Helpers
// ============================================================================

/// Half-open `[Jan 1 year, Jan 1 year+1)` bounds in UTC
pub(super) fn year_bounds(year: i32) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = year
        .checked_add(1)
        .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1));
    match (start, end) {
        (Some(start), Some(end)) => Ok((midnight(start), midnight(end))),
        _ => Err(AppError::invalid_input(format!("Year {year} is out of range"))),
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    Ok(Workout {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        date: row.try_get("date")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        duration_seconds: row.try_get("duration_seconds")?,
        ignored: row.try_get("ignored")?,
        type_id: row.try_get("type_id")?,
        raw_json: row.try_get("raw_json")?,
    })
}

fn row_to_set(row: &SqliteRow) -> AppResult<ExerciseSet> {
    Ok(ExerciseSet {
        id: row.try_get("id")?,
        workout_id: row.try_get("workout_id")?,
        exercise_title: row.try_get("exercise_title")?,
        exercise_template_id: row.try_get("exercise_template_id")?,
        set_index: row.try_get("set_index")?,
        reps: row.try_get("reps")?,
        weight_kg: row.try_get("weight_kg")?,
        distance: row.try_get("distance")?,
        duration_seconds: row.try_get("duration_seconds")?,
        set_type: row.try_get("set_type")?,
        raw_json: row.try_get("raw_json")?,
    })
}
