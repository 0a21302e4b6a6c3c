// ABOUTME: Read queries that feed the records, progress, muscle, and dashboard engines
// ABOUTME: Every query excludes ignored workouts and filters on the workout's nominal date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use liftlog_intelligence::{
    DashboardSetRow, DashboardWorkoutRow, ProgressSetRow, RecordCandidate, WorkoutMuscleRow,
};
use sqlx::Row;

use super::workouts::year_bounds;
use super::Database;
use crate::dates::DateRange;
use crate::errors::{AppError, AppResult};

impl Database {
    /// Sets with a positive weight, optionally limited to one calendar year
    ///
    /// Rows come back in (date, workout id, set index) order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails
    pub async fn record_candidates(&self, year: Option<i32>) -> AppResult<Vec<RecordCandidate>> {
        let (start, end) = match year {
            Some(year) => {
                let (start, end) = year_bounds(year)?;
                (Some(start), Some(end))
            }
            None => (None, None),
        };

        let rows = sqlx::query(
            r"
            SELECT s.workout_id, w.title AS workout_title, w.date AS workout_date,
                   s.exercise_title, s.exercise_template_id, s.set_index, s.reps, s.weight_kg
            FROM exercise_sets s
            JOIN workouts w ON w.id = s.workout_id
            WHERE w.ignored = 0
              AND s.weight_kg IS NOT NULL AND s.weight_kg > 0
              AND (?1 IS NULL OR w.date >= ?1)
              AND (?2 IS NULL OR w.date < ?2)
            ORDER BY w.date, s.workout_id, s.set_index
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load record candidates: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(RecordCandidate {
                    workout_id: row.try_get("workout_id")?,
                    workout_title: row.try_get("workout_title")?,
                    workout_date: row.try_get("workout_date")?,
                    exercise_title: row.try_get("exercise_title")?,
                    exercise_template_id: row.try_get("exercise_template_id")?,
                    set_index: row.try_get("set_index")?,
                    reps: row.try_get("reps")?,
                    weight_kg: row.try_get("weight_kg")?,
                })
            })
            .collect()
    }

    /// Every set of one exercise template inside a date range
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails
    pub async fn progress_rows(
        &self,
        template_id: &str,
        range: &DateRange,
    ) -> AppResult<Vec<ProgressSetRow>> {
        let (start, end) = range.bounds();

        let rows = sqlx::query(
            r"
            SELECT s.workout_id, w.date AS workout_date, s.exercise_title,
                   s.set_index, s.reps, s.weight_kg
            FROM exercise_sets s
            JOIN workouts w ON w.id = s.workout_id
            WHERE s.exercise_template_id = ?
              AND w.ignored = 0
              AND w.date IS NOT NULL
              AND w.date >= ? AND w.date < ?
            ORDER BY w.date, s.workout_id, s.set_index
            ",
        )
        .bind(template_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load progress rows: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(ProgressSetRow {
                    workout_id: row.try_get("workout_id")?,
                    workout_date: row.try_get("workout_date")?,
                    exercise_title: row.try_get("exercise_title")?,
                    set_index: row.try_get("set_index")?,
                    reps: row.try_get("reps")?,
                    weight_kg: row.try_get("weight_kg")?,
                })
            })
            .collect()
    }

    /// Distinct (workout, muscle) pairs resolved through the catalog
    ///
    /// Sets without a template id, or whose template has no catalog muscles,
    /// contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails
    pub async fn workout_muscle_rows(&self, range: &DateRange) -> AppResult<Vec<WorkoutMuscleRow>> {
        let (start, end) = range.bounds();

        let rows = sqlx::query(
            r"
            SELECT DISTINCT w.id AS workout_id, m.name AS muscle
            FROM workouts w
            JOIN exercise_sets s ON s.workout_id = w.id
            JOIN exercises e ON e.exercise_template_id = s.exercise_template_id
            JOIN exercise_muscles em ON em.exercise_id = e.id
            JOIN muscles m ON m.id = em.muscle_id
            WHERE w.ignored = 0
              AND w.date IS NOT NULL
              AND w.date >= ? AND w.date < ?
            ORDER BY w.id, m.name
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load muscle rows: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(WorkoutMuscleRow {
                    workout_id: row.try_get("workout_id")?,
                    muscle: row.try_get("muscle")?,
                })
            })
            .collect()
    }

    /// Dated workouts of a calendar year and all of their sets
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unrepresentable year, `DatabaseError` if
    /// a query fails
    pub async fn dashboard_rows(
        &self,
        year: i32,
    ) -> AppResult<(Vec<DashboardWorkoutRow>, Vec<DashboardSetRow>)> {
        let (start, end) = year_bounds(year)?;

        let workout_rows = sqlx::query(
            r"
            SELECT id, date FROM workouts
            WHERE ignored = 0 AND date IS NOT NULL AND date >= ? AND date < ?
            ORDER BY date, id
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load dashboard workouts: {e}")))?;

        let workouts = workout_rows
            .iter()
            .map(|row| {
                Ok(DashboardWorkoutRow {
                    workout_id: row.try_get("id")?,
                    date: row.try_get("date")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let set_rows = sqlx::query(
            r"
            SELECT w.date AS workout_date, s.exercise_title, s.exercise_template_id,
                   s.weight_kg, s.reps
            FROM exercise_sets s
            JOIN workouts w ON w.id = s.workout_id
            WHERE w.ignored = 0 AND w.date IS NOT NULL AND w.date >= ? AND w.date < ?
            ORDER BY w.date, s.workout_id, s.set_index
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load dashboard sets: {e}")))?;

        let sets = set_rows
            .iter()
            .map(|row| {
                Ok(DashboardSetRow {
                    workout_date: row.try_get("workout_date")?,
                    exercise_title: row.try_get("exercise_title")?,
                    exercise_template_id: row.try_get("exercise_template_id")?,
                    weight_kg: row.try_get("weight_kg")?,
                    reps: row.try_get("reps")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok((workouts, sets))
    }
}
