// ABOUTME: Exercise catalog tables linking template ids to muscles and equipment
// ABOUTME: Edited out-of-band and read by the muscle aggregator to resolve trained muscles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{normalize_label, Exercise};

/// One side of the catalog's many-to-many links
#[derive(Debug, Clone, Copy)]
enum LinkKind {
    Muscle,
    Equipment,
}

impl LinkKind {
    const fn label_table(self) -> &'static str {
        match self {
            Self::Muscle => "muscles",
            Self::Equipment => "equipment",
        }
    }

    const fn link_table(self) -> &'static str {
        match self {
            Self::Muscle => "exercise_muscles",
            Self::Equipment => "exercise_equipment",
        }
    }

    const fn link_column(self) -> &'static str {
        match self {
            Self::Muscle => "muscle_id",
            Self::Equipment => "equipment_id",
        }
    }
}

impl Database {
    /// Create catalog tables
    pub(super) async fn migrate_catalog(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exercise_title TEXT NOT NULL,
                exercise_template_id TEXT UNIQUE
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS muscles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS equipment (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS exercise_muscles (
                exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
                muscle_id INTEGER NOT NULL REFERENCES muscles(id) ON DELETE CASCADE,
                PRIMARY KEY (exercise_id, muscle_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS exercise_equipment (
                exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
                equipment_id INTEGER NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
                PRIMARY KEY (exercise_id, equipment_id)
            )
            ",
        ])
        .await
    }

    /// Register an exercise or retitle the one with the same template id
    ///
    /// Returns the catalog row id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title, `DatabaseError` if the write fails
    pub async fn upsert_exercise(&self, title: &str, template_id: Option<&str>) -> AppResult<i64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("Exercise title must not be empty"));
        }
        let template_id = template_id.map(str::trim).filter(|id| !id.is_empty());

        let query = if template_id.is_some() {
            r"
            INSERT INTO exercises (exercise_title, exercise_template_id) VALUES (?, ?)
            ON CONFLICT(exercise_template_id) DO UPDATE SET exercise_title = excluded.exercise_title
            RETURNING id
            "
        } else {
            "INSERT INTO exercises (exercise_title, exercise_template_id) VALUES (?, ?) RETURNING id"
        };

        sqlx::query_scalar(query)
            .bind(title)
            .bind(template_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to upsert exercise {title}: {e}")))
    }

    /// Look up a catalog entry by template id
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails
    pub async fn get_exercise(&self, template_id: &str) -> AppResult<Option<Exercise>> {
        let row = sqlx::query(
            "SELECT id, exercise_title, exercise_template_id FROM exercises WHERE exercise_template_id = ?",
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get exercise: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut exercise = row_to_exercise(&row)?;
        let mut muscles = self
            .labels_by_exercise(LinkKind::Muscle, Some(exercise.id))
            .await?;
        let mut equipment = self
            .labels_by_exercise(LinkKind::Equipment, Some(exercise.id))
            .await?;
        exercise.muscles = muscles.remove(&exercise.id).unwrap_or_default();
        exercise.equipment = equipment.remove(&exercise.id).unwrap_or_default();
        Ok(Some(exercise))
    }

    /// Every catalog entry with its links, ordered by title
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails
    pub async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query(
            "SELECT id, exercise_title, exercise_template_id FROM exercises ORDER BY exercise_title, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        let mut muscles = self.labels_by_exercise(LinkKind::Muscle, None).await?;
        let mut equipment = self.labels_by_exercise(LinkKind::Equipment, None).await?;

        rows.iter()
            .map(|row| {
                let mut exercise = row_to_exercise(row)?;
                exercise.muscles = muscles.remove(&exercise.id).unwrap_or_default();
                exercise.equipment = equipment.remove(&exercise.id).unwrap_or_default();
                Ok(exercise)
            })
            .collect()
    }

    /// Replace the muscles trained by an exercise
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no exercise has this template id
    pub async fn set_exercise_muscles(
        &self,
        template_id: &str,
        muscles: &[String],
    ) -> AppResult<Exercise> {
        self.replace_links(template_id, LinkKind::Muscle, muscles).await
    }

    /// Replace the equipment used by an exercise
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no exercise has this template id
    pub async fn set_exercise_equipment(
        &self,
        template_id: &str,
        equipment: &[String],
    ) -> AppResult<Exercise> {
        self.replace_links(template_id, LinkKind::Equipment, equipment)
            .await
    }

    /// Create catalog entries for template ids seen in synced sets
    ///
    /// Existing entries are left alone. The title comes from the most
    /// recently stored set of each template. Returns the number of new entries.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails
    pub async fn discover_exercises(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO exercises (exercise_title, exercise_template_id)
            SELECT exercise_title, exercise_template_id FROM exercise_sets
            WHERE id IN (
                SELECT MAX(id) FROM exercise_sets
                WHERE exercise_template_id IS NOT NULL AND exercise_template_id <> ''
                GROUP BY exercise_template_id
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to discover exercises: {e}")))?;

        let added = result.rows_affected();
        info!(added, "catalog discovery finished");
        Ok(added)
    }

    async fn replace_links(
        &self,
        template_id: &str,
        kind: LinkKind,
        names: &[String],
    ) -> AppResult<Exercise> {
        let labels: BTreeSet<String> = names.iter().filter_map(|n| normalize_label(n)).collect();

        let mut tx = self.begin().await?;

        let exercise_id: i64 =
            sqlx::query_scalar("SELECT id FROM exercises WHERE exercise_template_id = ?")
                .bind(template_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to find exercise: {e}")))?
                .ok_or_else(|| AppError::not_found(format!("Exercise {template_id}")))?;

        sqlx::query(&format!(
            "DELETE FROM {} WHERE exercise_id = ?",
            kind.link_table()
        ))
        .bind(exercise_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to clear links: {e}")))?;

        for label in &labels {
            link_label(&mut tx, kind, exercise_id, label).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit links: {e}")))?;

        self.get_exercise(template_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Exercise {template_id}")))
    }

    /// Linked label names grouped by exercise row id, sorted by name
    /// Link labels grouped by exercise, for one exercise or the whole catalog
    async fn labels_by_exercise(
        &self,
        kind: LinkKind,
        only: Option<i64>,
    ) -> AppResult<HashMap<i64, Vec<String>>> {
        let rows = sqlx::query(&format!(
            "SELECT l.exercise_id, t.name FROM {link} l JOIN {table} t ON t.id = l.{column} \
             WHERE (?1 IS NULL OR l.exercise_id = ?1) \
             ORDER BY l.exercise_id, t.name",
            link = kind.link_table(),
            table = kind.label_table(),
            column = kind.link_column(),
        ))
        .bind(only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read catalog links: {e}")))?;

        let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &rows {
            let exercise_id: i64 = row.try_get("exercise_id")?;
            let name: String = row.try_get("name")?;
            grouped.entry(exercise_id).or_default().push(name);
        }
        Ok(grouped)
    }
}

async fn link_label(
    conn: &mut SqliteConnection,
    kind: LinkKind,
    exercise_id: i64,
    label: &str,
) -> AppResult<()> {
    sqlx::query(&format!(
        "INSERT OR IGNORE INTO {} (name) VALUES (?)",
        kind.label_table()
    ))
    .bind(label)
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to create label {label}: {e}")))?;

    sqlx::query(&format!(
        "INSERT OR IGNORE INTO {link} (exercise_id, {column}) \
         SELECT ?, id FROM {table} WHERE name = ?",
        link = kind.link_table(),
        column = kind.link_column(),
        table = kind.label_table(),
    ))
    .bind(exercise_id)
    .bind(label)
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to link label {label}: {e}")))?;

    Ok(())
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    Ok(Exercise {
        id: row.try_get("id")?,
        exercise_title: row.try_get("exercise_title")?,
        exercise_template_id: row.try_get("exercise_template_id")?,
        muscles: Vec::new(),
        equipment: Vec::new(),
    })
}
