// ABOUTME: Exercise catalog model linking movements to trained muscles and equipment
// ABOUTME: Catalog labels are stored trimmed and lower-cased
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Static reference entry for one movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Surrogate row id
    pub id: i64,
    /// Display title
    pub exercise_title: String,
    /// Movement identifier matched against `ExerciseSet::exercise_template_id`
    pub exercise_template_id: Option<String>,
    /// Trained muscle names
    pub muscles: Vec<String>,
    /// Equipment names
    pub equipment: Vec<String>,
}

/// Canonical form of a muscle or equipment label; `None` when blank
#[must_use]
pub fn normalize_label(raw: &str) -> Option<String> {
    let label = raw.trim().to_lowercase();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}
