// ABOUTME: Derived training metrics computed on demand from stored set rows
// ABOUTME: Personal records, per-exercise progress, muscle radar, and yearly dashboard rollups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog Intelligence
//!
//! Every engine in this crate is a pure function over row structs already
//! filtered by the storage layer (ignored workouts removed, ranges applied).
//! Nothing here performs I/O or caches results, so the same rows always
//! produce the same output regardless of the order they arrive in.

// Re-export liftlog-core modules so engine code can keep `use crate::errors::*`
pub use liftlog_core::constants;
pub use liftlog_core::dates;
pub use liftlog_core::errors;
pub use liftlog_core::models;

/// Yearly volume and frequency rollup
pub mod dashboard;
/// Per-workout best set of one exercise over a date range
pub mod progress;
/// Muscle-group coverage and six-bucket radar tallies
pub mod radar;
/// Best-per-exercise scoring under a selectable metric
pub mod records;

pub use dashboard::{summarize_year, DashboardSetRow, DashboardWorkoutRow, ExerciseVolume, YearSummary};
pub use progress::{build_progress, ProgressPoint, ProgressReport, ProgressSetRow, ProgressSummary};
pub use radar::{tally_muscles, Comparison, MuscleSummary, MuscleTally, RadarBucket, RadarTally, WorkoutMuscleRow};
pub use records::{compute_records, epley_e1rm, record_key, PersonalRecord, RecordCandidate, RecordMetric};
