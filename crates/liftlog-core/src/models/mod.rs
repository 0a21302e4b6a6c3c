// ABOUTME: Domain models for synced workouts, their sets, sync state, and the exercise catalog
// ABOUTME: Read shapes mirror storage rows; write shapes are produced by the normalizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod catalog;
mod sync_state;
mod workout;

pub use catalog::{normalize_label, Exercise};
pub use sync_state::SyncState;
pub use workout::{
    ExerciseSet, NewExercise, NewExerciseSet, NewWorkout, Workout, WorkoutDetail, WorkoutFilter,
};
