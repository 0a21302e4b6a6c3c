// ABOUTME: Core types and constants for the liftlog training analytics engine
// ABOUTME: Foundation crate with error handling, domain models, date ranges, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog Core
//!
//! Foundation crate providing shared types for the liftlog workout sync and
//! analytics workspace. Everything here is storage- and transport-agnostic so
//! that the providers and intelligence crates can depend on it without pulling
//! in `sqlx` or `reqwest`.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Defaults for the remote source, sync cooldown, and storage
//! - **models**: Workout, exercise set, sync state, and exercise catalog types
//! - **dates**: Inclusive calendar ranges and their half-open timestamp bounds

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants and default configuration values
pub mod constants;

/// Core data models (Workout, `ExerciseSet`, `SyncState`, catalog)
pub mod models;

/// Calendar date ranges used by every analytics read
pub mod dates;
