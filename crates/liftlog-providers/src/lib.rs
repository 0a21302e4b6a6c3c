// ABOUTME: Remote workout source, payload normalization, and retry utilities for liftlog
// ABOUTME: Core source trait, Hevy HTTP client, field-alias normalizer, and bounded backoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Remote workout source implementations and core abstractions.
//!
//! The sync pipeline only ever talks to a [`WorkoutSource`]. The production
//! implementation is [`HevyClient`]; tests substitute scripted sources.

// Re-export liftlog-core modules so provider code can keep `use crate::errors::*`
pub use liftlog_core::constants;
pub use liftlog_core::errors;
pub use liftlog_core::models;

/// Hevy REST client
pub mod hevy;
/// Shared HTTP client for source API calls
pub mod http_client;
/// Field-alias resolution and value coercion for remote payloads
pub mod normalizer;
/// Bounded exponential backoff around page fetches
pub mod retry;
/// Source trait and page envelope
pub mod source;

pub use hevy::{HevyClient, HevyConfig};
pub use http_client::{build_client, initialize_shared_client, shared_client, HttpClientConfig};
pub use liftlog_core::errors::provider::{ProviderError, ProviderResult};
pub use normalizer::normalize_workout;
pub use retry::RetryPolicy;
pub use source::{WorkoutPage, WorkoutSource};
