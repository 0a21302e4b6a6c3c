// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for liftlog-cli
// ABOUTME: Provides sync, analytics read, and exercise catalog commands

pub mod exercises;
pub mod reads;
pub mod sync;
