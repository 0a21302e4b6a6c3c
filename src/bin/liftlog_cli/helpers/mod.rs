// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for liftlog-cli
// ABOUTME: Provides the shared command context and output formatting

pub mod context;
pub mod display;
