// ABOUTME: Configuration module for environment-driven settings
// ABOUTME: Provider selection, fetch window, readiness policy and deployment environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! Configuration comes from environment variables only; command-line flags
//! override individual values after loading.

/// Environment variable parsing and validation
pub mod environment;

pub use environment::{Environment, StepgateConfig};
