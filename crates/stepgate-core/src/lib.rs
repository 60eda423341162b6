// ABOUTME: Core types and constants for the stepgate step data screen
// ABOUTME: Foundation crate with error handling, permission and record models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stepgate Core
//!
//! Foundation crate providing the shared types used by the provider crate and
//! the screen orchestrator. It has no async runtime dependency.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Record types, provider names, user-facing messages and env var names
//! - **models**: `Permission`, `StepRecord`, `TimeRangeFilter` and read request/response shapes

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (permissions, step records, time range filters)
pub mod models;
