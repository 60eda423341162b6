// ABOUTME: Orchestration of a permission-gated health data fetch
// ABOUTME: Negotiator, readiness gate, record fetcher and the screen that ties them together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Record queries over a trailing time window
pub mod fetcher;
/// Two-state readiness gate
pub mod gate;
/// Required-versus-granted permission reconciliation
pub mod negotiator;
/// The step data screen
pub mod screen;

pub use fetcher::RecordFetcher;
pub use gate::{ReadinessGate, ReadinessPolicy, ReadinessState};
pub use negotiator::{all_granted, missing_permissions, NegotiationOutcome, PermissionNegotiator};
pub use screen::{FetchOutcome, MountOutcome, ScreenOptions, StepDataScreen};
