// ABOUTME: Main library entry point for the stepgate step data screen
// ABOUTME: Permission-gated orchestration of a health data provider with terminal presentation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stepgate
//!
//! Shows the last day of step data from a health data provider. The screen
//! initializes the provider once, makes sure read access to step records is
//! granted, and then lets the user fetch records for a trailing window.
//!
//! ## Flow
//!
//! ```text
//! mount():   initialize -> negotiate permissions -> open readiness gate
//! fetch():   gate open? -> read_records([now - 24h, now]) -> replace displayed rows
//! ```
//!
//! Provider failures never escape the screen: each one becomes a single
//! advisory for the user and a single diagnostic log entry.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stepgate::notifications::TerminalSink;
//! use stepgate::orchestrator::{ScreenOptions, StepDataScreen};
//! use stepgate_providers::SyntheticProvider;
//!
//! # async fn example() {
//! let screen = StepDataScreen::new(
//!     Arc::new(SyntheticProvider::new()),
//!     Arc::new(TerminalSink),
//!     ScreenOptions::default(),
//! );
//! screen.mount().await;
//! screen.fetch_steps().await;
//! println!("{}", stepgate::presentation::render_text(&screen.view()));
//! # }
//! ```

/// Environment-based configuration
pub mod config;

/// Unified error types re-exported from stepgate-core
pub mod errors;

/// Output format selection (text, JSON)
pub mod formatters;

/// Structured logging setup
pub mod logging;

/// User-facing advisories and the sinks that display them
pub mod notifications;

/// Permission negotiation, readiness gate, record fetching and the screen itself
pub mod orchestrator;

/// Screen view model and text rendering
pub mod presentation;

pub use stepgate_core::constants;
pub use stepgate_core::models;
