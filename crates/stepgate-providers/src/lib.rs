// ABOUTME: Health data capability providers for the stepgate step data screen
// ABOUTME: Core provider trait, synthetic and export-file providers, and the provider registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Capability provider implementations and the trait they share.
//!
//! A capability provider is the only thing the screen talks to: it must be
//! initialized once, it owns the permission store, and it answers record
//! queries for a time range.

// Re-export stepgate-core modules so provider files can use `crate::errors::*` etc.
pub use stepgate_core::constants;
pub use stepgate_core::errors;
pub use stepgate_core::models;

/// Core provider trait
pub mod core;
/// Provider selection and construction
pub mod registry;

/// Provider backed by a JSON export file
#[cfg(feature = "provider-export-file")]
pub mod export_file;
/// Scriptable in-memory provider
#[cfg(feature = "provider-synthetic")]
pub mod synthetic_provider;

pub use core::CapabilityProvider;
#[cfg(feature = "provider-export-file")]
pub use export_file::{ExportDocument, ExportFileProvider};
pub use registry::{create_provider, ProviderKind, ProviderSettings};
pub use stepgate_core::errors::provider::{ProviderError, ProviderResult};
#[cfg(feature = "provider-synthetic")]
pub use synthetic_provider::{ConsentPolicy, InitBehavior, ScriptedRead, SyntheticProvider};
