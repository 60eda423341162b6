// ABOUTME: Core capability provider trait for permission-gated health data access
// ABOUTME: Defines initialize, permission lookup, permission request and record query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Capability Provider Contract
//!
//! Every provider exposes the same four operations:
//!
//! 1. `initialize()` must be called exactly once before anything else. `Ok(false)`
//!    means the provider is unsupported on this device; `Err` means the call
//!    itself failed.
//! 2. `get_granted_permissions()` returns the current grant set, fresh on every call.
//! 3. `request_permission()` may suspend while the user decides and returns the
//!    set granted after the decision.
//! 4. `read_records()` answers a single time-bounded query, records in provider order.
//!
//! Providers never retry and never apply timeouts; callers decide how to
//! surface failures.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stepgate_providers::{CapabilityProvider, SyntheticProvider};
//! use stepgate_providers::models::{Permission, RecordType};
//!
//! # async fn example() -> stepgate_providers::ProviderResult<()> {
//! let provider: Arc<dyn CapabilityProvider> = Arc::new(SyntheticProvider::new());
//! if provider.initialize().await? {
//!     provider
//!         .request_permission(&[Permission::read(RecordType::steps())])
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::errors::ProviderResult;
use crate::models::{Permission, ReadRecordsOptions, ReadRecordsResult, RecordType};
use async_trait::async_trait;

/// Permissioned access to device-held health data
///
/// Implementations must be `Send + Sync`; the screen shares one handle across
/// overlapping fetches.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Provider name (e.g., "synthetic", "export-file")
    fn name(&self) -> &'static str;

    /// Prepare the provider; `Ok(false)` when unsupported
    async fn initialize(&self) -> ProviderResult<bool>;

    /// Permissions currently granted
    async fn get_granted_permissions(&self) -> ProviderResult<Vec<Permission>>;

    /// Ask the user to grant `permissions`, returning the resulting grant set
    async fn request_permission(&self, permissions: &[Permission])
        -> ProviderResult<Vec<Permission>>;

    /// Query records of `record_type` matching `options`
    async fn read_records(
        &self,
        record_type: &RecordType,
        options: &ReadRecordsOptions,
    ) -> ProviderResult<ReadRecordsResult>;
}
