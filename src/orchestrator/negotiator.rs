// ABOUTME: Permission negotiation between a required set and the provider's granted set
// ABOUTME: Requests the full required set only when something is missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Permission Negotiation
//!
//! Given a required set `R`, the negotiator reads the granted set `G` fresh from
//! the provider. If every permission in `R` appears in `G` (access type and
//! record type equal) nothing else happens. Otherwise exactly `R` is requested,
//! not just the missing part, and the negotiator waits for the user's decision.
//!
//! Negotiation is idempotent: once `R` is granted, further calls only read `G`.

use crate::models::{Permission, RecordType};
use stepgate_core::errors::ProviderResult;
use stepgate_providers::CapabilityProvider;
use tracing::{debug, info, warn};

/// Result of a negotiation that did not error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiationOutcome {
    /// `R` was already granted; nothing was requested
    AlreadyGranted,
    /// `R` was requested and is now fully granted
    Granted,
    /// `R` was requested but the user left some of it ungranted
    Incomplete {
        /// Permissions still missing after the request
        missing: Vec<Permission>,
    },
}

impl NegotiationOutcome {
    /// Whether the required set ended up fully granted
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::AlreadyGranted | Self::Granted)
    }
}

/// Whether every permission in `required` appears in `granted`
#[must_use]
pub fn all_granted(required: &[Permission], granted: &[Permission]) -> bool {
    required.iter().all(|p| granted.contains(p))
}

/// Permissions of `required` absent from `granted`, in `required` order
#[must_use]
pub fn missing_permissions(required: &[Permission], granted: &[Permission]) -> Vec<Permission> {
    required
        .iter()
        .filter(|p| !granted.contains(p))
        .cloned()
        .collect()
}

/// Reconciles a fixed required permission set against a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionNegotiator {
    required: Vec<Permission>,
}

impl Default for PermissionNegotiator {
    fn default() -> Self {
        Self::for_record_type(RecordType::steps())
    }
}

impl PermissionNegotiator {
    /// Negotiator for an arbitrary required set
    #[must_use]
    pub const fn new(required: Vec<Permission>) -> Self {
        Self { required }
    }

    /// Negotiator requiring read access to `record_type`
    #[must_use]
    pub fn for_record_type(record_type: RecordType) -> Self {
        Self::new(vec![Permission::read(record_type)])
    }

    /// The required set
    #[must_use]
    pub fn required(&self) -> &[Permission] {
        &self.required
    }

    /// Run one negotiation against `provider`
    ///
    /// # Errors
    ///
    /// Returns the provider's error if reading the granted set or requesting
    /// permissions fails. Callers treat this as a failed negotiation.
    pub async fn negotiate(
        &self,
        provider: &dyn CapabilityProvider,
    ) -> ProviderResult<NegotiationOutcome> {
        let granted = provider.get_granted_permissions().await?;
        if all_granted(&self.required, &granted) {
            debug!(
                provider = provider.name(),
                required = self.required.len(),
                "required permissions already granted"
            );
            return Ok(NegotiationOutcome::AlreadyGranted);
        }

        info!(
            provider = provider.name(),
            missing = missing_permissions(&self.required, &granted).len(),
            "requesting permissions"
        );
        let granted = provider.request_permission(&self.required).await?;
        let missing = missing_permissions(&self.required, &granted);
        if missing.is_empty() {
            Ok(NegotiationOutcome::Granted)
        } else {
            warn!(
                provider = provider.name(),
                missing = ?missing.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "user did not grant every required permission"
            );
            Ok(NegotiationOutcome::Incomplete { missing })
        }
    }
}
