// ABOUTME: Structured error types for capability provider operations
// ABOUTME: Distinguishes initialization, permission and query failures with provider context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ErrorCode;
use thiserror::Error;

/// Errors returned by a capability provider
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// `initialize()` itself failed (as opposed to reporting "unsupported")
    #[error("{provider} initialization failed: {details}")]
    InitializationFailed {
        /// Provider name
        provider: String,
        /// Raw failure description
        details: String,
    },

    /// An operation was called before a successful `initialize()`
    #[error("{provider} has not been initialized")]
    NotInitialized {
        /// Provider name
        provider: String,
    },

    /// The permission store could not be read or the consent flow failed
    #[error("{provider} permission request failed: {details}")]
    PermissionRequestFailed {
        /// Provider name
        provider: String,
        /// Raw failure description
        details: String,
    },

    /// A read was attempted without the matching read permission
    #[error("{provider} denied access to {record_type} records")]
    PermissionDenied {
        /// Provider name
        provider: String,
        /// Record type that was requested
        record_type: String,
    },

    /// The record query was rejected
    #[error("{provider} failed to read {record_type} records: {details}")]
    QueryFailed {
        /// Provider name
        provider: String,
        /// Record type that was requested
        record_type: String,
        /// Raw failure description
        details: String,
    },

    /// Backing data could not be parsed
    #[error("{provider} returned invalid data: {details}")]
    InvalidData {
        /// Provider name
        provider: String,
        /// Parse failure description
        details: String,
    },

    /// Provider misconfigured or internal state unusable
    #[error("{provider} configuration error: {details}")]
    ConfigurationError {
        /// Provider name
        provider: String,
        /// Description of the problem
        details: String,
    },
}

impl ProviderError {
    /// Error code used when the failure crosses into `AppError`
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InitializationFailed { .. } | Self::NotInitialized { .. } => {
                ErrorCode::ExternalServiceUnavailable
            }
            Self::PermissionRequestFailed { .. } | Self::QueryFailed { .. } => {
                ErrorCode::ExternalServiceError
            }
            Self::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            Self::InvalidData { .. } => ErrorCode::InvalidFormat,
            Self::ConfigurationError { .. } => ErrorCode::ConfigError,
        }
    }
}

/// Result alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
