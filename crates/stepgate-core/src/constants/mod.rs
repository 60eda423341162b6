// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Record types, provider names, user-facing messages, defaults and env var names

//! Constants module
//!
//! Constants are grouped by domain. User-facing strings live in [`messages`]
//! so the screen and the terminal front end render identical text.

/// User-facing advisory titles, advisory messages and screen labels
pub mod messages;

/// Record type identifiers understood by health data providers
pub mod record_types {
    /// Step count records
    pub const STEPS: &str = "Steps";
}

/// Registered provider names
pub mod providers {
    /// Scriptable in-memory provider
    pub const SYNTHETIC: &str = "synthetic";
    /// Provider backed by a JSON export file
    pub const EXPORT_FILE: &str = "export-file";
}

/// Default values for configuration
pub mod defaults {
    /// Look-back window for step queries, in hours
    pub const LOOKBACK_HOURS: u32 = 24;
    /// Largest accepted look-back window (30 days)
    pub const MAX_LOOKBACK_HOURS: u32 = 720;
    /// Seed for deterministic synthetic record generation
    pub const SYNTHETIC_SEED: u64 = 42;
    /// Default provider name
    pub const PROVIDER: &str = super::providers::SYNTHETIC;
    /// Default record type
    pub const RECORD_TYPE: &str = super::record_types::STEPS;
}

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// Provider selection (`synthetic` or `export-file`)
    pub const PROVIDER: &str = "STEPGATE_PROVIDER";
    /// Path to the JSON export used by the export-file provider
    pub const EXPORT_PATH: &str = "STEPGATE_EXPORT_PATH";
    /// Look-back window in hours
    pub const LOOKBACK_HOURS: &str = "STEPGATE_LOOKBACK_HOURS";
    /// Record type to query
    pub const RECORD_TYPE: &str = "STEPGATE_RECORD_TYPE";
    /// Readiness policy (`lenient` or `strict`)
    pub const READINESS_POLICY: &str = "STEPGATE_READINESS_POLICY";
    /// Seed for the synthetic provider
    pub const SYNTHETIC_SEED: &str = "STEPGATE_SYNTHETIC_SEED";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Service name reported at startup
    pub const STEPGATE: &str = "stepgate";
}
