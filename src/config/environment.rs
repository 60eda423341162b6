// ABOUTME: Environment configuration management for provider and screen settings
// ABOUTME: Parses, validates and summarizes STEPGATE_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};
use crate::models::RecordType;
use crate::orchestrator::{ReadinessPolicy, ScreenOptions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use stepgate_providers::{ProviderKind, ProviderSettings};
use tracing::info;

/// Environment type for logging and diagnostics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete stepgate configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepgateConfig {
    /// Provider implementation
    pub provider: ProviderKind,
    /// Export file for the export-file provider
    pub export_path: Option<PathBuf>,
    /// Trailing fetch window in hours
    pub lookback_hours: u32,
    /// Record type fetched
    pub record_type: RecordType,
    /// How permission problems affect readiness
    pub readiness_policy: ReadinessPolicy,
    /// Seed for synthetic data
    pub synthetic_seed: u64,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for StepgateConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            export_path: None,
            lookback_hours: defaults::LOOKBACK_HOURS,
            record_type: RecordType::new(defaults::RECORD_TYPE),
            readiness_policy: ReadinessPolicy::default(),
            synthetic_seed: defaults::SYNTHETIC_SEED,
            environment: Environment::default(),
        }
    }
}

impl StepgateConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(env_vars::PROVIDER) {
            config.provider = value.parse().map_err(|e| {
                AppError::config_invalid(format!("{}: {e}", env_vars::PROVIDER))
            })?;
        }
        config.export_path = lookup(env_vars::EXPORT_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        if let Some(value) = lookup(env_vars::LOOKBACK_HOURS) {
            config.lookback_hours = parse_number(env_vars::LOOKBACK_HOURS, &value)?;
        }
        if let Some(value) = lookup(env_vars::RECORD_TYPE) {
            if !value.trim().is_empty() {
                config.record_type = RecordType::new(value.trim());
            }
        }
        if let Some(value) = lookup(env_vars::READINESS_POLICY) {
            config.readiness_policy = value.parse()?;
        }
        if let Some(value) = lookup(env_vars::SYNTHETIC_SEED) {
            config.synthetic_seed = parse_number(env_vars::SYNTHETIC_SEED, &value)?;
        }
        if let Some(value) = lookup(env_vars::ENVIRONMENT) {
            config.environment = Environment::from_str_or_default(&value);
        }

        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the window is out of range or the export-file
    /// provider has no export path.
    pub fn validate(&self) -> AppResult<()> {
        if self.lookback_hours == 0 || self.lookback_hours > defaults::MAX_LOOKBACK_HOURS {
            return Err(AppError::config_invalid(format!(
                "{} must be between 1 and {} (got {})",
                env_vars::LOOKBACK_HOURS,
                defaults::MAX_LOOKBACK_HOURS,
                self.lookback_hours
            )));
        }
        if self.provider == ProviderKind::ExportFile && self.export_path.is_none() {
            return Err(AppError::config_missing(env_vars::EXPORT_PATH));
        }
        Ok(())
    }

    /// Provider construction settings; synthetic history ends at `now`
    #[must_use]
    pub fn provider_settings(&self, now: DateTime<Utc>) -> ProviderSettings {
        ProviderSettings {
            kind: self.provider,
            export_path: self.export_path.clone(),
            synthetic_seed: self.synthetic_seed,
            // Twice the window so the synthetic store holds records outside it too
            synthetic_hours: self.lookback_hours.saturating_mul(2),
            synthetic_end: now,
        }
    }

    /// Screen settings
    #[must_use]
    pub fn screen_options(&self) -> ScreenOptions {
        ScreenOptions::for_record_type(self.record_type.clone())
            .with_lookback_hours(self.lookback_hours)
            .with_readiness_policy(self.readiness_policy)
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "provider={} export_path={} record_type={} lookback_hours={} readiness_policy={} environment={}",
            self.provider,
            self.export_path
                .as_ref()
                .map_or_else(|| "-".to_owned(), |p| p.display().to_string()),
            self.record_type,
            self.lookback_hours,
            self.readiness_policy,
            self.environment
        )
    }

    /// Log the summary at info level
    pub fn log_summary(&self) {
        info!(config = %self.summary(), "configuration loaded");
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::config_invalid(format!("{name} must be a number (got '{value}')")))
}
