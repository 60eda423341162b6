// ABOUTME: Provider selection by name and construction of shared provider handles
// ABOUTME: Maps configuration onto synthetic or export-file providers behind the core trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::providers;
use crate::core::CapabilityProvider;
use crate::errors::{ProviderError, ProviderResult};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Known provider implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Scriptable in-memory provider
    #[default]
    Synthetic,
    /// JSON export file
    ExportFile,
}

impl ProviderKind {
    /// Registered provider name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Synthetic => providers::SYNTHETIC,
            Self::ExportFile => providers::EXPORT_FILE,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "export-file" | "export_file" | "file" => Ok(Self::ExportFile),
            other => Err(ProviderError::ConfigurationError {
                provider: other.to_owned(),
                details: format!(
                    "unknown provider '{other}'. Currently supported: {}, {}",
                    providers::SYNTHETIC,
                    providers::EXPORT_FILE
                ),
            }),
        }
    }
}

/// Everything needed to build a provider
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Which implementation to build
    pub kind: ProviderKind,
    /// Export file, required for `ExportFile`
    pub export_path: Option<PathBuf>,
    /// Seed for synthetic record generation
    pub synthetic_seed: u64,
    /// Hours of synthetic history to generate
    pub synthetic_hours: u32,
    /// End of the synthetic history
    pub synthetic_end: DateTime<Utc>,
}

/// Create a capability provider for `settings`
///
/// # Errors
///
/// Returns `ProviderError::ConfigurationError` if the provider kind is not
/// compiled in or a required setting is missing.
pub fn create_provider(settings: &ProviderSettings) -> ProviderResult<Arc<dyn CapabilityProvider>> {
    match settings.kind {
        #[cfg(feature = "provider-synthetic")]
        ProviderKind::Synthetic => Ok(Arc::new(crate::synthetic_provider::SyntheticProvider::seeded(
            settings.synthetic_end,
            settings.synthetic_hours,
            settings.synthetic_seed,
        ))),
        #[cfg(feature = "provider-export-file")]
        ProviderKind::ExportFile => {
            let path = settings
                .export_path
                .clone()
                .ok_or_else(|| ProviderError::ConfigurationError {
                    provider: providers::EXPORT_FILE.to_owned(),
                    details: "export path is required".to_owned(),
                })?;
            Ok(Arc::new(crate::export_file::ExportFileProvider::new(path)))
        }
        #[allow(unreachable_patterns)]
        kind => Err(ProviderError::ConfigurationError {
            provider: kind.as_str().to_owned(),
            details: "provider support not compiled in".to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("synthetic".parse::<ProviderKind>().unwrap(), ProviderKind::Synthetic);
        assert_eq!(" Export-File ".parse::<ProviderKind>().unwrap(), ProviderKind::ExportFile);
        assert!("health-connect".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_kind_round_trips_through_display() {
        for kind in [ProviderKind::Synthetic, ProviderKind::ExportFile] {
            assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
        }
    }
}
