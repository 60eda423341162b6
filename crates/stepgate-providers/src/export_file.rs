// ABOUTME: Capability provider backed by a JSON export of step records
// ABOUTME: Loads the export on initialize and answers time-bounded record queries from it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Export File Provider
//!
//! Reads a document of the form
//!
//! ```json
//! {
//!   "recordType": "Steps",
//!   "records": [
//!     { "count": 120, "startTime": "2025-01-01T08:00:00.000Z", "endTime": "2025-01-01T09:00:00.000Z" }
//!   ]
//! }
//! ```
//!
//! A missing file makes `initialize()` report "unsupported" (`Ok(false)`); a
//! malformed file is an initialization error. The export is read-only, so only
//! read permissions are ever granted.

use crate::constants::{providers, record_types};
use crate::core::CapabilityProvider;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{
    AccessType, Permission, ReadRecordsOptions, ReadRecordsResult, RecordType, StepRecord,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// On-disk export document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Record type of every record in the document
    #[serde(default = "default_record_type")]
    pub record_type: RecordType,
    /// Records in export order
    pub records: Vec<StepRecord>,
}

fn default_record_type() -> RecordType {
    RecordType::new(record_types::STEPS)
}

impl ExportDocument {
    /// Step export containing `records`
    #[must_use]
    pub fn steps(records: Vec<StepRecord>) -> Self {
        Self {
            record_type: RecordType::steps(),
            records,
        }
    }

    /// Write the document as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if serialization or the write fails.
    pub async fn write_to(&self, path: &Path) -> ProviderResult<()> {
        let json = serde_json::to_vec_pretty(self).map_err(|e| config_error(e.to_string()))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| config_error(format!("cannot write {}: {e}", path.display())))
    }
}

#[derive(Debug, Default)]
struct LoadedExport {
    document: Option<ExportDocument>,
    granted: Vec<Permission>,
}

/// Provider answering queries from a JSON export file
#[derive(Debug)]
pub struct ExportFileProvider {
    path: PathBuf,
    loaded: RwLock<LoadedExport>,
}

impl ExportFileProvider {
    /// Provider reading `path` on initialize
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: RwLock::new(LoadedExport::default()),
        }
    }

    /// Export file location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn config_error(details: String) -> ProviderError {
    ProviderError::ConfigurationError {
        provider: providers::EXPORT_FILE.to_owned(),
        details,
    }
}

#[async_trait]
impl CapabilityProvider for ExportFileProvider {
    fn name(&self) -> &'static str {
        providers::EXPORT_FILE
    }

    async fn initialize(&self) -> ProviderResult<bool> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "export file not found");
                return Ok(false);
            }
            Err(e) => {
                return Err(ProviderError::InitializationFailed {
                    provider: providers::EXPORT_FILE.to_owned(),
                    details: format!("cannot read {}: {e}", self.path.display()),
                })
            }
        };

        let document: ExportDocument =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::InvalidData {
                provider: providers::EXPORT_FILE.to_owned(),
                details: e.to_string(),
            })?;

        info!(
            path = %self.path.display(),
            record_type = %document.record_type,
            records = document.records.len(),
            "export file loaded"
        );
        self.loaded.write().await.document = Some(document);
        Ok(true)
    }

    async fn get_granted_permissions(&self) -> ProviderResult<Vec<Permission>> {
        let loaded = self.loaded.read().await;
        if loaded.document.is_none() {
            return Err(ProviderError::NotInitialized {
                provider: providers::EXPORT_FILE.to_owned(),
            });
        }
        Ok(loaded.granted.clone())
    }

    async fn request_permission(
        &self,
        permissions: &[Permission],
    ) -> ProviderResult<Vec<Permission>> {
        let mut loaded = self.loaded.write().await;
        if loaded.document.is_none() {
            return Err(ProviderError::NotInitialized {
                provider: providers::EXPORT_FILE.to_owned(),
            });
        }
        for permission in permissions {
            if permission.access_type == AccessType::Write {
                debug!(%permission, "write access is never granted on an export");
                continue;
            }
            if !loaded.granted.contains(permission) {
                loaded.granted.push(permission.clone());
            }
        }
        Ok(loaded.granted.clone())
    }

    async fn read_records(
        &self,
        record_type: &RecordType,
        options: &ReadRecordsOptions,
    ) -> ProviderResult<ReadRecordsResult> {
        let loaded = self.loaded.read().await;
        let Some(document) = loaded.document.as_ref() else {
            return Err(ProviderError::NotInitialized {
                provider: providers::EXPORT_FILE.to_owned(),
            });
        };
        if !loaded.granted.contains(&Permission::read(record_type.clone())) {
            return Err(ProviderError::PermissionDenied {
                provider: providers::EXPORT_FILE.to_owned(),
                record_type: record_type.to_string(),
            });
        }
        if &document.record_type != record_type {
            return Ok(ReadRecordsResult::default());
        }

        let filter = &options.time_range_filter;
        let records = document
            .records
            .iter()
            .filter(|record| match (record.parsed_start(), record.parsed_end()) {
                (Some(start), Some(end)) => filter.admits(start, end),
                _ => {
                    warn!(
                        start = %record.start_time,
                        end = %record.end_time,
                        "skipping export record with unparseable timestamps"
                    );
                    false
                }
            })
            .cloned()
            .collect();

        Ok(ReadRecordsResult::new(records))
    }
}
