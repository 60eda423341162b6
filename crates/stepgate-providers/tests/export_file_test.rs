// ABOUTME: Integration tests for the export-file capability provider
// ABOUTME: Covers missing and malformed exports, read-only grants and window filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
#![cfg(feature = "provider-export-file")]

use chrono::{Duration, TimeZone, Utc};
use stepgate_providers::models::{
    Permission, ReadRecordsOptions, RecordType, StepRecord, TimeRangeFilter,
};
use stepgate_providers::{CapabilityProvider, ExportDocument, ExportFileProvider, ProviderError};
use tempfile::TempDir;

fn window() -> ReadRecordsOptions {
    let now = Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap();
    let filter = TimeRangeFilter::trailing(now, Duration::hours(24)).unwrap();
    ReadRecordsOptions::with_time_range(filter)
}

#[tokio::test]
async fn test_missing_export_reports_unsupported() {
    let dir = TempDir::new().unwrap();
    let provider = ExportFileProvider::new(dir.path().join("absent.json"));

    assert!(!provider.initialize().await.unwrap());
}

#[tokio::test]
async fn test_malformed_export_fails_initialization() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let err = ExportFileProvider::new(&path).initialize().await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidData { .. }));
}

#[tokio::test]
async fn test_write_permissions_are_never_granted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steps.json");
    ExportDocument::steps(Vec::new()).write_to(&path).await.unwrap();
    let provider = ExportFileProvider::new(&path);
    assert!(provider.initialize().await.unwrap());

    let granted = provider
        .request_permission(&[
            Permission::read(RecordType::steps()),
            Permission::write(RecordType::steps()),
        ])
        .await
        .unwrap();

    assert_eq!(granted, vec![Permission::read(RecordType::steps())]);
}

#[tokio::test]
async fn test_reads_filter_window_and_skip_bad_timestamps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steps.json");
    let inside = StepRecord::new(120, "2025-02-09T08:00:00.000Z", "2025-02-09T09:00:00.000Z");
    let outside = StepRecord::new(7, "2025-02-01T08:00:00.000Z", "2025-02-01T09:00:00.000Z");
    let garbled = StepRecord::new(5, "yesterday", "today");
    ExportDocument::steps(vec![outside, inside.clone(), garbled])
        .write_to(&path)
        .await
        .unwrap();

    let provider = ExportFileProvider::new(&path);
    provider.initialize().await.unwrap();
    provider
        .request_permission(&[Permission::read(RecordType::steps())])
        .await
        .unwrap();

    let result = provider
        .read_records(&RecordType::steps(), &window())
        .await
        .unwrap();
    assert_eq!(result.records, vec![inside]);
}

#[tokio::test]
async fn test_read_requires_grant() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steps.json");
    ExportDocument::steps(Vec::new()).write_to(&path).await.unwrap();
    let provider = ExportFileProvider::new(&path);
    provider.initialize().await.unwrap();

    let err = provider
        .read_records(&RecordType::steps(), &window())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::PermissionDenied { .. }));
}
