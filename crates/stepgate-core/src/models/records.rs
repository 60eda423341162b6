// ABOUTME: Step record model and the request/response shapes of a record query
// ABOUTME: Timestamps are kept as the provider's strings so they render verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::time_range::TimeRangeFilter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider bookkeeping attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// Provider-assigned record identifier
    pub id: String,
    /// Package or device that wrote the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_origin: Option<String>,
    /// Last modification instant, as reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,
}

/// Step count for one reporting interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// Steps taken during the interval
    pub count: u64,
    /// Interval start, exactly as the provider returned it
    pub start_time: String,
    /// Interval end, exactly as the provider returned it
    pub end_time: String,
    /// Optional provider metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
}

impl StepRecord {
    /// Create a record without metadata
    pub fn new(count: u64, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            count,
            start_time: start_time.into(),
            end_time: end_time.into(),
            metadata: None,
        }
    }

    /// Attach provider metadata
    #[must_use]
    pub fn with_metadata(mut self, metadata: RecordMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Parsed interval start, `None` if the string is not RFC 3339
    #[must_use]
    pub fn parsed_start(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.start_time)
    }

    /// Parsed interval end, `None` if the string is not RFC 3339
    #[must_use]
    pub fn parsed_end(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.end_time)
    }
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Options accepted by a record query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRecordsOptions {
    /// Interval the returned records must fall in
    pub time_range_filter: TimeRangeFilter,
}

impl ReadRecordsOptions {
    /// Options with only a time range
    #[must_use]
    pub const fn with_time_range(time_range_filter: TimeRangeFilter) -> Self {
        Self { time_range_filter }
    }
}

/// Result of a record query, in provider order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRecordsResult {
    /// Records as returned, never re-sorted
    pub records: Vec<StepRecord>,
    /// Continuation token when the provider paginates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ReadRecordsResult {
    /// Single-page result
    #[must_use]
    pub const fn new(records: Vec<StepRecord>) -> Self {
        Self {
            records,
            page_token: None,
        }
    }
}
