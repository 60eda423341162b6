// ABOUTME: Record fetcher issuing one time-bounded query per call
// ABOUTME: The trailing window is recomputed from the clock on every fetch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults;
use crate::models::{ReadRecordsOptions, ReadRecordsResult, RecordType, TimeRangeFilter};
use chrono::{DateTime, Duration, Utc};
use stepgate_core::errors::{ProviderError, ProviderResult};
use stepgate_providers::CapabilityProvider;
use tracing::debug;

/// Queries one record type over `[now - lookback, now]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFetcher {
    record_type: RecordType,
    lookback: Duration,
}

impl Default for RecordFetcher {
    fn default() -> Self {
        Self::new(RecordType::steps(), defaults::LOOKBACK_HOURS)
    }
}

impl RecordFetcher {
    /// Fetcher for `record_type` with a window of `lookback_hours`
    #[must_use]
    pub fn new(record_type: RecordType, lookback_hours: u32) -> Self {
        Self {
            record_type,
            lookback: Duration::hours(i64::from(lookback_hours)),
        }
    }

    /// Record type queried
    #[must_use]
    pub const fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// Window length
    #[must_use]
    pub const fn lookback(&self) -> Duration {
        self.lookback
    }

    /// Query options for a fetch issued at `now`; `None` if the window reaches
    /// past the earliest representable instant
    #[must_use]
    pub fn options_at(&self, now: DateTime<Utc>) -> Option<ReadRecordsOptions> {
        TimeRangeFilter::trailing(now, self.lookback).map(ReadRecordsOptions::with_time_range)
    }

    /// Issue exactly one query, windowed on the current time
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged; no retry is attempted. A window
    /// that cannot be computed fails with `ProviderError::QueryFailed` before
    /// the provider is called.
    pub async fn fetch(&self, provider: &dyn CapabilityProvider) -> ProviderResult<ReadRecordsResult> {
        let Some(options) = self.options_at(Utc::now()) else {
            return Err(ProviderError::QueryFailed {
                provider: provider.name().to_owned(),
                record_type: self.record_type.to_string(),
                details: format!(
                    "a {} hour window is out of range",
                    self.lookback.num_hours()
                ),
            });
        };
        debug!(
            provider = provider.name(),
            record_type = %self.record_type,
            start = ?options.time_range_filter.start_time,
            end = ?options.time_range_filter.end_time,
            "reading records"
        );
        provider.read_records(&self.record_type, &options).await
    }
}
