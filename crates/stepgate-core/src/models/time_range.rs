// ABOUTME: Time range filter used to bound record queries
// ABOUTME: Serializes instants as ISO-8601 UTC with millisecond precision
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// How the filter bounds are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRangeOperator {
    /// Records inside `[start_time, end_time]`
    Between,
    /// Records ending at or before `end_time`
    Before,
    /// Records starting at or after `start_time`
    After,
}

/// Time range filter passed to `read_records`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeFilter {
    /// Bound interpretation
    pub operator: TimeRangeOperator,
    /// Lower bound, ISO-8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Upper bound, ISO-8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Format an instant the way the filter carries it (`2025-01-31T08:00:00.000Z`)
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl TimeRangeFilter {
    /// Records inside `[start, end]`
    #[must_use]
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            operator: TimeRangeOperator::Between,
            start_time: Some(format_timestamp(start)),
            end_time: Some(format_timestamp(end)),
        }
    }

    /// Records ending at or before `end`
    #[must_use]
    pub fn before(end: DateTime<Utc>) -> Self {
        Self {
            operator: TimeRangeOperator::Before,
            start_time: None,
            end_time: Some(format_timestamp(end)),
        }
    }

    /// Records starting at or after `start`
    #[must_use]
    pub fn after(start: DateTime<Utc>) -> Self {
        Self {
            operator: TimeRangeOperator::After,
            start_time: Some(format_timestamp(start)),
            end_time: None,
        }
    }

    /// `[now - window, now]`, or `None` if the start falls outside the representable range
    #[must_use]
    pub fn trailing(now: DateTime<Utc>, window: Duration) -> Option<Self> {
        now.checked_sub_signed(window)
            .map(|start| Self::between(start, now))
    }

    /// Parsed lower bound
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start_time.as_deref().and_then(parse_bound)
    }

    /// Parsed upper bound
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end_time.as_deref().and_then(parse_bound)
    }

    /// Whether the interval `[start, end]` satisfies the filter
    ///
    /// Missing bounds on the filter side are unbounded.
    #[must_use]
    pub fn admits(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let after_lower = self.start().is_none_or(|lower| start >= lower);
        let before_upper = self.end().is_none_or(|upper| end <= upper);
        match self.operator {
            TimeRangeOperator::Between => after_lower && before_upper,
            TimeRangeOperator::Before => before_upper,
            TimeRangeOperator::After => after_lower,
        }
    }
}

fn parse_bound(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
