// ABOUTME: View model of the step data screen and its plain-text rendering
// ABOUTME: Rows show the count and both timestamps exactly as the provider returned them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages;
use crate::models::StepRecord;
use serde::Serialize;
use std::fmt::Write;

/// One displayed record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRow {
    /// Step count
    pub count: u64,
    /// Interval start, verbatim
    pub start_time: String,
    /// Interval end, verbatim
    pub end_time: String,
}

impl From<StepRecord> for StepRow {
    fn from(record: StepRecord) -> Self {
        Self {
            count: record.count,
            start_time: record.start_time,
            end_time: record.end_time,
        }
    }
}

/// Everything the screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    /// Fixed title
    pub title: String,
    /// Label of the fetch trigger, which is never disabled
    pub action_label: &'static str,
    /// Whether the readiness gate is open
    pub ready: bool,
    /// One row per record, in provider order
    pub rows: Vec<StepRow>,
}

impl ScreenView {
    /// View for a window of `lookback_hours` showing `records`
    #[must_use]
    pub fn new(lookback_hours: u32, ready: bool, records: Vec<StepRecord>) -> Self {
        Self {
            title: messages::screen_title(lookback_hours),
            action_label: messages::FETCH_BUTTON,
            ready,
            rows: records.into_iter().map(StepRow::from).collect(),
        }
    }
}

/// Render the screen as terminal text
///
/// ```text
/// Son 24 Saatlik Adım Verisi
/// [ Adımları Getir ]
///
/// Adım Sayısı: 120
/// Başlangıç: 2025-01-01T08:00:00.000Z
/// Bitiş: 2025-01-01T09:00:00.000Z
/// ```
#[must_use]
pub fn render_text(view: &ScreenView) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "[ {} ]", view.action_label);
    for row in &view.rows {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}: {}", messages::LABEL_COUNT, row.count);
        let _ = writeln!(out, "{}: {}", messages::LABEL_START, row.start_time);
        let _ = writeln!(out, "{}: {}", messages::LABEL_END, row.end_time);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_render_verbatim() {
        let view = ScreenView::new(
            24,
            true,
            vec![StepRecord::new(120, "2025-01-01T08:00:00.000Z", "not-a-date")],
        );
        let text = render_text(&view);

        assert!(text.starts_with("Son 24 Saatlik Adım Verisi\n[ Adımları Getir ]\n"));
        assert!(text.contains("Adım Sayısı: 120\n"));
        assert!(text.contains("Başlangıç: 2025-01-01T08:00:00.000Z\n"));
        assert!(text.contains("Bitiş: not-a-date\n"));
    }

    #[test]
    fn test_empty_view_has_title_and_action_only() {
        let text = render_text(&ScreenView::new(24, false, Vec::new()));
        assert_eq!(text.lines().count(), 2);
    }
}
