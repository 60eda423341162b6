// ABOUTME: Integration tests for the step data screen over the synthetic provider
// ABOUTME: Covers startup, permission negotiation, gated fetches, advisories and fetch fencing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use stepgate::constants::messages;
use stepgate::models::{format_timestamp, Permission, RecordType, StepRecord};
use stepgate::notifications::{AdvisoryKind, RecordingSink};
use stepgate::orchestrator::{
    FetchOutcome, MountOutcome, ReadinessPolicy, ReadinessState, ScreenOptions, StepDataScreen,
};
use stepgate::presentation::render_text;
use stepgate_providers::{ConsentPolicy, InitBehavior, ScriptedRead, SyntheticProvider};

fn steps_read() -> Permission {
    Permission::read(RecordType::steps())
}

fn recent_record(count: u64, hours_ago: i64) -> StepRecord {
    let end = Utc::now() - Duration::hours(hours_ago);
    StepRecord::new(
        count,
        format_timestamp(end - Duration::hours(1)),
        format_timestamp(end),
    )
}

fn screen_over(
    provider: &Arc<SyntheticProvider>,
    options: ScreenOptions,
) -> (StepDataScreen, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let screen = StepDataScreen::new(provider.clone(), sink.clone(), options);
    (screen, sink)
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_ungranted_permission_is_requested_and_screen_becomes_ready() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.readiness(), ReadinessState::NotReady);
    assert_eq!(screen.mount().await, MountOutcome::Ready);

    assert_eq!(screen.readiness(), ReadinessState::Ready);
    assert_eq!(provider.permission_request_calls(), 1);
    assert_eq!(provider.permission_requests(), vec![vec![steps_read()]]);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_already_granted_permission_is_not_requested_again() {
    let provider = Arc::new(SyntheticProvider::new().with_granted(vec![steps_read()]));
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.mount().await, MountOutcome::Ready);
    assert_eq!(provider.granted_lookup_calls(), 1);
    assert_eq!(provider.permission_request_calls(), 0);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_unsupported_provider_leaves_screen_permanently_not_ready() {
    let provider =
        Arc::new(SyntheticProvider::new().with_init_behavior(InitBehavior::Unavailable));
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.mount().await, MountOutcome::Unsupported);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::InitializationUnsupported]);
    let advisory = &sink.advisories()[0];
    assert_eq!(advisory.title, messages::TITLE_ERROR);
    assert_eq!(advisory.message, messages::INIT_UNSUPPORTED);

    // Remounting does not retry initialization
    assert_eq!(screen.mount().await, MountOutcome::AlreadyMounted);
    assert_eq!(provider.initialize_calls(), 1);
    assert_eq!(provider.granted_lookup_calls(), 0);
    assert_eq!(screen.readiness(), ReadinessState::NotReady);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_initialization_error_raises_one_advisory() {
    let provider = Arc::new(SyntheticProvider::new().with_init_behavior(InitBehavior::Fails));
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.mount().await, MountOutcome::InitializationFailed);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::InitializationFailed]);
    assert_eq!(sink.advisories()[0].message, messages::INIT_FAILED);
    assert_eq!(screen.readiness(), ReadinessState::NotReady);
}

#[tokio::test]
async fn test_mount_runs_startup_once() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, _sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.mount().await, MountOutcome::Ready);
    assert_eq!(screen.mount().await, MountOutcome::AlreadyMounted);
    assert_eq!(provider.initialize_calls(), 1);
    assert_eq!(provider.permission_request_calls(), 1);
}

#[tokio::test]
async fn test_permission_failure_still_opens_gate_under_lenient_policy() {
    let provider = Arc::new(SyntheticProvider::new().with_consent_policy(ConsentPolicy::Fails));
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.mount().await, MountOutcome::ReadyWithoutPermissions);
    assert_eq!(screen.readiness(), ReadinessState::Ready);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::PermissionFailed]);
}

#[tokio::test]
async fn test_granted_lookup_failure_is_a_permission_failure() {
    let provider = Arc::new(SyntheticProvider::new());
    provider.fail_permission_lookup("binder died").unwrap();
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.mount().await, MountOutcome::ReadyWithoutPermissions);
    assert_eq!(provider.permission_request_calls(), 0);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::PermissionFailed]);
}

#[tokio::test]
async fn test_dismissed_consent_is_silent_under_lenient_policy() {
    let provider = Arc::new(SyntheticProvider::new().with_consent_policy(ConsentPolicy::DenyAll));
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.mount().await, MountOutcome::ReadyWithoutPermissions);
    assert!(sink.is_empty());

    // The read itself is refused by the provider and surfaces as a fetch failure
    assert_eq!(screen.fetch_steps().await, FetchOutcome::Failed);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::FetchFailed]);
}

#[tokio::test]
async fn test_strict_policy_keeps_gate_closed_without_permissions() {
    let provider = Arc::new(SyntheticProvider::new().with_consent_policy(ConsentPolicy::DenyAll));
    let options = ScreenOptions::default().with_readiness_policy(ReadinessPolicy::Strict);
    let (screen, sink) = screen_over(&provider, options);

    assert_eq!(screen.mount().await, MountOutcome::PermissionsRequired);
    assert_eq!(screen.readiness(), ReadinessState::NotReady);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::PermissionFailed]);

    assert_eq!(screen.fetch_steps().await, FetchOutcome::NotReady);
    assert_eq!(provider.read_calls(), 0);
}

#[tokio::test]
async fn test_strict_policy_opens_gate_when_granted() {
    let provider = Arc::new(SyntheticProvider::new());
    let options = ScreenOptions::default().with_readiness_policy(ReadinessPolicy::Strict);
    let (screen, sink) = screen_over(&provider, options);

    assert_eq!(screen.mount().await, MountOutcome::Ready);
    assert!(sink.is_empty());
}

// ============================================================================
// Fetching
// ============================================================================

#[tokio::test]
async fn test_fetch_before_ready_issues_no_query() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    assert_eq!(screen.fetch_steps().await, FetchOutcome::NotReady);
    assert_eq!(provider.read_calls(), 0);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::NotReady]);
    let advisory = &sink.advisories()[0];
    assert_eq!(advisory.title, messages::TITLE_WARNING);
    assert_eq!(advisory.message, messages::NOT_READY);
}

#[tokio::test]
async fn test_fetch_replaces_displayed_records_verbatim() {
    let provider = Arc::new(SyntheticProvider::new());
    let record = StepRecord::new(120, "2025-06-01T08:00:00.000Z", "2025-06-01T09:00:00.000Z");
    provider
        .push_scripted_read(ScriptedRead::records(StdDuration::ZERO, vec![record.clone()]))
        .unwrap();
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    screen.mount().await;
    assert_eq!(screen.fetch_steps().await, FetchOutcome::Updated { records: 1 });

    assert_eq!(screen.records(), vec![record]);
    assert!(sink.is_empty());

    let text = render_text(&screen.view());
    assert!(text.contains("Adım Sayısı: 120"));
    assert!(text.contains("Başlangıç: 2025-06-01T08:00:00.000Z"));
    assert!(text.contains("Bitiş: 2025-06-01T09:00:00.000Z"));
}

#[tokio::test]
async fn test_fetch_failure_keeps_displayed_records() {
    let first = recent_record(300, 2);
    let provider = Arc::new(SyntheticProvider::with_records(vec![first.clone()]));
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    screen.mount().await;
    assert_eq!(screen.fetch_steps().await, FetchOutcome::Updated { records: 1 });

    provider.fail_reads("query timed out").unwrap();
    assert_eq!(screen.fetch_steps().await, FetchOutcome::Failed);
    assert_eq!(screen.records(), vec![first]);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::FetchFailed]);
    assert_eq!(sink.advisories()[0].message, messages::FETCH_FAILED);
}

#[tokio::test]
async fn test_failed_first_fetch_leaves_list_empty() {
    let provider = Arc::new(SyntheticProvider::new());
    provider.fail_reads("provider crashed").unwrap();
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());

    screen.mount().await;
    assert_eq!(screen.fetch_steps().await, FetchOutcome::Failed);
    assert!(screen.records().is_empty());
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_fetch_window_is_trailing_day_ending_now() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, _sink) = screen_over(&provider, ScreenOptions::default());
    screen.mount().await;

    let before = Utc::now();
    screen.fetch_steps().await;
    let after = Utc::now();

    let options = provider.received_options();
    assert_eq!(options.len(), 1);
    let filter = &options[0].time_range_filter;
    let start = filter.start().unwrap();
    let end = filter.end().unwrap();

    assert_eq!(end - start, Duration::hours(24));
    assert!(end >= before - Duration::milliseconds(1));
    assert!(end <= after);
}

#[tokio::test]
async fn test_each_fetch_recomputes_the_window() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, _sink) = screen_over(&provider, ScreenOptions::default());
    screen.mount().await;

    screen.fetch_steps().await;
    tokio::time::sleep(StdDuration::from_millis(5)).await;
    screen.fetch_steps().await;

    let options = provider.received_options();
    assert_eq!(options.len(), 2);
    let first_end = options[0].time_range_filter.end().unwrap();
    let second_end = options[1].time_range_filter.end().unwrap();
    assert!(second_end > first_end);
}

#[tokio::test]
async fn test_configured_window_length_is_used() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, _sink) =
        screen_over(&provider, ScreenOptions::default().with_lookback_hours(6));
    screen.mount().await;
    screen.fetch_steps().await;

    let filter = &provider.received_options()[0].time_range_filter;
    assert_eq!(filter.end().unwrap() - filter.start().unwrap(), Duration::hours(6));
    assert_eq!(screen.view().title, messages::screen_title(6));
}

#[tokio::test]
async fn test_out_of_range_window_fails_softly_without_query() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, sink) =
        screen_over(&provider, ScreenOptions::default().with_lookback_hours(u32::MAX));
    screen.mount().await;

    assert_eq!(screen.fetch_steps().await, FetchOutcome::Failed);
    assert_eq!(provider.read_calls(), 0);
    assert!(screen.records().is_empty());
    assert_eq!(sink.kinds(), vec![AdvisoryKind::FetchFailed]);
}

#[tokio::test]
async fn test_refetch_shows_latest_provider_records() {
    let provider = Arc::new(SyntheticProvider::with_records(vec![recent_record(100, 3)]));
    let (screen, _sink) = screen_over(&provider, ScreenOptions::default());
    screen.mount().await;
    screen.fetch_steps().await;

    let latest = vec![recent_record(250, 2), recent_record(80, 1)];
    provider.set_records(latest.clone()).unwrap();
    assert_eq!(screen.fetch_steps().await, FetchOutcome::Updated { records: 2 });
    assert_eq!(screen.records(), latest);
}

#[tokio::test]
async fn test_records_outside_window_are_not_displayed() {
    let inside = recent_record(500, 1);
    let outside = recent_record(900, 30);
    let provider = Arc::new(SyntheticProvider::with_records(vec![
        outside,
        inside.clone(),
    ]));
    let (screen, _sink) = screen_over(&provider, ScreenOptions::default());

    screen.mount().await;
    screen.fetch_steps().await;
    assert_eq!(screen.records(), vec![inside]);
}

#[tokio::test]
async fn test_late_result_of_older_fetch_is_dropped() {
    let provider = Arc::new(SyntheticProvider::new());
    let stale = StepRecord::new(1, "2025-06-01T00:00:00.000Z", "2025-06-01T01:00:00.000Z");
    let fresh = StepRecord::new(2, "2025-06-01T01:00:00.000Z", "2025-06-01T02:00:00.000Z");
    provider
        .push_scripted_read(ScriptedRead::records(StdDuration::from_millis(200), vec![stale]))
        .unwrap();
    provider
        .push_scripted_read(ScriptedRead::records(StdDuration::ZERO, vec![fresh.clone()]))
        .unwrap();
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());
    screen.mount().await;

    let slow = screen.fetch_steps();
    let quick = async {
        tokio::time::sleep(StdDuration::from_millis(20)).await;
        screen.fetch_steps().await
    };
    let (slow_outcome, quick_outcome) = tokio::join!(slow, quick);

    assert_eq!(quick_outcome, FetchOutcome::Updated { records: 1 });
    assert_eq!(slow_outcome, FetchOutcome::Superseded);
    assert_eq!(screen.records(), vec![fresh]);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_failure_of_overlapping_fetch_still_raises_advisory() {
    let provider = Arc::new(SyntheticProvider::new());
    let fresh = StepRecord::new(7, "2025-06-01T01:00:00.000Z", "2025-06-01T02:00:00.000Z");
    provider
        .push_scripted_read(ScriptedRead::failure(StdDuration::from_millis(100), "timeout"))
        .unwrap();
    provider
        .push_scripted_read(ScriptedRead::records(StdDuration::ZERO, vec![fresh.clone()]))
        .unwrap();
    let (screen, sink) = screen_over(&provider, ScreenOptions::default());
    screen.mount().await;

    let slow = screen.fetch_steps();
    let quick = async {
        tokio::time::sleep(StdDuration::from_millis(10)).await;
        screen.fetch_steps().await
    };
    let (slow_outcome, quick_outcome) = tokio::join!(slow, quick);

    assert_eq!(slow_outcome, FetchOutcome::Failed);
    assert_eq!(quick_outcome, FetchOutcome::Updated { records: 1 });
    assert_eq!(screen.records(), vec![fresh]);
    assert_eq!(sink.kinds(), vec![AdvisoryKind::FetchFailed]);
}

#[tokio::test]
async fn test_view_reflects_gate_and_rows() {
    let provider = Arc::new(SyntheticProvider::new());
    let (screen, _sink) = screen_over(&provider, ScreenOptions::default());

    let view = screen.view();
    assert!(!view.ready);
    assert!(view.rows.is_empty());
    assert_eq!(view.action_label, messages::FETCH_BUTTON);

    screen.mount().await;
    assert!(screen.view().ready);
}
