// ABOUTME: Scriptable synthetic health data provider for development and testing
// ABOUTME: Simulates initialization, consent and record queries without a device
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock/Mutex poisoning errors are converted to ProviderError::ConfigurationError
// for proper error propagation through the application

//! # Synthetic Provider
//!
//! An in-memory provider that behaves like a device health store:
//!
//! - `initialize()` can succeed, report "unsupported", or fail
//! - the permission store starts with a configurable grant set
//! - the consent dialog can grant, deny, or fail
//! - reads require initialization and a matching read grant
//! - reads can be scripted one by one (delay + outcome) to reproduce races
//!
//! Every operation is counted and every query filter is recorded, so tests can
//! assert exactly which calls the screen made.
//!
//! ## Thread Safety
//!
//! All state is behind `RwLock`/`Mutex` and counters are atomic; one instance
//! can serve overlapping reads.

use crate::constants::{providers, record_types};
use crate::core::CapabilityProvider;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{
    format_timestamp, AccessType, Permission, ReadRecordsOptions, ReadRecordsResult,
    RecordMetadata, RecordType, StepRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, DurationRound, Timelike, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration as StdDuration;
use tracing::debug;

/// What `initialize()` does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitBehavior {
    /// Returns `Ok(true)`
    #[default]
    Ready,
    /// Returns `Ok(false)`, as on a device without the health store
    Unavailable,
    /// Returns `Err(InitializationFailed)`
    Fails,
}

/// How the simulated consent dialog answers `request_permission()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentPolicy {
    /// Every requested permission is granted
    #[default]
    GrantAll,
    /// The user dismisses the dialog; nothing new is granted
    DenyAll,
    /// The consent flow itself errors
    Fails,
}

/// One scripted read: wait `delay`, then return `outcome`
#[derive(Debug, Clone)]
pub struct ScriptedRead {
    /// Time the read takes to settle
    pub delay: StdDuration,
    /// Records to return, or the failure text
    pub outcome: Result<Vec<StepRecord>, String>,
}

impl ScriptedRead {
    /// A read that settles with `records` after `delay`
    #[must_use]
    pub const fn records(delay: StdDuration, records: Vec<StepRecord>) -> Self {
        Self {
            delay,
            outcome: Ok(records),
        }
    }

    /// A read that fails with `details` after `delay`
    pub fn failure(delay: StdDuration, details: impl Into<String>) -> Self {
        Self {
            delay,
            outcome: Err(details.into()),
        }
    }
}

#[derive(Debug, Default)]
struct CallCounters {
    initialize: AtomicUsize,
    granted: AtomicUsize,
    request: AtomicUsize,
    read: AtomicUsize,
}

#[derive(Debug, Default)]
struct StoreState {
    initialized: bool,
    granted: Vec<Permission>,
    records: Vec<StepRecord>,
    read_failure: Option<String>,
    granted_lookup_failure: Option<String>,
}

/// Synthetic capability provider
///
/// # Examples
///
/// ```rust,no_run
/// use stepgate_providers::{ConsentPolicy, SyntheticProvider};
/// use stepgate_providers::models::StepRecord;
///
/// let provider = SyntheticProvider::with_records(vec![StepRecord::new(
///     120,
///     "2025-01-01T08:00:00.000Z",
///     "2025-01-01T09:00:00.000Z",
/// )])
/// .with_consent_policy(ConsentPolicy::GrantAll);
/// ```
#[derive(Debug)]
pub struct SyntheticProvider {
    state: RwLock<StoreState>,
    scripted_reads: Mutex<VecDeque<ScriptedRead>>,
    received_options: Mutex<Vec<ReadRecordsOptions>>,
    permission_requests: Mutex<Vec<Vec<Permission>>>,
    calls: CallCounters,
    init_behavior: InitBehavior,
    consent_policy: ConsentPolicy,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticProvider {
    /// Empty provider that initializes and grants everything
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Provider pre-loaded with `records`
    #[must_use]
    pub fn with_records(records: Vec<StepRecord>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                records,
                ..StoreState::default()
            }),
            scripted_reads: Mutex::new(VecDeque::new()),
            received_options: Mutex::new(Vec::new()),
            permission_requests: Mutex::new(Vec::new()),
            calls: CallCounters::default(),
            init_behavior: InitBehavior::default(),
            consent_policy: ConsentPolicy::default(),
        }
    }

    /// Provider with hourly step records for the `hours` ending at `end`
    #[must_use]
    pub fn seeded(end: DateTime<Utc>, hours: u32, seed: u64) -> Self {
        Self::with_records(Self::hourly_steps(end, hours, seed))
    }

    /// Set what `initialize()` does
    #[must_use]
    pub const fn with_init_behavior(mut self, behavior: InitBehavior) -> Self {
        self.init_behavior = behavior;
        self
    }

    /// Set how the consent dialog answers
    #[must_use]
    pub const fn with_consent_policy(mut self, policy: ConsentPolicy) -> Self {
        self.consent_policy = policy;
        self
    }

    /// Start with `permissions` already granted
    #[must_use]
    pub fn with_granted(mut self, permissions: Vec<Permission>) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.granted = permissions;
        }
        self
    }

    /// Replace the stored records
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal lock is poisoned.
    pub fn set_records(&self, records: Vec<StepRecord>) -> ProviderResult<()> {
        self.write_state()?.records = records;
        Ok(())
    }

    /// Make every unscripted read fail with `details` until cleared
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal lock is poisoned.
    pub fn fail_reads(&self, details: impl Into<String>) -> ProviderResult<()> {
        self.write_state()?.read_failure = Some(details.into());
        Ok(())
    }

    /// Undo [`Self::fail_reads`]
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal lock is poisoned.
    pub fn clear_read_failure(&self) -> ProviderResult<()> {
        self.write_state()?.read_failure = None;
        Ok(())
    }

    /// Make `get_granted_permissions()` fail with `details`
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal lock is poisoned.
    pub fn fail_permission_lookup(&self, details: impl Into<String>) -> ProviderResult<()> {
        self.write_state()?.granted_lookup_failure = Some(details.into());
        Ok(())
    }

    /// Queue a scripted read; scripted reads are consumed in call order
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal lock is poisoned.
    pub fn push_scripted_read(&self, read: ScriptedRead) -> ProviderResult<()> {
        self.scripted_reads
            .lock()
            .map_err(|_| poisoned("scripted_reads"))?
            .push_back(read);
        Ok(())
    }

    /// Number of `initialize()` calls
    #[must_use]
    pub fn initialize_calls(&self) -> usize {
        self.calls.initialize.load(Ordering::SeqCst)
    }

    /// Number of `get_granted_permissions()` calls
    #[must_use]
    pub fn granted_lookup_calls(&self) -> usize {
        self.calls.granted.load(Ordering::SeqCst)
    }

    /// Number of `request_permission()` calls
    #[must_use]
    pub fn permission_request_calls(&self) -> usize {
        self.calls.request.load(Ordering::SeqCst)
    }

    /// Number of `read_records()` calls
    #[must_use]
    pub fn read_calls(&self) -> usize {
        self.calls.read.load(Ordering::SeqCst)
    }

    /// Options received by every `read_records()` call, in call order
    #[must_use]
    pub fn received_options(&self) -> Vec<ReadRecordsOptions> {
        self.received_options
            .lock()
            .map(|options| options.clone())
            .unwrap_or_default()
    }

    /// Permission sets passed to every `request_permission()` call
    #[must_use]
    pub fn permission_requests(&self) -> Vec<Vec<Permission>> {
        self.permission_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Deterministic hourly step records for the `hours` ending at the hour of `end`
    ///
    /// Night hours (22:00-06:00) get low counts, daytime hours a wider spread.
    /// Records are ordered oldest first.
    #[must_use]
    pub fn hourly_steps(end: DateTime<Utc>, hours: u32, seed: u64) -> Vec<StepRecord> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let last_hour = end.duration_trunc(Duration::hours(1)).unwrap_or(end);

        (0..hours)
            .rev()
            .map(|offset| {
                let end_time = last_hour - Duration::hours(i64::from(offset));
                let start_time = end_time - Duration::hours(1);
                let count = if (6..22).contains(&start_time.hour()) {
                    rng.gen_range(150..=1800)
                } else {
                    rng.gen_range(0..=60)
                };

                StepRecord::new(count, format_timestamp(start_time), format_timestamp(end_time))
                    .with_metadata(RecordMetadata {
                        id: format!("synthetic-{}", start_time.timestamp()),
                        data_origin: Some("stepgate.synthetic".to_owned()),
                        last_modified_time: Some(format_timestamp(end_time)),
                    })
            })
            .collect()
    }

    fn write_state(&self) -> ProviderResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| poisoned("state"))
    }

    fn read_state(&self) -> ProviderResult<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| poisoned("state"))
    }

    fn next_scripted_read(&self) -> ProviderResult<Option<ScriptedRead>> {
        Ok(self
            .scripted_reads
            .lock()
            .map_err(|_| poisoned("scripted_reads"))?
            .pop_front())
    }

    fn check_read_access(&self, record_type: &RecordType) -> ProviderResult<()> {
        let state = self.read_state()?;
        if !state.initialized {
            return Err(ProviderError::NotInitialized {
                provider: providers::SYNTHETIC.to_owned(),
            });
        }
        let readable = state
            .granted
            .iter()
            .any(|p| p.access_type == AccessType::Read && &p.record_type == record_type);
        drop(state);

        if readable {
            Ok(())
        } else {
            Err(ProviderError::PermissionDenied {
                provider: providers::SYNTHETIC.to_owned(),
                record_type: record_type.to_string(),
            })
        }
    }

    fn query_failed(record_type: &RecordType, details: String) -> ProviderError {
        ProviderError::QueryFailed {
            provider: providers::SYNTHETIC.to_owned(),
            record_type: record_type.to_string(),
            details,
        }
    }
}

fn poisoned(lock: &str) -> ProviderError {
    ProviderError::ConfigurationError {
        provider: providers::SYNTHETIC.to_owned(),
        details: format!("lock poisoned: {lock}"),
    }
}

#[async_trait]
impl CapabilityProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        providers::SYNTHETIC
    }

    async fn initialize(&self) -> ProviderResult<bool> {
        self.calls.initialize.fetch_add(1, Ordering::SeqCst);
        match self.init_behavior {
            InitBehavior::Ready => {
                self.write_state()?.initialized = true;
                Ok(true)
            }
            InitBehavior::Unavailable => Ok(false),
            InitBehavior::Fails => Err(ProviderError::InitializationFailed {
                provider: providers::SYNTHETIC.to_owned(),
                details: "health store service did not respond".to_owned(),
            }),
        }
    }

    async fn get_granted_permissions(&self) -> ProviderResult<Vec<Permission>> {
        self.calls.granted.fetch_add(1, Ordering::SeqCst);
        let state = self.read_state()?;
        if let Some(details) = &state.granted_lookup_failure {
            return Err(ProviderError::PermissionRequestFailed {
                provider: providers::SYNTHETIC.to_owned(),
                details: details.clone(),
            });
        }
        if !state.initialized {
            return Err(ProviderError::NotInitialized {
                provider: providers::SYNTHETIC.to_owned(),
            });
        }
        Ok(state.granted.clone())
    }

    async fn request_permission(
        &self,
        permissions: &[Permission],
    ) -> ProviderResult<Vec<Permission>> {
        self.calls.request.fetch_add(1, Ordering::SeqCst);
        self.permission_requests
            .lock()
            .map_err(|_| poisoned("permission_requests"))?
            .push(permissions.to_vec());

        let mut state = self.write_state()?;
        if !state.initialized {
            return Err(ProviderError::NotInitialized {
                provider: providers::SYNTHETIC.to_owned(),
            });
        }
        match self.consent_policy {
            ConsentPolicy::GrantAll => {
                for permission in permissions {
                    if !state.granted.contains(permission) {
                        state.granted.push(permission.clone());
                    }
                }
            }
            ConsentPolicy::DenyAll => {
                debug!(requested = permissions.len(), "synthetic consent dialog dismissed");
            }
            ConsentPolicy::Fails => {
                return Err(ProviderError::PermissionRequestFailed {
                    provider: providers::SYNTHETIC.to_owned(),
                    details: "consent activity could not be launched".to_owned(),
                });
            }
        }
        Ok(state.granted.clone())
    }

    async fn read_records(
        &self,
        record_type: &RecordType,
        options: &ReadRecordsOptions,
    ) -> ProviderResult<ReadRecordsResult> {
        self.calls.read.fetch_add(1, Ordering::SeqCst);
        self.received_options
            .lock()
            .map_err(|_| poisoned("received_options"))?
            .push(options.clone());

        self.check_read_access(record_type)?;

        if let Some(scripted) = self.next_scripted_read()? {
            tokio::time::sleep(scripted.delay).await;
            return scripted
                .outcome
                .map(ReadRecordsResult::new)
                .map_err(|details| Self::query_failed(record_type, details));
        }

        let state = self.read_state()?;
        if let Some(details) = &state.read_failure {
            return Err(Self::query_failed(record_type, details.clone()));
        }
        if record_type.as_str() != record_types::STEPS {
            return Ok(ReadRecordsResult::default());
        }

        // Stored records are returned in insertion order, filtered by the window
        let filter = &options.time_range_filter;
        let records = state
            .records
            .iter()
            .filter(|record| match (record.parsed_start(), record.parsed_end()) {
                (Some(start), Some(end)) => filter.admits(start, end),
                _ => true,
            })
            .cloned()
            .collect();

        Ok(ReadRecordsResult::new(records))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hourly_steps_are_deterministic_and_contiguous() {
        let end = Utc.with_ymd_and_hms(2025, 5, 10, 12, 40, 0).unwrap();
        let first = SyntheticProvider::hourly_steps(end, 24, 7);
        let second = SyntheticProvider::hourly_steps(end, 24, 7);

        assert_eq!(first, second);
        assert_eq!(first.len(), 24);
        assert_eq!(first[23].end_time, "2025-05-10T12:00:00.000Z");
        for pair in first.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
    }

    #[test]
    fn test_night_hours_have_low_counts() {
        let end = Utc.with_ymd_and_hms(2025, 5, 10, 6, 0, 0).unwrap();
        let records = SyntheticProvider::hourly_steps(end, 6, 3);

        assert!(records.iter().all(|r| r.count <= 60));
    }
}
