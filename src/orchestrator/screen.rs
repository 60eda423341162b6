// ABOUTME: The step data screen: one-shot startup, gated fetches and displayed state
// ABOUTME: Every provider failure becomes one advisory plus one diagnostic log entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Step Data Screen
//!
//! The screen owns two pieces of state: the displayed record list and the
//! readiness gate. It receives its provider handle explicitly; nothing is
//! process-global.
//!
//! ## Startup
//!
//! [`StepDataScreen::mount`] runs at most once per screen instance:
//!
//! ```text
//! INIT --initialize() == true--> NEGOTIATING --> READY
//!   \--false or error--> NOT_READY (terminal, one advisory)
//! ```
//!
//! Under [`ReadinessPolicy::Lenient`] a failed negotiation still opens the gate.
//! Under [`ReadinessPolicy::Strict`] it keeps the gate closed.
//!
//! ## Fetching
//!
//! [`StepDataScreen::fetch_steps`] may be called concurrently. Each call takes
//! a generation number when it starts; a successful result replaces the
//! displayed list only if no fetch with a newer generation has already been
//! applied. Older results that settle late are dropped.

use super::fetcher::RecordFetcher;
use super::gate::{ReadinessGate, ReadinessPolicy, ReadinessState};
use super::negotiator::{NegotiationOutcome, PermissionNegotiator};
use crate::constants::defaults;
use crate::models::{Permission, RecordType, StepRecord};
use crate::notifications::{Advisory, AdvisoryKind, AdvisorySink};
use crate::presentation::ScreenView;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use stepgate_providers::CapabilityProvider;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Screen settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOptions {
    /// Record type fetched and displayed
    pub record_type: RecordType,
    /// Permissions negotiated on mount; defaults to read access to `record_type`
    pub required_permissions: Vec<Permission>,
    /// Length of the trailing fetch window
    pub lookback_hours: u32,
    /// How permission problems affect readiness
    pub readiness_policy: ReadinessPolicy,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self::for_record_type(RecordType::steps())
    }
}

impl ScreenOptions {
    /// Options reading `record_type` over the default window
    #[must_use]
    pub fn for_record_type(record_type: RecordType) -> Self {
        Self {
            required_permissions: vec![Permission::read(record_type.clone())],
            record_type,
            lookback_hours: defaults::LOOKBACK_HOURS,
            readiness_policy: ReadinessPolicy::default(),
        }
    }

    /// Override the window length
    #[must_use]
    pub const fn with_lookback_hours(mut self, hours: u32) -> Self {
        self.lookback_hours = hours;
        self
    }

    /// Override the readiness policy
    #[must_use]
    pub const fn with_readiness_policy(mut self, policy: ReadinessPolicy) -> Self {
        self.readiness_policy = policy;
        self
    }

    /// Override the negotiated permission set
    #[must_use]
    pub fn with_required_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.required_permissions = permissions;
        self
    }
}

/// How [`StepDataScreen::mount`] ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// Gate opened with the required permissions granted
    Ready,
    /// Gate opened although negotiation failed or was incomplete (lenient policy)
    ReadyWithoutPermissions,
    /// Provider reported itself unsupported; gate stays closed
    Unsupported,
    /// Provider initialization failed; gate stays closed
    InitializationFailed,
    /// Negotiation failed or was incomplete under the strict policy; gate stays closed
    PermissionsRequired,
    /// `mount` had already run for this screen
    AlreadyMounted,
}

/// How [`StepDataScreen::fetch_steps`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The displayed list was replaced with this many records
    Updated {
        /// Number of records now displayed
        records: usize,
    },
    /// Gate closed; no query was issued
    NotReady,
    /// Query failed; the displayed list is unchanged
    Failed,
    /// Query succeeded but a newer fetch had already been applied
    Superseded,
}

#[derive(Debug, Default)]
struct DisplayedRecords {
    records: Vec<StepRecord>,
    applied_generation: u64,
}

/// Permission-gated step data screen
pub struct StepDataScreen {
    provider: Arc<dyn CapabilityProvider>,
    advisories: Arc<dyn AdvisorySink>,
    negotiator: PermissionNegotiator,
    fetcher: RecordFetcher,
    gate: ReadinessGate,
    policy: ReadinessPolicy,
    lookback_hours: u32,
    mounted: AtomicBool,
    fetch_generation: AtomicU64,
    displayed: RwLock<DisplayedRecords>,
}

impl StepDataScreen {
    /// Screen over `provider`, raising advisories on `advisories`
    #[must_use]
    pub fn new(
        provider: Arc<dyn CapabilityProvider>,
        advisories: Arc<dyn AdvisorySink>,
        options: ScreenOptions,
    ) -> Self {
        Self {
            provider,
            advisories,
            negotiator: PermissionNegotiator::new(options.required_permissions),
            fetcher: RecordFetcher::new(options.record_type, options.lookback_hours),
            gate: ReadinessGate::new(),
            policy: options.readiness_policy,
            lookback_hours: options.lookback_hours,
            mounted: AtomicBool::new(false),
            fetch_generation: AtomicU64::new(0),
            displayed: RwLock::new(DisplayedRecords::default()),
        }
    }

    /// Current gate state
    #[must_use]
    pub fn readiness(&self) -> ReadinessState {
        self.gate.state()
    }

    /// Records currently displayed
    #[must_use]
    pub fn records(&self) -> Vec<StepRecord> {
        match self.displayed.read() {
            Ok(displayed) => displayed.records.clone(),
            Err(_) => {
                error!("displayed record state poisoned");
                Vec::new()
            }
        }
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn view(&self) -> ScreenView {
        ScreenView::new(self.lookback_hours, self.gate.is_ready(), self.records())
    }

    /// One-shot startup: initialize, negotiate, open the gate
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn mount(&self) -> MountOutcome {
        if self
            .mounted
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("screen already mounted; startup skipped");
            return MountOutcome::AlreadyMounted;
        }

        match self.provider.initialize().await {
            Ok(true) => info!("health data provider initialized"),
            Ok(false) => {
                error!("health data provider unsupported on this device");
                self.raise(AdvisoryKind::InitializationUnsupported);
                return MountOutcome::Unsupported;
            }
            Err(e) => {
                error!(error = %e, "health data provider initialization failed");
                self.raise(AdvisoryKind::InitializationFailed);
                return MountOutcome::InitializationFailed;
            }
        }

        let satisfied = self.negotiate_permissions().await;
        if !satisfied && self.policy == ReadinessPolicy::Strict {
            warn!(policy = %self.policy, "readiness withheld until permissions are granted");
            return MountOutcome::PermissionsRequired;
        }

        self.gate.open();
        if satisfied {
            MountOutcome::Ready
        } else {
            MountOutcome::ReadyWithoutPermissions
        }
    }

    /// Fetch records for the trailing window and replace the displayed list
    #[instrument(skip(self), fields(provider = self.provider.name(), fetch_id = %Uuid::new_v4()))]
    pub async fn fetch_steps(&self) -> FetchOutcome {
        if !self.gate.is_ready() {
            self.raise(AdvisoryKind::NotReady);
            return FetchOutcome::NotReady;
        }

        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        match self.fetcher.fetch(self.provider.as_ref()).await {
            Ok(result) => self.apply(generation, result.records),
            Err(e) => {
                error!(error = %e, generation, "step data could not be read");
                self.raise(AdvisoryKind::FetchFailed);
                FetchOutcome::Failed
            }
        }
    }

    /// Returns whether the required set ended up granted; raises the advisory on error
    async fn negotiate_permissions(&self) -> bool {
        match self.negotiator.negotiate(self.provider.as_ref()).await {
            Ok(NegotiationOutcome::Incomplete { missing }) => {
                if self.policy == ReadinessPolicy::Strict {
                    self.raise(AdvisoryKind::PermissionFailed);
                }
                debug!(missing = missing.len(), "negotiation incomplete");
                false
            }
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "permissions could not be obtained");
                self.raise(AdvisoryKind::PermissionFailed);
                false
            }
        }
    }

    fn apply(&self, generation: u64, records: Vec<StepRecord>) -> FetchOutcome {
        let Ok(mut displayed) = self.displayed.write() else {
            error!(generation, "displayed record state poisoned");
            self.raise(AdvisoryKind::FetchFailed);
            return FetchOutcome::Failed;
        };
        if generation <= displayed.applied_generation {
            debug!(
                generation,
                applied = displayed.applied_generation,
                "dropping result of an older fetch"
            );
            return FetchOutcome::Superseded;
        }

        let count = records.len();
        displayed.records = records;
        displayed.applied_generation = generation;
        drop(displayed);

        info!(generation, records = count, "step records updated");
        FetchOutcome::Updated { records: count }
    }

    fn raise(&self, kind: AdvisoryKind) {
        self.advisories.notify(&Advisory::for_kind(kind));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::notifications::RecordingSink;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::AtomicUsize;
    use stepgate_providers::SyntheticProvider;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{Layer, Registry};

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_poisoned_display_state_reads_empty_and_logs() {
        let screen = StepDataScreen::new(
            Arc::new(SyntheticProvider::new()),
            Arc::new(RecordingSink::new()),
            ScreenOptions::default(),
        );
        let poisoned = panic::catch_unwind(AssertUnwindSafe(|| {
            let _held = screen.displayed.write().unwrap();
            panic!("writer died holding the display lock");
        }));
        assert!(poisoned.is_err());

        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = Registry::default().with(ErrorCounter(errors.clone()));
        let records = tracing::subscriber::with_default(subscriber, || screen.records());

        assert!(records.is_empty());
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }
}
