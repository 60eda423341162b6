// ABOUTME: User-facing advisories raised by the step data screen
// ABOUTME: Advisory sinks display them on a terminal, record them, or log them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Advisories are the modal alerts of the screen: a fixed title and a fixed
//! message per failure class. The raw error never reaches the user; it goes to
//! the diagnostic log instead.

use crate::constants::messages;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;
use tracing::warn;

/// Why an advisory was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// Fetch attempted while the readiness gate is closed
    NotReady,
    /// Provider reported itself unsupported
    InitializationUnsupported,
    /// Provider initialization failed
    InitializationFailed,
    /// Permission negotiation failed
    PermissionFailed,
    /// Record query failed
    FetchFailed,
}

/// One alert shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// Failure class
    pub kind: AdvisoryKind,
    /// Alert title
    pub title: &'static str,
    /// Alert body
    pub message: &'static str,
}

impl Advisory {
    /// Advisory with the fixed text for `kind`
    #[must_use]
    pub const fn for_kind(kind: AdvisoryKind) -> Self {
        let (title, message) = match kind {
            AdvisoryKind::NotReady => (messages::TITLE_WARNING, messages::NOT_READY),
            AdvisoryKind::InitializationUnsupported => {
                (messages::TITLE_ERROR, messages::INIT_UNSUPPORTED)
            }
            AdvisoryKind::InitializationFailed => (messages::TITLE_ERROR, messages::INIT_FAILED),
            AdvisoryKind::PermissionFailed => (messages::TITLE_ERROR, messages::PERMISSION_FAILED),
            AdvisoryKind::FetchFailed => (messages::TITLE_ERROR, messages::FETCH_FAILED),
        };
        Self {
            kind,
            title,
            message,
        }
    }
}

/// Destination for advisories
pub trait AdvisorySink: Send + Sync {
    /// Show `advisory` to the user
    fn notify(&self, advisory: &Advisory);
}

/// Prints advisories to stderr as `[title] message`
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl AdvisorySink for TerminalSink {
    fn notify(&self, advisory: &Advisory) {
        let mut stderr = std::io::stderr().lock();
        if let Err(e) = writeln!(stderr, "[{}] {}", advisory.title, advisory.message) {
            warn!(error = %e, kind = ?advisory.kind, "failed to print advisory");
        }
    }
}

/// Keeps every advisory in memory, in the order raised
#[derive(Debug, Default)]
pub struct RecordingSink {
    advisories: Mutex<Vec<Advisory>>,
}

impl RecordingSink {
    /// Empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisories raised so far
    #[must_use]
    pub fn advisories(&self) -> Vec<Advisory> {
        self.advisories
            .lock()
            .map(|advisories| advisories.clone())
            .unwrap_or_default()
    }

    /// Kinds of the advisories raised so far
    #[must_use]
    pub fn kinds(&self) -> Vec<AdvisoryKind> {
        self.advisories().iter().map(|a| a.kind).collect()
    }

    /// Number of advisories raised so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.advisories.lock().map(|a| a.len()).unwrap_or_default()
    }

    /// Whether nothing has been raised
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AdvisorySink for RecordingSink {
    fn notify(&self, advisory: &Advisory) {
        if let Ok(mut advisories) = self.advisories.lock() {
            advisories.push(advisory.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_is_a_warning() {
        let advisory = Advisory::for_kind(AdvisoryKind::NotReady);
        assert_eq!(advisory.title, messages::TITLE_WARNING);
        assert_eq!(advisory.message, messages::NOT_READY);
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.notify(&Advisory::for_kind(AdvisoryKind::FetchFailed));
        sink.notify(&Advisory::for_kind(AdvisoryKind::NotReady));

        assert_eq!(
            sink.kinds(),
            vec![AdvisoryKind::FetchFailed, AdvisoryKind::NotReady]
        );
    }
}
