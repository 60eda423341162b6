// ABOUTME: Readiness gate guarding whether record fetches may reach the provider
// ABOUTME: Two-state machine (NotReady -> Ready) held in an atomic with no way back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::info;

/// Readiness gate states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    /// Initial state; fetches are rejected
    NotReady,
    /// Terminal state for the session; fetches reach the provider
    Ready,
}

impl ReadinessState {
    /// Convert from atomic u8 representation
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::NotReady,
            _ => Self::Ready,
        }
    }

    /// Convert to atomic u8 representation
    const fn to_u8(self) -> u8 {
        match self {
            Self::NotReady => 0,
            Self::Ready => 1,
        }
    }
}

/// Whether a permission problem during mount keeps the gate closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessPolicy {
    /// Only an initialization failure keeps the gate closed
    #[default]
    Lenient,
    /// A failed or incomplete permission negotiation also keeps it closed
    Strict,
}

impl ReadinessPolicy {
    /// Lowercase configuration name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ReadinessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadinessPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(AppError::config_invalid(format!(
                "unknown readiness policy '{other}' (expected lenient or strict)"
            ))),
        }
    }
}

/// Thread-safe readiness flag
///
/// Starts `NotReady`; [`ReadinessGate::open`] moves it to `Ready` once and
/// nothing moves it back.
#[derive(Debug)]
pub struct ReadinessGate {
    state: AtomicU8,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessGate {
    /// Closed gate
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ReadinessState::NotReady.to_u8()),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> ReadinessState {
        ReadinessState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Whether fetches are allowed
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() == ReadinessState::Ready
    }

    /// Open the gate; returns `true` only for the call that performed the transition
    pub fn open(&self) -> bool {
        let opened = self
            .state
            .compare_exchange(
                ReadinessState::NotReady.to_u8(),
                ReadinessState::Ready.to_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if opened {
            info!("readiness gate opened");
        }
        opened
    }
}
