// ABOUTME: Core data models shared by providers and the screen orchestrator
// ABOUTME: Re-exports permission, step record and time range filter types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Field names serialize in camelCase so records round-trip unchanged through
//! the provider's own JSON shape (`startTime`, `recordType`, ...).

mod permission;
mod records;
mod time_range;

pub use permission::{AccessType, Permission, RecordType};
pub use records::{ReadRecordsOptions, ReadRecordsResult, RecordMetadata, StepRecord};
pub use time_range::{format_timestamp, TimeRangeFilter, TimeRangeOperator};
