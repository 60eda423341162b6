// ABOUTME: Permission value type pairing an access type with a record type
// ABOUTME: Compared structurally so granted sets can be reconciled against required sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::record_types;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of access a permission grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Read records of the type
    Read,
    /// Write records of the type
    Write,
}

impl AccessType {
    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider record type identifier such as `"Steps"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordType(String);

impl RecordType {
    /// Create a record type from its provider identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The step count record type
    #[must_use]
    pub fn steps() -> Self {
        Self::new(record_types::STEPS)
    }

    /// Identifier as passed to the provider
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single (access type, record type) grant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Read or write
    pub access_type: AccessType,
    /// Record type the permission applies to
    pub record_type: RecordType,
}

impl Permission {
    /// Read permission for `record_type`
    #[must_use]
    pub const fn read(record_type: RecordType) -> Self {
        Self {
            access_type: AccessType::Read,
            record_type,
        }
    }

    /// Write permission for `record_type`
    #[must_use]
    pub const fn write(record_type: RecordType) -> Self {
        Self {
            access_type: AccessType::Write,
            record_type,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.access_type, self.record_type)
    }
}
