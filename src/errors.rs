// ABOUTME: Unified error handling re-exported from stepgate-core
// ABOUTME: AppError, ErrorCode and ProviderError are shared by every crate in the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use stepgate_core::errors::*;
