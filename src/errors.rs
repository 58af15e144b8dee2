// ABOUTME: Re-exports the unified error types from integration-core
// ABOUTME: Lets bridge modules import errors from a single crate-local path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use integration_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails, IntegrationError,
};
