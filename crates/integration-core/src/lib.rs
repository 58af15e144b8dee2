// ABOUTME: Core types for the HubSpot integration bridge
// ABOUTME: Foundation crate with error handling and integration data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Integration Core
//!
//! Foundation crate shared by the integration bridge. It changes rarely and
//! carries no I/O:
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   `IntegrationError` domain enum
//! - **models**: OAuth state and normalized integration items

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Authorization state and normalized integration items
pub mod models;
