// ABOUTME: Core types and constants for the Lingua CMS content platform
// ABOUTME: Foundation crate with error handling, content models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

#![deny(unsafe_code)]

//! # Lingua CMS Core
//!
//! Foundation crate providing shared types and constants for the Lingua CMS
//! content backend. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Content type tags, cache and search constants
//! - **models**: Root entities, child rows, and the denormalized `Detail` aggregate

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Content models (root entities, child rows, detail aggregates)
pub mod models;
