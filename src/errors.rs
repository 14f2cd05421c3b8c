// ABOUTME: Re-exports the unified error types from the core crate
// ABOUTME: Keeps `crate::errors::*` paths stable for server modules and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! # Unified Error Handling System
//!
//! Error types live in `linguacms-core` so models and storage share them;
//! this module re-exports them under the server crate.

pub use linguacms_core::errors::*;
