// ABOUTME: Dependency wiring from configuration to backends, the updator, and family services
// ABOUTME: Every narrow trait is injected through constructors; there is no global state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! Server resources
//!
//! [`ServerResources`] is built once at startup, either from a
//! [`ServerConfig`](crate::config::environment::ServerConfig) or from
//! already-constructed backends, and cloned cheaply into every task.

/// Shared backends and services
pub mod resources;

pub use resources::ServerResources;
