// ABOUTME: Re-exports application constants from the core crate
// ABOUTME: Content type tags, cache key layout, search index uids, completion thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

pub use linguacms_core::constants::*;
