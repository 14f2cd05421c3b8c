// ABOUTME: Re-exports content models from the core crate
// ABOUTME: Root entities, child rows, write inputs, and the detail aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

pub use linguacms_core::models::*;
