// ABOUTME: Application constants organized by domain
// ABOUTME: Re-exports cache, search, and content type constant modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Cache TTLs, capacities, and key segments
pub mod cache;

/// Search index identifiers and document field names
pub mod search;

/// Type discriminator strings as stored in the database
pub mod content_types;

/// Minimum child counts used by completion classification
pub mod completion;
