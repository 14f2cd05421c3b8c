// ABOUTME: Search index identifiers and flattened document field names
// ABOUTME: One logical index per root entity family
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Default index uid for listening questions
pub const LISTENING_INDEX: &str = "listening_questions";

/// Default index uid for grammar questions
pub const GRAMMAR_INDEX: &str = "grammar_questions";

/// Default index uid for courses
pub const COURSE_INDEX: &str = "courses";

/// Primary key of every search document
pub const PRIMARY_KEY: &str = "id";

/// Field carrying the completion status tag
pub const STATUS_FIELD: &str = "status";
