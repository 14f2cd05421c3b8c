// ABOUTME: Type discriminator strings for root entities as persisted
// ABOUTME: Shared by storage, validation, and the detail loader registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Fill-in-the-blank question (sub-question + answers)
pub const FILL_IN_THE_BLANK: &str = "FILL_IN_THE_BLANK";

/// Single-answer choice question (sub-question + options)
pub const CHOICE_ONE: &str = "CHOICE_ONE";

/// Multiple-answer choice question (sub-question + options)
pub const CHOICE_MULTI: &str = "CHOICE_MULTI";

/// Map labelling question (flat label rows)
pub const MAP_LABELLING: &str = "MAP_LABELLING";

/// Matching question (flat matching rows)
pub const MATCHING: &str = "MATCHING";

/// Course built around a book (book + lessons)
pub const BOOK: &str = "BOOK";

/// Any other course (lessons only)
pub const OTHER: &str = "OTHER";
