// ABOUTME: Minimum child counts for the completion classifier
// ABOUTME: Counts are minimums, never exact requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Listening fill-in-the-blank needs at least this many answers
pub const LISTENING_MIN_BLANK_ANSWERS: usize = 2;

/// Grammar fill-in-the-blank needs at least this many answers
pub const GRAMMAR_MIN_BLANK_ANSWERS: usize = 1;

/// Minimum options for a single-answer choice question
pub const CHOICE_ONE_MIN_OPTIONS: usize = 2;

/// Minimum options for a multiple-answer choice question
pub const CHOICE_MULTI_MIN_OPTIONS: usize = 3;

/// Minimum correct options for a multiple-answer choice question
pub const CHOICE_MULTI_MIN_CORRECT: usize = 2;

/// Minimum label rows for map labelling
pub const MAP_LABELLING_MIN_ROWS: usize = 2;

/// Minimum rows for matching
pub const MATCHING_MIN_ROWS: usize = 2;

/// Minimum lessons for any course
pub const COURSE_MIN_LESSONS: usize = 1;
