// ABOUTME: Domain service layer running validation, the transactional write, then the Updator
// ABOUTME: One service per content family plus shared root, question-children, and read-path helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! Domain service layer
//!
//! Every mutation follows the same sequence: validate the input without
//! touching any backend, commit the relational write, then hand the owning
//! root to the [`Updator`](crate::sync::Updator). Child writes publish with
//! [`PublishMode::Leaf`](crate::sync::PublishMode::Leaf), root writes with
//! [`PublishMode::Root`](crate::sync::PublishMode::Root).

/// Course roots, books, and lessons
pub mod course;

/// Grammar roots and their question children
pub mod grammar;

/// Listening roots, question children, map labels, and matching pairs
pub mod listening;

/// Sub-question, answer, and option operations shared by question families
pub mod questions;

/// Generic root lifecycle and the cached read path
pub mod roots;

/// Input validation run before any I/O
pub mod validation;

pub use course::CourseService;
pub use grammar::GrammarService;
pub use listening::ListeningService;
pub use questions::QuestionChildrenService;
pub use roots::{DetailRead, DetailSource, RootService, RootStore};

use crate::sync::PublishReport;
use serde::Serialize;

/// Value written by a mutation together with the publication outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Published<T> {
    /// Entity as committed, or the id of a deleted row
    pub value: T,
    /// Cache and search outcome of the republication
    pub report: PublishReport,
}

impl<T> Published<T> {
    /// Pair a committed value with its publication report
    pub const fn new(value: T, report: PublishReport) -> Self {
        Self { value, report }
    }
}
