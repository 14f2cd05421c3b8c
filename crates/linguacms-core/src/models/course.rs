// ABOUTME: Course root entity
// ABOUTME: BOOK courses own a book and lessons, OTHER courses own lessons only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::{ContentFamily, RootEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Course grouping lessons, optionally around a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: Uuid,
    /// Course name
    pub name: String,
    /// Course description
    pub description: String,
    /// Proficiency level (e.g. "A2", "B1")
    pub level: String,
    /// Raw type discriminator (`BOOK`, `OTHER`)
    pub course_type: String,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Incremented on every root field update
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl RootEntity for Course {
    const FAMILY: ContentFamily = ContentFamily::Course;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn type_tag(&self) -> &str {
        &self.course_type
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".into(), json!(self.name));
        fields.insert("description".into(), json!(self.description));
        fields.insert("level".into(), json!(self.level));
        fields.insert("tags".into(), json!(self.tags));
        fields.insert("created_at".into(), json!(self.created_at.to_rfc3339()));
        fields.insert("updated_at".into(), json!(self.updated_at.to_rfc3339()));
        fields
    }
}

/// Editable fields of a course, used for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInput {
    /// Course name
    pub name: String,
    /// Course description
    pub description: String,
    /// Proficiency level
    pub level: String,
    /// Type discriminator
    pub course_type: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}
