// ABOUTME: Listening question root entity
// ABOUTME: Owns fill-in-the-blank, choice, map-labelling, or matching children by type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::{ContentFamily, RootEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Listening comprehension question played from an audio clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningQuestion {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Audio clip location
    pub audio_url: String,
    /// Optional transcript of the clip
    pub transcript: Option<String>,
    /// Raw type discriminator (`FILL_IN_THE_BLANK`, `CHOICE_ONE`, ...)
    pub question_type: String,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Incremented on every root field update
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl RootEntity for ListeningQuestion {
    const FAMILY: ContentFamily = ContentFamily::Listening;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn type_tag(&self) -> &str {
        &self.question_type
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), json!(self.title));
        fields.insert("audio_url".into(), json!(self.audio_url));
        fields.insert("transcript".into(), json!(self.transcript));
        fields.insert("tags".into(), json!(self.tags));
        fields.insert("created_at".into(), json!(self.created_at.to_rfc3339()));
        fields.insert("updated_at".into(), json!(self.updated_at.to_rfc3339()));
        fields
    }
}

/// Editable fields of a listening question, used for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningQuestionInput {
    /// Display title
    pub title: String,
    /// Audio clip location
    pub audio_url: String,
    /// Optional transcript
    pub transcript: Option<String>,
    /// Type discriminator
    pub question_type: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}
