// ABOUTME: Root entity persistence for listening questions, grammar questions, and courses
// ABOUTME: Version starts at 1 and is bumped inside the update transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::tables::root_table;
use super::{Database, DatabaseError};
use crate::models::{
    Course, CourseInput, GrammarQuestion, GrammarQuestionInput, ListeningQuestion,
    ListeningQuestionInput, RootEntity,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

/// Root entity with a table mapping
pub trait StoredRoot: RootEntity {
    /// Entity name used in not-found errors
    const ENTITY: &'static str;

    /// Column list selected for this root
    const COLUMNS: &'static str;

    /// Decode a row selected with [`Self::COLUMNS`]
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or holds an undecodable value
    fn from_row(row: &SqliteRow) -> Result<Self, DatabaseError>;
}

pub(super) fn get_uuid(row: &SqliteRow, column: &str) -> Result<Uuid, DatabaseError> {
    let raw: String = row.try_get(column)?;
    Ok(Uuid::parse_str(&raw)?)
}

pub(super) fn get_datetime(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, DatabaseError> {
    let raw: String = row.try_get(column)?;
    Ok(DateTime::parse_from_rfc3339(&raw)?.with_timezone(&Utc))
}

fn get_tags(row: &SqliteRow) -> Result<Vec<String>, DatabaseError> {
    let raw: String = row.try_get("tags")?;
    Ok(serde_json::from_str(&raw)?)
}

fn encode_tags(tags: &[String]) -> Result<String, DatabaseError> {
    Ok(serde_json::to_string(tags)?)
}

impl StoredRoot for ListeningQuestion {
    const ENTITY: &'static str = "listening_question";
    const COLUMNS: &'static str =
        "id, title, audio_url, transcript, question_type, tags, version, created_at, updated_at";

    fn from_row(row: &SqliteRow) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: get_uuid(row, "id")?,
            title: row.try_get("title")?,
            audio_url: row.try_get("audio_url")?,
            transcript: row.try_get("transcript")?,
            question_type: row.try_get("question_type")?,
            tags: get_tags(row)?,
            version: row.try_get("version")?,
            created_at: get_datetime(row, "created_at")?,
            updated_at: get_datetime(row, "updated_at")?,
        })
    }
}

impl StoredRoot for GrammarQuestion {
    const ENTITY: &'static str = "grammar_question";
    const COLUMNS: &'static str =
        "id, title, instruction, level, question_type, tags, version, created_at, updated_at";

    fn from_row(row: &SqliteRow) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: get_uuid(row, "id")?,
            title: row.try_get("title")?,
            instruction: row.try_get("instruction")?,
            level: row.try_get("level")?,
            question_type: row.try_get("question_type")?,
            tags: get_tags(row)?,
            version: row.try_get("version")?,
            created_at: get_datetime(row, "created_at")?,
            updated_at: get_datetime(row, "updated_at")?,
        })
    }
}

impl StoredRoot for Course {
    const ENTITY: &'static str = "course";
    const COLUMNS: &'static str =
        "id, name, description, level, course_type, tags, version, created_at, updated_at";

    fn from_row(row: &SqliteRow) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: get_uuid(row, "id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            level: row.try_get("level")?,
            course_type: row.try_get("course_type")?,
            tags: get_tags(row)?,
            version: row.try_get("version")?,
            created_at: get_datetime(row, "created_at")?,
            updated_at: get_datetime(row, "updated_at")?,
        })
    }
}

/// Re-read a root inside an open transaction
async fn fetch_in_tx<R: StoredRoot>(
    tx: &mut Transaction<'_, Sqlite>,
    id: Uuid,
) -> Result<R, DatabaseError> {
    let query = format!(
        "SELECT {} FROM {} WHERE id = ?",
        R::COLUMNS,
        root_table(R::FAMILY)
    );

    let row = sqlx::query(&query)
        .bind(id.to_string())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found(R::ENTITY, id))?;

    R::from_row(&row)
}

impl Database {
    /// Get a root by id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no row exists, or a query error
    pub async fn get_root<R: StoredRoot>(&self, id: Uuid) -> Result<R, DatabaseError> {
        self.find_root(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(R::ENTITY, id))
    }

    /// Get a root by id, `None` if absent
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn find_root<R: StoredRoot>(&self, id: Uuid) -> Result<Option<R>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = ?",
            R::COLUMNS,
            root_table(R::FAMILY)
        );

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(R::from_row).transpose()
    }

    /// List every root of a family, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_roots<R: StoredRoot>(&self) -> Result<Vec<R>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY created_at ASC, id ASC",
            R::COLUMNS,
            root_table(R::FAMILY)
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(R::from_row).collect()
    }

    /// Roots whose version is strictly greater than `version`, ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn roots_since<R: StoredRoot>(&self, version: i64) -> Result<Vec<R>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM {} WHERE version > ? ORDER BY version ASC, id ASC",
            R::COLUMNS,
            root_table(R::FAMILY)
        );

        let rows = sqlx::query(&query)
            .bind(version)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(R::from_row).collect()
    }

    /// Delete a root; children cascade
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no row was deleted
    pub async fn delete_root<R: StoredRoot>(&self, id: Uuid) -> Result<(), DatabaseError> {
        let query = format!("DELETE FROM {} WHERE id = ?", root_table(R::FAMILY));

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(R::ENTITY, id));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Insert a listening question at version 1
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_listening_question(
        &self,
        input: &ListeningQuestionInput,
    ) -> Result<ListeningQuestion, DatabaseError> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r"
            INSERT INTO listening_questions
                (id, title, audio_url, transcript, question_type, tags, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
            ",
        )
        .bind(id.to_string())
        .bind(&input.title)
        .bind(&input.audio_url)
        .bind(&input.transcript)
        .bind(&input.question_type)
        .bind(encode_tags(&input.tags)?)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let created = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Overwrite a listening question's fields and bump its version
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the question does not exist
    pub async fn update_listening_question(
        &self,
        id: Uuid,
        input: &ListeningQuestionInput,
    ) -> Result<ListeningQuestion, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r"
            UPDATE listening_questions
            SET title = ?, audio_url = ?, transcript = ?, question_type = ?, tags = ?,
                version = version + 1, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&input.title)
        .bind(&input.audio_url)
        .bind(&input.transcript)
        .bind(&input.question_type)
        .bind(encode_tags(&input.tags)?)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(ListeningQuestion::ENTITY, id));
        }

        let updated = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Insert a grammar question at version 1
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_grammar_question(
        &self,
        input: &GrammarQuestionInput,
    ) -> Result<GrammarQuestion, DatabaseError> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r"
            INSERT INTO grammar_questions
                (id, title, instruction, level, question_type, tags, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
            ",
        )
        .bind(id.to_string())
        .bind(&input.title)
        .bind(&input.instruction)
        .bind(&input.level)
        .bind(&input.question_type)
        .bind(encode_tags(&input.tags)?)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let created = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Overwrite a grammar question's fields and bump its version
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the question does not exist
    pub async fn update_grammar_question(
        &self,
        id: Uuid,
        input: &GrammarQuestionInput,
    ) -> Result<GrammarQuestion, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r"
            UPDATE grammar_questions
            SET title = ?, instruction = ?, level = ?, question_type = ?, tags = ?,
                version = version + 1, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&input.title)
        .bind(&input.instruction)
        .bind(&input.level)
        .bind(&input.question_type)
        .bind(encode_tags(&input.tags)?)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(GrammarQuestion::ENTITY, id));
        }

        let updated = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Insert a course at version 1
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_course(&self, input: &CourseInput) -> Result<Course, DatabaseError> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r"
            INSERT INTO courses
                (id, name, description, level, course_type, tags, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
            ",
        )
        .bind(id.to_string())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.level)
        .bind(&input.course_type)
        .bind(encode_tags(&input.tags)?)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let created = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Overwrite a course's fields and bump its version
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the course does not exist
    pub async fn update_course(
        &self,
        id: Uuid,
        input: &CourseInput,
    ) -> Result<Course, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r"
            UPDATE courses
            SET name = ?, description = ?, level = ?, course_type = ?, tags = ?,
                version = version + 1, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.level)
        .bind(&input.course_type)
        .bind(encode_tags(&input.tags)?)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(Course::ENTITY, id));
        }

        let updated = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }
}
