// ABOUTME: SQLite storage for content roots and their type-specific children
// ABOUTME: Owns the connection pool and per-family schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! # Database Management
//!
//! The relational store is the source of truth. Every child table references
//! its parent with `ON DELETE CASCADE`, so deleting a root removes its whole
//! hierarchy in one statement.

mod children;
/// Narrow read interfaces consumed by the synchronization core
pub mod repositories;
mod roots;
/// Static table names per family and question type
pub mod tables;

pub use linguacms_core::errors::DatabaseError;
pub use roots::StoredRoot;
pub use tables::QuestionTables;

use crate::config::environment::DatabaseConfig;
use crate::models::ContentFamily;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Database manager for content storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect, enable foreign keys, and run migrations
    ///
    /// In-memory databases are pinned to a single long-lived connection,
    /// since each `SQLite` memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let is_memory = config.url.contains(":memory:");

        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        info!(url = %config.url, "Database connected");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Connect to a URL with default pool settings
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn connect(url: &str) -> Result<Self, DatabaseError> {
        Self::new(&DatabaseConfig {
            url: url.to_owned(),
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Verify the pool can serve a query
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.migrate_listening().await?;
        self.migrate_grammar().await?;
        self.migrate_courses().await?;
        Ok(())
    }

    async fn migrate_listening(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS listening_questions (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                audio_url TEXT NOT NULL,
                transcript TEXT,
                question_type TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                version INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_listening_questions_version ON listening_questions(version)",
        )
        .execute(&self.pool)
        .await?;

        for tables in QuestionTables::for_family(ContentFamily::Listening) {
            self.migrate_question_tables(tables).await?;
        }

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS listening_map_labels (
                id TEXT PRIMARY KEY,
                root_id TEXT NOT NULL REFERENCES listening_questions(id) ON DELETE CASCADE,
                label TEXT NOT NULL,
                answer TEXT NOT NULL,
                position INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS listening_matching_pairs (
                id TEXT PRIMARY KEY,
                root_id TEXT NOT NULL REFERENCES listening_questions(id) ON DELETE CASCADE,
                prompt TEXT NOT NULL,
                answer TEXT NOT NULL,
                position INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_listening_map_labels_root ON listening_map_labels(root_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_listening_matching_pairs_root ON listening_matching_pairs(root_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn migrate_grammar(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS grammar_questions (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                instruction TEXT NOT NULL,
                level TEXT NOT NULL,
                question_type TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                version INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_grammar_questions_version ON grammar_questions(version)",
        )
        .execute(&self.pool)
        .await?;

        for tables in QuestionTables::for_family(ContentFamily::Grammar) {
            self.migrate_question_tables(tables).await?;
        }

        Ok(())
    }

    async fn migrate_courses(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS courses (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                level TEXT NOT NULL,
                course_type TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                version INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_courses_version ON courses(version)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS course_books (
                id TEXT PRIMARY KEY,
                course_id TEXT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                publisher TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS course_lessons (
                id TEXT PRIMARY KEY,
                course_id TEXT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                position INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_course_books_course ON course_books(course_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_course_lessons_course ON course_lessons(course_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sub-question table plus its answer or option table
    async fn migrate_question_tables(&self, tables: QuestionTables) -> Result<(), DatabaseError> {
        let sub = tables.sub_question_table();
        let root = tables.root_table();
        let child = tables.child_table();

        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {sub} (
                id TEXT PRIMARY KEY,
                root_id TEXT NOT NULL REFERENCES {root}(id) ON DELETE CASCADE,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "
        ))
        .execute(&self.pool)
        .await?;

        let child_columns = if tables.has_answers() {
            "content TEXT NOT NULL, position INTEGER NOT NULL DEFAULT 0"
        } else {
            "content TEXT NOT NULL, is_correct BOOLEAN NOT NULL DEFAULT false"
        };

        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {child} (
                id TEXT PRIMARY KEY,
                question_id TEXT NOT NULL REFERENCES {sub}(id) ON DELETE CASCADE,
                {child_columns}
            )
            "
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{sub}_root ON {sub}(root_id)"
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{child}_question ON {child}(question_id)"
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_database_migrates_twice() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db.health_check().await.unwrap();
    }
}
