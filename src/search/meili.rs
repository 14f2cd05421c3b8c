// ABOUTME: Meilisearch search backend over its HTTP API
// ABOUTME: Creates family indexes on demand and upserts documents by primary key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::SearchIndex;
use crate::constants::search::PRIMARY_KEY;
use crate::errors::{AppError, AppResult, ErrorCode};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Meilisearch client bound to one instance
#[derive(Clone)]
pub struct MeiliSearchIndex {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl MeiliSearchIndex {
    /// Create a client for the instance at `base_url`
    ///
    /// # Errors
    ///
    /// Returns a config error if the URL is blank
    pub fn new(base_url: &str, api_key: Option<String>) -> AppResult<Self> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(AppError::new(ErrorCode::ConfigMissing, "MEILI_URL is empty"));
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_owned(),
            api_key: api_key.filter(|value| !value.trim().is_empty()),
            http: reqwest::Client::new(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http.request(method, url);
        if let Some(key) = &self.api_key {
            builder.bearer_auth(key)
        } else {
            builder
        }
    }

    async fn send(builder: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        builder.send().await.map_err(|e| {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("meilisearch unreachable: {e}"),
            )
        })
    }
}

fn status_error(status: StatusCode, body: &str) -> AppError {
    AppError::search(format!("meilisearch error: {status} - {body}"))
}

/// Writes answer `202 Accepted` with an enqueued task
async fn ensure_success(resp: reqwest::Response) -> AppResult<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

#[async_trait::async_trait]
impl SearchIndex for MeiliSearchIndex {
    async fn ensure_index(&self, index: &str) -> AppResult<()> {
        let resp = Self::send(self.request(Method::GET, &format!("/indexes/{index}"))).await?;
        if resp.status() != StatusCode::NOT_FOUND {
            return ensure_success(resp).await;
        }

        info!(index = %index, "Creating search index");
        let create = self
            .request(Method::POST, "/indexes")
            .json(&json!({ "uid": index, "primaryKey": PRIMARY_KEY }));
        ensure_success(Self::send(create).await?).await
    }

    async fn upsert_document(&self, index: &str, document: &Value) -> AppResult<()> {
        if document.get(PRIMARY_KEY).and_then(Value::as_str).is_none() {
            return Err(AppError::search(format!(
                "document for '{index}' has no string id"
            )));
        }

        let upsert = self
            .request(Method::POST, &format!("/indexes/{index}/documents"))
            .query(&[("primaryKey", PRIMARY_KEY)])
            .json(&[document]);
        ensure_success(Self::send(upsert).await?).await?;

        debug!(index = %index, "Document upsert enqueued");
        Ok(())
    }

    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()> {
        let resp = Self::send(
            self.request(Method::DELETE, &format!("/indexes/{index}/documents/{id}")),
        )
        .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        ensure_success(resp).await
    }

    async fn health_check(&self) -> AppResult<()> {
        ensure_success(Self::send(self.request(Method::GET, "/health")).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_is_rejected() {
        let err = MeiliSearchIndex::new("   ", None).err().unwrap();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn test_status_error_carries_status_and_body() {
        let err = status_error(StatusCode::BAD_REQUEST, r#"{"code":"invalid_document_id"}"#);
        assert_eq!(err.code, ErrorCode::SearchError);
        assert!(err.message.contains("400"));
        assert!(err.message.contains("invalid_document_id"));
    }
}
