//! Answer-key backend client.
//!
//! [`AnswerKeyBackend`] is the seam the editor talks through; [`HttpBackend`]
//! is the reqwest implementation for the `/api` service. Response parsing is
//! kept in plain functions so it can be tested without a server.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::payload::{AnswerKeyPayload, ExamMetadata, StoredQuestion};

pub const SAVE_PATH: &str = "/exams/answer-keys";
pub const FETCH_PATH: &str = "/exams/answer-keys/fetch";
pub const DELETE_PATH: &str = "/exams/answer-keys/delete";
pub const CHECK_EXISTING_PATH: &str = "/check-existing-data";
pub const UPLOAD_PATH: &str = "/answer";

// =============================================================================
// TRAIT
// =============================================================================

/// Backend operations used by the answer-key editor.
#[async_trait::async_trait]
pub trait AnswerKeyBackend: Send + Sync {
    /// Store an answer key, replacing any previous one for the same exam and subject.
    async fn save_answer_key(&self, payload: &AnswerKeyPayload) -> Result<SaveResponse, ApiError>;

    /// Previously saved questions; empty when nothing matches.
    async fn fetch_answer_key(&self, metadata: &ExamMetadata) -> Result<Vec<StoredQuestion>, ApiError>;

    /// Delete the saved answer key. Returns how many records were removed.
    async fn delete_answer_key(&self, metadata: &ExamMetadata) -> Result<u64, ApiError>;

    /// Number of answer records already stored for this exam and subject.
    async fn check_existing(&self, metadata: &ExamMetadata) -> Result<u64, ApiError>;

    /// Legacy spreadsheet upload bound to a grading session.
    async fn upload_answer_sheet(
        &self,
        session_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<serde_json::Value, ApiError>;
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    #[serde(default)]
    pub storage: Option<String>,
}

#[derive(Serialize)]
struct MetadataRequest<'a> {
    metadata: &'a ExamMetadata,
}

#[derive(Deserialize)]
struct FetchResponse {
    #[serde(default)]
    questions: Option<Vec<StoredQuestion>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    #[serde(default)]
    deleted_count: u64,
}

#[derive(Deserialize)]
struct ExistingResponse {
    #[serde(default)]
    existing_answer_count: u64,
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpBackend {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpBackend {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build from `OMR_API_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the client fails to build.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post_json<B: Serialize + Sync + ?Sized>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "backend request");
        let response = self.http.post(&url).json(body).send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        read_body(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
    if !(200..300).contains(&status) {
        tracing::warn!(status, "backend returned error status");
        return Err(ApiError::Response { status, body: text });
    }
    Ok(text)
}

#[async_trait::async_trait]
impl AnswerKeyBackend for HttpBackend {
    async fn save_answer_key(&self, payload: &AnswerKeyPayload) -> Result<SaveResponse, ApiError> {
        let text = self.post_json(SAVE_PATH, payload).await?;
        parse_json(&text)
    }

    async fn fetch_answer_key(&self, metadata: &ExamMetadata) -> Result<Vec<StoredQuestion>, ApiError> {
        let text = self.post_json(FETCH_PATH, &MetadataRequest { metadata }).await?;
        parse_fetch_response(&text)
    }

    async fn delete_answer_key(&self, metadata: &ExamMetadata) -> Result<u64, ApiError> {
        let text = self.post_json(DELETE_PATH, &MetadataRequest { metadata }).await?;
        parse_json::<DeleteResponse>(&text).map(|r| r.deleted_count)
    }

    async fn check_existing(&self, metadata: &ExamMetadata) -> Result<u64, ApiError> {
        let text = self.post_json(CHECK_EXISTING_PATH, metadata).await?;
        parse_json::<ExistingResponse>(&text).map(|r| r.existing_answer_count)
    }

    async fn upload_answer_sheet(
        &self,
        session_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<serde_json::Value, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new().text("session_id", session_id.to_owned()).part("file", part);
        let response = self
            .http
            .post(self.config.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let text = read_body(response).await?;
        parse_json(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Questions from a fetch response. An empty or `null` body means no saved key.
fn parse_fetch_response(text: &str) -> Result<Vec<StoredQuestion>, ApiError> {
    if text.trim().is_empty() || text.trim() == "null" {
        return Ok(Vec::new());
    }
    parse_json::<FetchResponse>(text).map(|r| r.questions.unwrap_or_default())
}

// =============================================================================
// TEST HELPERS
// =============================================================================
