use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::types::{CefrLevel, DashboardStats, PracticeResult, Word};

/// Failures are distinguished here for the log file only; the page layer
/// collapses every variant into one fixed user-facing message per operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    word_id: i64,
    user_sentence: &'a str,
}

/// Blocking HTTP client for the practice backend. Callers run requests on
/// worker threads; the UI thread never touches this directly.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn random_word(&self, difficulty: Option<CefrLevel>) -> Result<Word, ApiError> {
        let mut request = self.http.get(self.endpoint("/api/practice/word"));
        if let Some(level) = difficulty {
            request = request.query(&[("difficulty", level.as_str())]);
        }
        Self::decode(request.send()?)
    }

    pub fn submit_practice(
        &self,
        word_id: i64,
        sentence: &str,
    ) -> Result<PracticeResult, ApiError> {
        let body = SubmitRequest {
            word_id,
            user_sentence: sentence,
        };
        Self::decode(
            self.http
                .post(self.endpoint("/api/practice/submit"))
                .json(&body)
                .send()?,
        )
    }

    pub fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        Self::decode(self.http.get(self.endpoint("/api/dashboard/stats")).send()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.text()?;
        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}
