//! HTTP client helpers for tests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// Status code, `x-qascore-status` header and body of a response.
pub struct RawResponse {
    pub status: u16,
    pub qascore_status: String,
    pub body: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn into_raw(resp: reqwest::Response) -> Result<RawResponse, TestClientError> {
        let status = resp.status().as_u16();
        let qascore_status = resp
            .headers()
            .get("x-qascore-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let body = resp.text().await?;

        Ok(RawResponse {
            status,
            qascore_status,
            body,
        })
    }

    pub async fn score(
        &self,
        sentence: &str,
        target_sentence: &str,
    ) -> Result<ScoreResponse, TestClientError> {
        let raw = self.score_raw(sentence, target_sentence).await?;

        match raw.status {
            200 => Ok(serde_json::from_str(&raw.body)?),
            400 => Err(TestClientError::BadRequest(raw.body)),
            status => Err(TestClientError::UnexpectedStatus(status, raw.body)),
        }
    }

    pub async fn score_raw(
        &self,
        sentence: &str,
        target_sentence: &str,
    ) -> Result<RawResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/api/score"))
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "sentence": sentence,
                "target_sentence": target_sentence,
            }))
            .send()
            .await?;

        Self::into_raw(resp).await
    }

    pub async fn submit_form(
        &self,
        sentence: &str,
        target_sentence: &str,
    ) -> Result<RawResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/"))
            .form(&[("sentence", sentence), ("target_sentence", target_sentence)])
            .send()
            .await?;

        Self::into_raw(resp).await
    }

    pub async fn index(&self) -> Result<RawResponse, TestClientError> {
        let resp = self.client.get(self.url("/")).send().await?;
        Self::into_raw(resp).await
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreResponse {
    pub labse: f32,
    pub pml: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelStatus {
    pub name: String,
    pub status: String,
    pub embedding_dim: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub language: String,
    pub encoder_mode: String,
    pub models: Vec<ModelStatus>,
}

impl ReadyResponse {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://localhost:8000");
        assert_eq!(client.url("/healthz"), "http://localhost:8000/healthz");
        assert_eq!(client.url("healthz"), "http://localhost:8000/healthz");
    }

    #[test]
    fn test_ready_response_is_ready_helper() {
        let ready = ReadyResponse {
            status: "ready".to_string(),
            language: "hi".to_string(),
            encoder_mode: "stub".to_string(),
            models: Vec::new(),
        };
        assert!(ready.is_ready());
    }
}
