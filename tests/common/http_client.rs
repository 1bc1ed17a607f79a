//! HTTP client helpers for tests.

use chronicle::DispatchSnapshot;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub const INTAKE_PATH: &str = "/api/async/process-chronicle-research";

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// Raw intake response: status, error kind header and JSON body.
#[derive(Debug)]
pub struct IntakeResponse {
    pub status: u16,
    pub error_kind: Option<String>,
    pub body: Value,
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

    pub async fn submit(&self, body: &Value) -> Result<IntakeResponse, TestClientError> {
        self.submit_raw(serde_json::to_string(body)?).await
    }

    pub async fn submit_raw(
        &self,
        body: impl Into<String>,
    ) -> Result<IntakeResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url(INTAKE_PATH))
            .header("Content-Type", "application/json")
            .body(body.into())
            .send()
            .await?;

        let status = resp.status().as_u16();
        let error_kind = resp
            .headers()
            .get("x-chronicle-error")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        let body = resp.json().await?;

        Ok(IntakeResponse {
            status,
            error_kind,
            body,
        })
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

    pub async fn stats(&self) -> Result<DispatchSnapshot, TestClientError> {
        let resp = self.client.get(self.url("/stats")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}
