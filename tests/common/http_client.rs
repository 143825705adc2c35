//! HTTP client helpers for tests.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub viva_status: String,
    pub evaluation_id: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
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
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        Ok(self.client.get(self.url("/healthz")).send().await?.json().await?)
    }

    pub async fn ready(&self) -> Result<TestResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;
        Self::collect(resp).await
    }

    pub async fn evaluate_text(
        &self,
        question_id: &str,
        student_answer: &str,
    ) -> Result<TestResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/evaluate/text"))
            .json(&serde_json::json!({
                "question_id": question_id,
                "student_answer": student_answer,
            }))
            .send()
            .await?;
        Self::collect(resp).await
    }

    pub async fn evaluate_audio(
        &self,
        question_id: &str,
        wav: Vec<u8>,
    ) -> Result<TestResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/evaluate/audio"))
            .query(&[("question_id", question_id)])
            .header("Content-Type", "audio/wav")
            .body(wav)
            .send()
            .await?;
        Self::collect(resp).await
    }

    async fn collect(resp: reqwest::Response) -> Result<TestResponse, TestClientError> {
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        };
        let status = resp.status().as_u16();
        let viva_status = header("x-viva-status").unwrap_or_else(|| "unknown".to_string());
        let evaluation_id = header("x-viva-evaluation-id");
        let body = resp.json().await.unwrap_or(serde_json::Value::Null);

        Ok(TestResponse {
            status,
            viva_status,
            evaluation_id,
            body,
        })
    }
}
