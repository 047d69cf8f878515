//! HTTP client for the generateAnswer endpoint

use std::time::Duration;

use async_trait::async_trait;

use super::{AnswerCandidate, AnswerService, Endpoint, QueryRequest, QueryResponse};
use crate::common::{Error, Result};

/// Answer service reached over HTTP
///
/// Every call is followed by a fixed delay so the service is never hit
/// faster than one request per `delay`. Failures are returned as-is and
/// never retried.
pub struct QnaClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    delay: Duration,
}

impl QnaClient {
    /// Create a client with the given request timeout and post-call delay
    pub fn new(endpoint: Endpoint, timeout: Duration, delay: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("qna-validator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            delay,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn send(&self, question: &str) -> Result<Vec<AnswerCandidate>> {
        let url = self.endpoint.generate_answer_url();
        tracing::debug!("POST {} question={:?}", url, question);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.endpoint.authorization())
            .json(&QueryRequest { question })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: QueryResponse = serde_json::from_str(&body)
            .map_err(|e| Error::ServiceResponse(format!("{} in body {}", e, body)))?;

        tracing::debug!("Service returned {} candidate(s)", parsed.answers.len());
        Ok(parsed.answers)
    }
}

#[async_trait]
impl AnswerService for QnaClient {
    async fn ask(&self, question: &str) -> Result<Vec<AnswerCandidate>> {
        let result = self.send(question).await;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }
}
