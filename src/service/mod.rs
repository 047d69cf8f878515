//! Answer service access
//!
//! The pipeline only sees the [`AnswerService`] trait; [`client::QnaClient`]
//! is the HTTP implementation used by the CLI.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::Result;

pub use client::QnaClient;

/// Connection details for a knowledge base
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Base URL of the service; a trailing slash is ignored
    pub hostname: String,
    /// Endpoint key for the `Authorization` header
    pub auth_key: String,
    /// Knowledge base identifier
    pub knowledge_base: String,
}

impl Endpoint {
    /// Full URL of the generateAnswer operation
    pub fn generate_answer_url(&self) -> String {
        format!(
            "{}/knowledgebases/{}/generateAnswer",
            self.hostname.trim_end_matches('/'),
            self.knowledge_base
        )
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("EndpointKey {}", self.auth_key)
    }
}

/// Body of a generateAnswer request
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

/// Body of a generateAnswer response
///
/// Extra fields the service sends are ignored.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub answers: Vec<AnswerCandidate>,
}

/// One candidate answer with the service's confidence
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerCandidate {
    pub answer: String,
    pub score: f64,
}

/// Pick the highest-scoring candidate; on ties the earlier one wins
pub fn best_candidate(candidates: &[AnswerCandidate]) -> Option<&AnswerCandidate> {
    candidates
        .iter()
        .reduce(|best, c| if c.score > best.score { c } else { best })
}

/// A service that answers questions from a knowledge base
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask one question; returns every candidate the service produced
    async fn ask(&self, question: &str) -> Result<Vec<AnswerCandidate>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(hostname: &str) -> Endpoint {
        Endpoint {
            hostname: hostname.to_string(),
            auth_key: "secret".to_string(),
            knowledge_base: "kb-1".to_string(),
        }
    }

    fn candidate(answer: &str, score: f64) -> AnswerCandidate {
        AnswerCandidate {
            answer: answer.to_string(),
            score,
        }
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let expected = "https://host/qnamaker/knowledgebases/kb-1/generateAnswer";
        assert_eq!(endpoint("https://host/qnamaker").generate_answer_url(), expected);
        assert_eq!(endpoint("https://host/qnamaker/").generate_answer_url(), expected);
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(endpoint("h").authorization(), "EndpointKey secret");
    }

    #[test]
    fn test_best_candidate_picks_max_score() {
        let candidates = vec![candidate("a", 0.2), candidate("b", 0.8), candidate("c", 0.5)];
        assert_eq!(best_candidate(&candidates).unwrap().answer, "b");
    }

    #[test]
    fn test_best_candidate_tie_keeps_service_order() {
        let candidates = vec![candidate("first", 0.5), candidate("second", 0.5)];
        assert_eq!(best_candidate(&candidates).unwrap().answer, "first");
    }

    #[test]
    fn test_best_candidate_empty() {
        assert!(best_candidate(&[]).is_none());
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let json = r#"{"answers":[{"answer":"X is Y","score":0.9,"id":4,"questions":["What is X?"]}],"debugInfo":null}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.answers, vec![candidate("X is Y", 0.9)]);
    }
}
