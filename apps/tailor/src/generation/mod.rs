// Tailoring: request validation, the completions call, reply parsing, and
// appending the result to the version history.
// All completions calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod reply;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::prompts::{build_user_message, TAILOR_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::Model;

pub use generator::generate;
pub use reply::parse_reply;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport or HTTP-status failure talking to the endpoint.
    #[error("{0}")]
    Request(LlmError),

    #[error("No content in API response.")]
    EmptyReply,

    #[error("Malformed JSON in API response: {0}")]
    MalformedReply(String),

    #[error("Invalid JSON structure in API response.")]
    InvalidStructure,
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::EmptyContent => GenerationError::EmptyReply,
            other => GenerationError::Request(other),
        }
    }
}

/// Everything one tailoring call needs, already validated.
#[derive(Debug, Clone)]
pub struct TailorRequest {
    pub resume: String,
    pub job_description: String,
    pub api_key: String,
    pub model: Model,
}

/// Seam between the generation workflow and the transport.
/// Returns the raw reply text; parsing happens in the workflow.
#[async_trait]
pub trait TailorBackend: Send + Sync {
    async fn tailor(&self, request: &TailorRequest) -> Result<String, GenerationError>;
}

#[async_trait]
impl TailorBackend for LlmClient {
    async fn tailor(&self, request: &TailorRequest) -> Result<String, GenerationError> {
        let user = build_user_message(&request.resume, &request.job_description);
        Ok(self
            .complete_json(&request.api_key, request.model, TAILOR_SYSTEM, &user)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_maps_to_empty_reply() {
        assert!(matches!(
            GenerationError::from(LlmError::EmptyContent),
            GenerationError::EmptyReply
        ));
    }

    #[test]
    fn test_api_error_maps_to_request() {
        let err = GenerationError::from(LlmError::Api {
            status: 429,
            message: "Rate limit reached".into(),
        });
        assert!(matches!(err, GenerationError::Request(_)));
        assert_eq!(err.to_string(), "API error (status 429): Rate limit reached");
    }
}
