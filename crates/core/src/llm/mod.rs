//! Chat completion seam shared by both summarization phases.
//! The pipeline only needs one call: prompt in, model text out.

use crate::error::LlmError;
use async_trait::async_trait;

pub mod openai;

/// One completion request to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System message framing the model's role.
    pub system: String,
    /// User message carrying the transcript or partial summaries.
    pub user: String,
    /// Sampling temperature; the pipeline keeps this low.
    pub temperature: f32,
}

/// Sends a single completion request and returns the model's text.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
