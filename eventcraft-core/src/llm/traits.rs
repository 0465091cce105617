//! Traits for generative service implementations
//!
//! The pipeline only sees these two traits, so tests can swap in the mock
//! providers and production code can target any OpenAI-compatible service.

use super::errors::LLMError;
use super::types::*;
use async_trait::async_trait;

/// Generative-text capability
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Get the model ID being used
    fn model(&self) -> &str;

    /// Complete a chat conversation
    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, LLMError>;
}

/// Generative-image capability
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Generate images; the returned buffers keep the service's order
    async fn generate(&self, request: ImageRequest) -> Result<Vec<Vec<u8>>, LLMError>;
}
