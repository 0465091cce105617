//! Mock providers for testing
//!
//! Test-only implementations of the generative traits that record every call
//! and answer from a script.

#![cfg(test)]

use super::errors::LLMError;
use super::traits::{ImageProvider, LLMProvider};
use super::types::*;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Prefix the mock puts in front of the user message it echoes back
pub const REFINED_PREFIX: &str = "REFINED::";

/// Mock text provider
#[derive(Clone)]
pub struct MockLLMProvider {
    name: String,
    model: String,
    fixed_response: Option<String>,
    fail_markers: Arc<Mutex<Vec<String>>>,
    fail_all: bool,
    call_history: Arc<Mutex<Vec<(Vec<Message>, CompletionOptions)>>>,
}

impl MockLLMProvider {
    /// Echoes `REFINED::<user message>` for every call
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            model: "mock-model".to_string(),
            fixed_response: None,
            fail_markers: Arc::new(Mutex::new(Vec::new())),
            fail_all: false,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every call with the same text
    pub fn with_response(content: impl Into<String>) -> Self {
        Self { fixed_response: Some(content.into()), ..Self::new() }
    }

    /// Fail every call with a network error
    pub fn failing() -> Self {
        Self { fail_all: true, ..Self::new() }
    }

    /// Fail any call whose user message contains `marker`
    pub fn fail_when(self, marker: impl Into<String>) -> Self {
        self.fail_markers.lock().unwrap().push(marker.into());
        self
    }

    /// Recorded calls, oldest first
    pub fn calls(&self) -> Vec<(Vec<Message>, CompletionOptions)> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    /// User message of every recorded call
    pub fn user_messages(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|(messages, _)| {
                messages.into_iter().find(|m| m.role == Role::User).map(|m| m.content)
            })
            .collect()
    }
}

impl Default for MockLLMProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMProvider for MockLLMProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, LLMError> {
        self.call_history.lock().unwrap().push((messages.clone(), options));

        let user = messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        if self.fail_all || self.fail_markers.lock().unwrap().iter().any(|m| user.contains(m.as_str())) {
            return Err(LLMError::network("mock failure"));
        }

        let content = match &self.fixed_response {
            Some(fixed) => fixed.clone(),
            None => format!("{}{}", REFINED_PREFIX, user),
        };

        Ok(CompletionResponse {
            id: "mock-response-1".to_string(),
            model: self.model.clone(),
            choices: vec![Choice { index: 0, message: Message::assistant(content), finish_reason: None }],
            usage: None,
        })
    }
}

/// Mock image provider
#[derive(Clone)]
pub struct MockImageProvider {
    images: Option<Vec<Vec<u8>>>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
}

impl MockImageProvider {
    /// Return these buffers on every call
    pub fn returning(images: Vec<Vec<u8>>) -> Self {
        Self { images: Some(images), requests: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Fail every call
    pub fn failing() -> Self {
        Self { images: None, requests: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    fn name(&self) -> &str {
        "mock-images"
    }

    async fn generate(&self, request: ImageRequest) -> Result<Vec<Vec<u8>>, LLMError> {
        self.requests.lock().unwrap().push(request);
        match &self.images {
            Some(images) => Ok(images.clone()),
            None => Err(LLMError::api(500, "mock image failure")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_echo_and_history() {
        let provider = MockLLMProvider::new();
        let response = provider
            .complete(vec![Message::system("s"), Message::user("正文")], CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(response.first_content(), Some("REFINED::正文"));
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.user_messages(), vec!["正文".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_provider_failure_marker() {
        let provider = MockLLMProvider::new().fail_when("邮件");
        let failed = provider.complete(vec![Message::user("写邮件")], CompletionOptions::default()).await;
        assert!(failed.is_err());

        let ok = provider.complete(vec![Message::user("写推送")], CompletionOptions::default()).await;
        assert!(ok.is_ok());
        assert_eq!(provider.call_count(), 2);
    }
}
