//! OpenAI-compatible providers for text and image generation
//!
//! Any service exposing `/chat/completions` and `/images/generations` with
//! bearer authentication can back the pipeline.

use super::{
    errors::{LLMError, LLMResult},
    traits::{ImageProvider, LLMProvider},
    types::*,
};
use crate::config::ServiceConfig;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Settings for one OpenAI-compatible chat model
#[derive(Debug, Clone)]
pub struct OpenAICompatConfig {
    pub provider: String,
    pub base_url: String,
    pub api_key_env: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenAICompatConfig {
    /// Config for the refine (copy polishing) model
    pub fn text(service: &ServiceConfig) -> Self {
        Self::for_model(service, &service.text_model)
    }

    /// Config for the rule drafting model
    pub fn rules(service: &ServiceConfig) -> Self {
        Self::for_model(service, &service.rules_model)
    }

    fn for_model(service: &ServiceConfig, model: &str) -> Self {
        Self {
            provider: "openai-compat".to_string(),
            base_url: service.base_url.clone(),
            api_key_env: service.api_key_env.clone(),
            model: model.to_string(),
            max_tokens: service.max_tokens,
            temperature: service.temperature,
            timeout: service.text_timeout(),
        }
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

fn api_key(env: &str) -> LLMResult<String> {
    std::env::var(env).map_err(|_| LLMError::auth(format!("{} is not set", env)))
}

fn build_client() -> LLMResult<Client> {
    Client::builder().build().map_err(|e| LLMError::config(e.to_string()))
}

/// Chat-completions provider
pub struct OpenAICompatProvider {
    client: Client,
    config: OpenAICompatConfig,
}

impl OpenAICompatProvider {
    pub fn new(config: OpenAICompatConfig) -> LLMResult<Self> {
        Ok(Self { client: build_client()?, config })
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatProvider {
    fn name(&self) -> &str {
        &self.config.provider
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> LLMResult<CompletionResponse> {
        let api_key = api_key(&self.config.api_key_env)?;

        let request = ChatCompletionRequest {
            model: options.model.unwrap_or_else(|| self.config.model.clone()),
            messages,
            max_tokens: Some(options.max_tokens.unwrap_or(self.config.max_tokens)),
            temperature: Some(options.temperature.unwrap_or(self.config.temperature)),
        };

        debug!(
            "POST chat/completions model={} messages={}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(endpoint(&self.config.base_url, "chat/completions"))
            .bearer_auth(api_key)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| LLMError::from_transport(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::api(status.as_u16(), error_text));
        }

        response
            .json::<CompletionResponse>()
            .await
            .map_err(|e| LLMError::parse(format!("{} response: {}", self.config.model, e)))
    }
}

/// Image-generations provider
pub struct OpenAIImageProvider {
    client: Client,
    base_url: String,
    api_key_env: String,
    model: String,
    size: String,
    timeout: Duration,
    fetch_timeout: Duration,
}

impl OpenAIImageProvider {
    pub fn new(service: &ServiceConfig) -> LLMResult<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: service.base_url.clone(),
            api_key_env: service.api_key_env.clone(),
            model: service.image_model.clone(),
            size: service.image_size.clone(),
            timeout: service.image_timeout(),
            fetch_timeout: service.fetch_timeout(),
        })
    }

    /// Download one generated image by reference
    async fn fetch(&self, url: &str) -> LLMResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| LLMError::from_transport(e, self.fetch_timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LLMError::api(status.as_u16(), format!("fetching {}", url)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LLMError::from_transport(e, self.fetch_timeout))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageProvider for OpenAIImageProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: ImageRequest) -> LLMResult<Vec<Vec<u8>>> {
        let api_key = api_key(&self.api_key_env)?;

        let body = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            size: self.size.clone(),
            elements_images: request.reference_images.iter().map(|img| STANDARD.encode(img)).collect(),
        };

        debug!(
            "POST images/generations model={} reference_images={}",
            body.model,
            body.elements_images.len()
        );

        let response = self
            .client
            .post(endpoint(&self.base_url, "images/generations"))
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::api(status.as_u16(), error_text));
        }

        let parsed: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| LLMError::parse(format!("image response: {}", e)))?;

        let mut images = Vec::with_capacity(parsed.data.len());
        for item in parsed.data {
            if let Some(url) = item.url {
                match self.fetch(&url).await {
                    Ok(bytes) => images.push(bytes),
                    Err(e) => warn!("Skipping generated image {}: {}", url, e),
                }
            } else if let Some(encoded) = item.b64_json {
                match STANDARD.decode(encoded.as_bytes()) {
                    Ok(bytes) => images.push(bytes),
                    Err(e) => warn!("Skipping undecodable inline image: {}", e),
                }
            }
        }

        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET_KEY: &str = "EVENTCRAFT_TEST_KEY_THAT_IS_NEVER_SET";

    fn service() -> ServiceConfig {
        ServiceConfig { api_key_env: UNSET_KEY.to_string(), ..ServiceConfig::default() }
    }

    #[test]
    fn test_endpoint_joining() {
        assert_eq!(
            endpoint("https://llmapi.lcpu.dev/v1/", "chat/completions"),
            "https://llmapi.lcpu.dev/v1/chat/completions"
        );
        assert_eq!(endpoint("http://localhost:8080/v1", "images/generations"), "http://localhost:8080/v1/images/generations");
    }

    #[test]
    fn test_model_selection() {
        let service = ServiceConfig::default();
        assert_eq!(OpenAICompatConfig::text(&service).model, "deepseek-chat");
        assert_eq!(OpenAICompatConfig::rules(&service).model, "deepseek-reasoner");
        assert_eq!(OpenAICompatConfig::rules(&service).timeout, service.text_timeout());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_auth_error() {
        let provider = OpenAICompatProvider::new(OpenAICompatConfig::text(&service())).unwrap();
        let result = provider
            .complete(vec![Message::user("hi")], CompletionOptions::default())
            .await;
        assert!(matches!(result, Err(LLMError::AuthenticationError { .. })));

        let images = OpenAIImageProvider::new(&service()).unwrap();
        let result = images.generate(ImageRequest::new("prompt")).await;
        assert!(matches!(result, Err(LLMError::AuthenticationError { .. })));
    }
}
