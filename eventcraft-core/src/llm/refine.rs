//! Refinement and rule drafting on top of a text provider
//!
//! The `try_*` methods surface the provider's error; the plain methods apply
//! the fallback each call site documents and log the failure.

use super::errors::{LLMError, LLMResult};
use super::prompts::PromptTemplates;
use super::traits::LLMProvider;
use super::types::CompletionOptions;
use std::sync::Arc;
use tracing::{debug, warn};

/// One refine call: base text plus the tone, reference and persona to apply
#[derive(Debug, Clone, Copy)]
pub struct RefineRequest<'a> {
    pub text: &'a str,
    pub style: &'a str,
    pub reference: &'a str,
    pub persona: &'a str,
}

/// Polishes text through the generative-text capability
#[derive(Clone)]
pub struct TextRefiner {
    provider: Arc<dyn LLMProvider>,
}

impl TextRefiner {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    pub async fn try_refine(&self, request: RefineRequest<'_>) -> LLMResult<String> {
        let messages =
            PromptTemplates::refine_messages(request.text, request.style, request.reference, request.persona);
        debug!(
            "Refining {} chars with {}/{} (reference {} chars)",
            request.text.chars().count(),
            self.provider.name(),
            self.provider.model(),
            request.reference.chars().count()
        );

        let response = self.provider.complete(messages, CompletionOptions::default()).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| LLMError::empty(self.provider.model()))
    }

    /// Refined text, or the unrefined input if the call fails
    pub async fn refine(&self, request: RefineRequest<'_>) -> String {
        match self.try_refine(request).await {
            Ok(refined) => refined,
            Err(e) => {
                warn!("Refinement failed, keeping base text: {}", e);
                request.text.to_string()
            }
        }
    }
}

/// Drafts category rules through the generative-text capability
#[derive(Clone)]
pub struct RuleDrafter {
    provider: Arc<dyn LLMProvider>,
}

impl RuleDrafter {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    pub async fn try_draft(&self, category_label: &str, requirements: &str) -> LLMResult<String> {
        let messages = PromptTemplates::rules_messages(category_label, requirements);
        let response = self.provider.complete(messages, CompletionOptions::default()).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| LLMError::empty(self.provider.model()))
    }

    /// Drafted rules, or `fallback` if the call fails or returns nothing
    pub async fn draft_or(&self, category_label: &str, requirements: &str, fallback: &str) -> String {
        match self.try_draft(category_label, requirements).await {
            Ok(rules) => rules,
            Err(e) => {
                warn!("Rule drafting for {} failed, using fallback: {}", category_label, e);
                fallback.to_string()
            }
        }
    }
}
