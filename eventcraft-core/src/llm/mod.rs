//! Generative service integration
//!
//! Providers for the text and image capabilities, the prompt templates the
//! pipeline sends them, and the refine/draft helpers that turn provider
//! failures into documented fallbacks.

pub mod errors;
pub mod mock;
pub mod openai_compat;
pub mod prompts;
pub mod refine;
pub mod traits;
pub mod types;

pub use errors::{LLMError, LLMResult};
pub use openai_compat::{OpenAICompatConfig, OpenAICompatProvider, OpenAIImageProvider};
pub use refine::{RefineRequest, RuleDrafter, TextRefiner};
pub use traits::{ImageProvider, LLMProvider};
pub use types::{ImageRequest, Message};
