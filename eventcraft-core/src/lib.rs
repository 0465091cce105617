//! Core functionality for eventcraft
//!
//! This crate turns a free-text event description into a requirement
//! summary, an event plan, a main visual and a set of promotional copy,
//! delegating generation to OpenAI-compatible text and image services.

pub mod config;
pub mod copywriting;
pub mod demand;
pub mod error;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod planning;
pub mod reference;
pub mod style;
pub mod visual;

pub use config::StudioConfig;
pub use copywriting::{CopyBundle, CopyKind};
pub use demand::{Category, RequirementRecord};
pub use error::{Result, StudioError};
pub use output::ArtifactWriter;
pub use pipeline::{EventCoordinator, PipelineOutcome};
pub use planning::EventPlan;
pub use style::StyleGuide;
