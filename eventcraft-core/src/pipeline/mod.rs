//! Event pipeline coordination
//!
//! Runs the five stages strictly in order: requirement extraction, style
//! guide, plan, main visual and copy. No stage failure aborts a later stage;
//! each stage degrades to its documented fallback instead.

use crate::config::StudioConfig;
use crate::copywriting::{CopyBundle, Copywriter};
use crate::demand::{RequirementExtractor, RequirementRecord};
use crate::llm::{
    ImageProvider, LLMProvider, LLMResult, OpenAICompatConfig, OpenAICompatProvider, OpenAIImageProvider,
};
use crate::planning::{EventPlan, EventPlanner};
use crate::reference::{ReferenceImages, ReferenceLibrary};
use crate::style::StyleAnalyzer;
use crate::visual::VisualDesigner;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub requirement: RequirementRecord,
    pub plan: EventPlan,
    /// PNG bytes of the main visual; `None` when generation failed
    pub visual: Option<Vec<u8>>,
    pub copy: CopyBundle,
}

pub struct EventCoordinator {
    extractor: RequirementExtractor,
    style: StyleAnalyzer,
    planner: EventPlanner,
    designer: VisualDesigner,
    copywriter: Copywriter,
}

impl EventCoordinator {
    pub fn new(
        config: &StudioConfig,
        text: Arc<dyn LLMProvider>,
        rules: Arc<dyn LLMProvider>,
        images: Arc<dyn ImageProvider>,
    ) -> Self {
        let library = ReferenceLibrary::new(&config.paths.reference_docs);

        Self {
            extractor: RequirementExtractor::new(),
            style: StyleAnalyzer::new(config.style.clone()),
            planner: EventPlanner::new(text.clone(), rules, library.clone(), config.personas.clone()),
            designer: VisualDesigner::new(images, ReferenceImages::new(&config.paths), config.overlay.clone()),
            copywriter: Copywriter::new(text, library, config.personas.clone()),
        }
    }

    /// Coordinator backed by the configured OpenAI-compatible service
    pub fn from_config(config: &StudioConfig) -> LLMResult<Self> {
        let text = OpenAICompatProvider::new(OpenAICompatConfig::text(&config.service))?;
        let rules = OpenAICompatProvider::new(OpenAICompatConfig::rules(&config.service))?;
        let images = OpenAIImageProvider::new(&config.service)?;

        Ok(Self::new(config, Arc::new(text), Arc::new(rules), Arc::new(images)))
    }

    pub async fn run(&self, input: &str) -> PipelineOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", %run_id);
        self.run_stages(run_id, input).instrument(span).await
    }

    async fn run_stages(&self, run_id: Uuid, input: &str) -> PipelineOutcome {
        info!("Stage 1/5: extracting requirements");
        let requirement = self.extractor.extract(input);

        info!("Stage 2/5: loading style guide");
        let style = self.style.style_guide();

        info!("Stage 3/5: designing event plan");
        let plan = self.planner.design(&style, &requirement).await;

        info!("Stage 4/5: generating main visual");
        let visual = self.designer.design(&style, &requirement).await;

        info!("Stage 5/5: composing promotional copy");
        let copy = self.copywriter.compose(&style, &requirement, &plan).await;

        info!(
            "Pipeline finished: category={} visual={} copy_variants={}",
            requirement.category,
            visual.is_some(),
            copy.len()
        );

        PipelineOutcome { run_id, generated_at: Utc::now(), requirement, plan, visual, copy }
    }
}

#[cfg(test)]
mod tests;
