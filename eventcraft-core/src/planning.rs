//! Event plan composition
//!
//! Builds a category-specific plan draft (with rules drafted by the rules
//! model), renders it and the requirement record as bullet blocks, and has
//! each block refined once.

use crate::config::Personas;
use crate::demand::{Category, RequirementRecord};
use crate::llm::{LLMProvider, RefineRequest, RuleDrafter, TextRefiner};
use crate::reference::ReferenceLibrary;
use crate::style::StyleGuide;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

pub const REQUIREMENT_TITLE: &str = "活动需求信息汇总";
pub const PLAN_TITLE: &str = "活动规划方案";

const RESOURCES_KEY: &str = "资源需求";
const RESOURCES: &str = "场地、设备、人员支持等";

/// Fixed plan content for one category
struct PlanTemplate {
    rules_key: &'static str,
    rules_request: &'static str,
    rules_fallback: &'static str,
    arrangement_key: &'static str,
    arrangement: &'static str,
    flow: &'static str,
    timing: &'static str,
}

/// `None` for categories without a template
fn template(category: Category) -> Option<PlanTemplate> {
    match category {
        Category::Competition => Some(PlanTemplate {
            rules_key: "赛事规则",
            rules_request: "基于给定数据集和代码，设计调参赛的规则和评分标准。",
            rules_fallback: "参赛者需基于给定数据集和代码进行调参，提交最终模型。",
            arrangement_key: "评分标准",
            arrangement: "根据模型性能指标（准确率、召回率等）综合评分。",
            flow: "报名->初赛->复赛->决赛->颁奖典礼",
            timing: "4月下旬预热，5月中旬总结",
        }),
        Category::Lecture => Some(PlanTemplate {
            rules_key: "讲座流程",
            rules_request: "基于讲座主题和目标听众，设计讲座的流程和安排。",
            rules_fallback: "讲座包含开场介绍、主题演讲、互动问答、总结致辞等环节。",
            arrangement_key: "讲座安排",
            arrangement: "根据讲座主题邀请专家或学者进行演讲，并安排互动问答环节以增强参与感。",
            flow: "开场介绍->主题演讲->互动问答->总结致辞",
            timing: "根据讲师和场地情况，时间待定，建议提前1个月确认",
        }),
        Category::Gala => Some(PlanTemplate {
            rules_key: "晚会流程",
            rules_request: "基于给定主题和活动需求，设计晚会的流程和节目安排。",
            rules_fallback: "晚会节目分为多个环节，包含开场、表演、互动环节、抽奖、闭幕等。",
            arrangement_key: "节目安排",
            arrangement: "根据主题选择合适的表演节目，如歌舞、话剧、小品等，确保内容丰富多样。",
            flow: "开场->节目表演->互动环节->抽奖->闭幕",
            timing: "12月初准备，12月中旬举办",
        }),
        Category::Activity => Some(PlanTemplate {
            rules_key: "活动流程",
            rules_request: "基于活动目标和参与人群，设计活动的具体流程和安排。",
            rules_fallback: "活动流程包含开场、主要环节、互动环节、总结等。",
            arrangement_key: "活动安排",
            arrangement: "根据活动性质选择合适的环节和活动形式，如团体互动、个人挑战、知识分享等。",
            flow: "开场->主要活动->互动环节->总结",
            timing: "活动开始前1个月制定时间表，并根据场地、嘉宾安排调整",
        }),
        Category::Other => None,
    }
}

/// Intermediate plan: ordered key/value entries before refinement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanDraft {
    entries: Vec<(String, String)>,
}

impl PlanDraft {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn render(&self) -> String {
        render_block(PLAN_TITLE, self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Title line, blank line, then one `- key：value` line per entry
pub fn render_block<'a>(title: &str, entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut lines = vec![title.to_string(), String::new()];
    lines.extend(entries.into_iter().map(|(key, value)| format!("- {}：{}", key, value)));
    lines.join("\n")
}

/// Refined plan handed to the copy stage and written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPlan {
    #[serde(rename = "润色后的需求信息")]
    pub requirement_summary: String,
    #[serde(rename = "润色后的活动规划方案")]
    pub plan_summary: String,
}

impl EventPlan {
    /// Compact JSON rendering embedded in promotional copy
    pub fn render(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!("{}\n{}", self.requirement_summary, self.plan_summary))
    }
}

pub struct EventPlanner {
    refiner: TextRefiner,
    drafter: RuleDrafter,
    library: ReferenceLibrary,
    personas: Personas,
}

impl EventPlanner {
    pub fn new(
        text: Arc<dyn LLMProvider>,
        rules: Arc<dyn LLMProvider>,
        library: ReferenceLibrary,
        personas: Personas,
    ) -> Self {
        Self { refiner: TextRefiner::new(text), drafter: RuleDrafter::new(rules), library, personas }
    }

    /// Category plan entries, drafting rules where the category has them
    pub async fn draft(&self, record: &RequirementRecord) -> PlanDraft {
        let mut draft = PlanDraft::default();

        match template(record.category) {
            Some(t) => {
                let rules = self.drafter.draft_or(record.category.label(), t.rules_request, t.rules_fallback).await;
                draft.push(t.rules_key, rules);
                draft.push(t.arrangement_key, t.arrangement);
                draft.push("流程设计", t.flow);
                draft.push("时间安排", t.timing);
            }
            None => draft.push("活动方案", "根据具体需求定制"),
        }

        draft.push(RESOURCES_KEY, RESOURCES);
        draft
    }

    /// Draft the plan and refine both summaries.
    ///
    /// The plan keeps its configured tone whatever the guide's copy tone is.
    pub async fn design(&self, _style: &StyleGuide, record: &RequirementRecord) -> EventPlan {
        info!("Designing {} plan", record.category);

        let draft = self.draft(record).await;
        let fields = record.fields();
        let requirement_block = render_block(REQUIREMENT_TITLE, fields.iter().map(|(k, v)| (*k, v.as_str())));
        let plan_block = draft.render();

        let reference = self.library.reference_text(record.category).await;
        debug!("Plan reference: {} chars", reference.chars().count());

        let requirement_summary = self
            .refiner
            .refine(RefineRequest {
                text: &requirement_block,
                style: &self.personas.plan_tone,
                reference: &reference,
                persona: &self.personas.requirement_summary,
            })
            .await;

        let plan_summary = self
            .refiner
            .refine(RefineRequest {
                text: &plan_block,
                style: &self.personas.plan_tone,
                reference: &reference,
                persona: &self.personas.plan_summary,
            })
            .await;

        EventPlan { requirement_summary, plan_summary }
    }
}
