//! Promotional copy composition

use crate::config::Personas;
use crate::demand::RequirementRecord;
use crate::llm::{LLMProvider, RefineRequest, TextRefiner};
use crate::planning::EventPlan;
use crate::reference::ReferenceLibrary;
use crate::style::StyleGuide;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

const CLOSING: &str = "期待您的积极参与，共同推动大信科的发展！";

/// One promotional text variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CopyKind {
    Article,
    Email,
    Tagline,
    Social,
    Speech,
}

impl CopyKind {
    /// Variants produced for every event
    pub const STANDARD: [CopyKind; 4] = [CopyKind::Article, CopyKind::Email, CopyKind::Tagline, CopyKind::Social];

    pub fn label(&self) -> &'static str {
        match self {
            CopyKind::Article => "微信公众号推送稿",
            CopyKind::Email => "邮件通知版本",
            CopyKind::Tagline => "短文本宣传语",
            CopyKind::Social => "社交媒体分享版本",
            CopyKind::Speech => "讲稿/主持词",
        }
    }
}

impl fmt::Display for CopyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Copy variants in a fixed order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyBundle {
    texts: BTreeMap<CopyKind, String>,
}

impl CopyBundle {
    pub fn insert(&mut self, kind: CopyKind, text: String) {
        self.texts.insert(kind, text);
    }

    pub fn get(&self, kind: CopyKind) -> Option<&str> {
        self.texts.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CopyKind, &str)> {
        self.texts.iter().map(|(kind, text)| (*kind, text.as_str()))
    }
}

/// Unrefined copy assembled from the requirements and the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseCopy {
    pub article: String,
    pub email: String,
    pub tagline: String,
    pub social: String,
}

impl BaseCopy {
    pub fn new(record: &RequirementRecord, plan: &EventPlan) -> Self {
        let title = format!("{}精彩来袭！", record.theme);
        let intro = format!("欢迎参加由北京大学信息科学技术学院举办的{}。", record.category.label());
        let body = format!("本次活动的详细规划如下：{}", plan.render());

        Self {
            article: format!("{title}\n\n{intro}\n\n{body}\n\n{CLOSING}"),
            email: format!("尊敬的师生，您好！\n\n{intro}\n\n{body}\n\n{CLOSING}"),
            tagline: format!("{title}\n\n{intro}\n\n{body}\n\n，欢迎报名参加！"),
            social: format!("【{title}】{intro}{body},详情请关注学院公众号。"),
        }
    }

    /// Base text for a variant; the speech script starts from the article
    pub fn text(&self, kind: CopyKind) -> &str {
        match kind {
            CopyKind::Article | CopyKind::Speech => &self.article,
            CopyKind::Email => &self.email,
            CopyKind::Tagline => &self.tagline,
            CopyKind::Social => &self.social,
        }
    }
}

pub struct Copywriter {
    refiner: TextRefiner,
    library: ReferenceLibrary,
    personas: Personas,
}

impl Copywriter {
    pub fn new(text: Arc<dyn LLMProvider>, library: ReferenceLibrary, personas: Personas) -> Self {
        Self { refiner: TextRefiner::new(text), library, personas }
    }

    fn persona(&self, kind: CopyKind) -> &str {
        match kind {
            CopyKind::Article => &self.personas.wechat_article,
            CopyKind::Email => &self.personas.email_notice,
            CopyKind::Tagline => &self.personas.tagline,
            CopyKind::Social => &self.personas.social_post,
            CopyKind::Speech => &self.personas.speech,
        }
    }

    /// Refine every variant independently; a failed refinement keeps that
    /// variant's base text
    pub async fn compose(&self, style: &StyleGuide, record: &RequirementRecord, plan: &EventPlan) -> CopyBundle {
        let base = BaseCopy::new(record, plan);
        let reference = self.library.reference_text(record.category).await;

        let mut kinds = CopyKind::STANDARD.to_vec();
        if record.needs_speech {
            kinds.push(CopyKind::Speech);
        }
        info!("Composing {} copy variants", kinds.len());

        let mut bundle = CopyBundle::default();
        for kind in kinds {
            let text = self
                .refiner
                .refine(RefineRequest {
                    text: base.text(kind),
                    style: &style.copy.tone,
                    reference: &reference,
                    persona: self.persona(kind),
                })
                .await;
            debug!("{}: {} chars", kind, text.chars().count());
            bundle.insert(kind, text);
        }

        bundle
    }
}
