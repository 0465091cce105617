//! Prompt templates for the text capability

use super::types::Message;

/// System prompt for every refine call
pub const REFINE_SYSTEM: &str = "你是一个专业的文案润色助手。";

/// System prompt for rule drafting
pub const RULES_SYSTEM: &str = "你是一个专业的活动规则设计助手。";

/// Prompt templates for refinement and rule drafting
pub struct PromptTemplates;

impl PromptTemplates {
    /// User prompt asking to polish `text` after the style of `reference`.
    ///
    /// The persona instruction, when present, goes on its own first line.
    pub fn refine_prompt(text: &str, style: &str, reference: &str, persona: &str) -> String {
        let common = format!(
            "请模仿以下文本风格进行润色，请保证格式清晰明了，风格描述：{}\n参考文本风格内容：{}\n需要润色的文本：{}",
            style, reference, text
        );
        if persona.is_empty() { common } else { format!("{}\n{}", persona, common) }
    }

    pub fn refine_messages(text: &str, style: &str, reference: &str, persona: &str) -> Vec<Message> {
        vec![
            Message::system(REFINE_SYSTEM),
            Message::user(Self::refine_prompt(text, style, reference, persona)),
        ]
    }

    pub fn rules_prompt(category_label: &str, requirements: &str) -> String {
        format!("请为活动类型'{}'设计规则，要求如下：{}", category_label, requirements)
    }

    pub fn rules_messages(category_label: &str, requirements: &str) -> Vec<Message> {
        vec![Message::system(RULES_SYSTEM), Message::user(Self::rules_prompt(category_label, requirements))]
    }
}
