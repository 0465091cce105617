//! Rule-table requirement extraction

use regex::Regex;
use regex_utils::{event_category, follow_up, newline, speech, theme};
use tracing::debug;

use super::{AUDIENCE, Category, PARTNERS, RequirementRecord, SCALE};

/// Characters of input kept when no initial concept is found
const PREVIEW_CHARS: usize = 100;

/// Value used when a field rule does not match
#[derive(Debug, Clone, Copy)]
enum Fallback {
    Fixed(&'static str),
    /// Leading characters of the input followed by `...`
    Preview,
}

/// One text field: pattern, capture group and fallback
#[derive(Debug)]
struct FieldRule {
    pattern: &'static Regex,
    group: usize,
    fallback: Fallback,
}

impl FieldRule {
    fn apply(&self, text: &str) -> String {
        let value = follow_up::capture(self.pattern, text, self.group).unwrap_or_else(|| match self.fallback {
            Fallback::Fixed(value) => value.to_string(),
            Fallback::Preview => format!("{}...", text.chars().take(PREVIEW_CHARS).collect::<String>()),
        });
        newline::strip(&value)
    }
}

/// Extracts a [`RequirementRecord`] from an event description
///
/// Category rules are tried in order and the first match wins, so an input
/// mentioning both a competition and a lecture is a competition.
#[derive(Debug)]
pub struct RequirementExtractor {
    category_rules: Vec<(&'static Regex, Category)>,
    theme: FieldRule,
    schedule: FieldRule,
    purpose: FieldRule,
    initial_concept: FieldRule,
}

impl RequirementExtractor {
    pub fn new() -> Self {
        Self {
            category_rules: Self::category_rules(),
            theme: FieldRule { pattern: &*theme::KEYWORDS, group: 0, fallback: Fallback::Fixed("未知") },
            schedule: FieldRule { pattern: &*follow_up::SCHEDULE, group: 2, fallback: Fallback::Fixed("待定") },
            purpose: FieldRule {
                pattern: &*follow_up::PURPOSE,
                group: 2,
                fallback: Fallback::Fixed("未明确说明"),
            },
            initial_concept: FieldRule { pattern: &*follow_up::IDEA, group: 1, fallback: Fallback::Preview },
        }
    }

    fn category_rules() -> Vec<(&'static Regex, Category)> {
        vec![
            (&*event_category::COMPETITION, Category::Competition),
            (&*event_category::LECTURE, Category::Lecture),
            (&*event_category::GALA, Category::Gala),
            (&*event_category::ACTIVITY, Category::Activity),
        ]
    }

    /// Classify the description, falling back to [`Category::Other`]
    pub fn classify(&self, text: &str) -> Category {
        self.category_rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Other)
    }

    /// Extract every field; never fails
    pub fn extract(&self, text: &str) -> RequirementRecord {
        let record = RequirementRecord {
            category: self.classify(text),
            theme: self.theme.apply(text),
            schedule: self.schedule.apply(text),
            purpose: self.purpose.apply(text),
            initial_concept: self.initial_concept.apply(text),
            needs_speech: speech::requested(text),
            audience: AUDIENCE.to_string(),
            scale: SCALE.to_string(),
            partners: PARTNERS.to_string(),
        };

        debug!(
            "Extracted requirements: category={} theme={} needs_speech={}",
            record.category, record.theme, record.needs_speech
        );
        record
    }
}

impl Default for RequirementExtractor {
    fn default() -> Self {
        Self::new()
    }
}
