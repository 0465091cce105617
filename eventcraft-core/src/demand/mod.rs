//! Requirement extraction from free-text event descriptions

pub mod extractor;

pub use extractor::RequirementExtractor;

use serde::{Deserialize, Serialize};
use std::fmt;

pub const AUDIENCE: &str = "北京大学信息科学技术学院学生及相关人员";
pub const SCALE: &str = "人数（50-200人）";
pub const PARTNERS: &str = "XX公司、XX企业";

/// Event category driving template and prompt selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "比赛类")]
    Competition,
    #[serde(rename = "讲座类")]
    Lecture,
    #[serde(rename = "晚会类")]
    Gala,
    #[serde(rename = "活动类")]
    Activity,
    #[serde(rename = "其他")]
    Other,
}

impl Category {
    #[cfg(test)]
    pub const ALL: [Category; 5] =
        [Category::Competition, Category::Lecture, Category::Gala, Category::Activity, Category::Other];

    /// Display label, also the reference subdirectory name
    pub fn label(&self) -> &'static str {
        match self {
            Category::Competition => "比赛类",
            Category::Lecture => "讲座类",
            Category::Gala => "晚会类",
            Category::Activity => "活动类",
            Category::Other => "其他",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured requirements of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRecord {
    #[serde(rename = "活动类型")]
    pub category: Category,
    #[serde(rename = "主题方向")]
    pub theme: String,
    #[serde(rename = "时间安排")]
    pub schedule: String,
    #[serde(rename = "活动主旨")]
    pub purpose: String,
    #[serde(rename = "初步构想")]
    pub initial_concept: String,
    #[serde(rename = "需要讲稿")]
    pub needs_speech: bool,
    #[serde(rename = "目标受众")]
    pub audience: String,
    #[serde(rename = "活动规模")]
    pub scale: String,
    #[serde(rename = "可能合作方")]
    pub partners: String,
}

impl RequirementRecord {
    /// Labelled fields in serialization order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("活动类型", self.category.label().to_string()),
            ("主题方向", self.theme.clone()),
            ("时间安排", self.schedule.clone()),
            ("活动主旨", self.purpose.clone()),
            ("初步构想", self.initial_concept.clone()),
            ("需要讲稿", if self.needs_speech { "是" } else { "否" }.to_string()),
            ("目标受众", self.audience.clone()),
            ("活动规模", self.scale.clone()),
            ("可能合作方", self.partners.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_label() {
        for category in Category::ALL {
            assert_eq!(serde_json::to_string(&category).unwrap(), format!("\"{}\"", category.label()));
        }
        assert!(serde_json::from_str::<Category>("\"音乐会\"").is_err());
    }

    #[test]
    fn test_record_serializes_with_labels_in_order() {
        let record = RequirementExtractor::new().extract("迎新晚会");
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.starts_with(r#"{"活动类型":"晚会类","主题方向":"未知""#));
        assert!(json.contains(r#""需要讲稿":false"#));
        assert!(json.ends_with(r#""可能合作方":"XX公司、XX企业"}"#));

        let back: RequirementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_fields_match_serialized_keys() {
        let record = RequirementExtractor::new().extract("需要主持词");
        let value = serde_json::to_value(&record).unwrap();
        let fields = record.fields();

        assert_eq!(fields.len(), value.as_object().unwrap().len());
        assert!(fields.iter().all(|(key, _)| value.get(*key).is_some()));
        assert!(fields.contains(&("需要讲稿", "是".to_string())));
    }
}
