//! Static style guide shared by the composing stages

use serde::{Deserialize, Serialize};

/// Tone and structure for written copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyStyle {
    pub tone: String,
    pub keywords: Vec<String>,
    pub structure: String,
}

impl Default for CopyStyle {
    fn default() -> Self {
        Self {
            tone: "正式、学术、亲切".to_string(),
            keywords: ["创新", "交流", "技术", "人才"].iter().map(|s| s.to_string()).collect(),
            structure: "引言-主体-结语".to_string(),
        }
    }
}

/// Palette, layout and graphic elements for the main visual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualStyle {
    pub palette: Vec<String>,
    pub layout: String,
    pub font: String,
    pub elements: Vec<String>,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            palette: ["红色", "白色", "黑色"].iter().map(|s| s.to_string()).collect(),
            layout: "简洁、对称".to_string(),
            font: "无衬线体".to_string(),
            elements: ["大信科logo", "表情包人物"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleGuide {
    pub copy: CopyStyle,
    pub visual: VisualStyle,
}

/// Provides the style guide to the pipeline
///
/// The guide is fixed at construction; `style_guide` hands out a copy so no
/// stage can alter what a later stage sees.
#[derive(Debug, Clone, Default)]
pub struct StyleAnalyzer {
    guide: StyleGuide,
}

impl StyleAnalyzer {
    pub fn new(guide: StyleGuide) -> Self {
        Self { guide }
    }

    pub fn style_guide(&self) -> StyleGuide {
        self.guide.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_guide() {
        let guide = StyleAnalyzer::default().style_guide();
        assert_eq!(guide.copy.tone, "正式、学术、亲切");
        assert_eq!(guide.copy.keywords, vec!["创新", "交流", "技术", "人才"]);
        assert_eq!(guide.visual.elements.join(","), "大信科logo,表情包人物");
    }

    #[test]
    fn test_guide_is_stable_across_calls() {
        let analyzer = StyleAnalyzer::default();
        let mut first = analyzer.style_guide();
        first.copy.tone.clear();
        assert_eq!(analyzer.style_guide(), StyleGuide::default());
    }
}
