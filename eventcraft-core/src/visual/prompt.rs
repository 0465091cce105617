//! Main visual prompt

use crate::demand::{Category, RequirementRecord};
use crate::style::StyleGuide;

const LAYOUT_INSTRUCTION: &str =
    "请将生成的元素居中摆放，要有北京大学特色，兼具计算机科学的现代科技感，又有中国古典文化韵味";

/// Scene elements requested for a category
pub fn scene_elements(category: Category, guide: &StyleGuide) -> String {
    match category {
        Category::Gala => "彩灯，舞台，烟花，欢庆气氛".to_string(),
        Category::Competition => "奖杯，赛道，计算机，代码".to_string(),
        Category::Lecture => "讲台，计算机，听众，学术".to_string(),
        Category::Activity => "气球，公园，书籍, AI".to_string(),
        Category::Other => guide.visual.elements.join(","),
    }
}

pub fn visual_prompt(guide: &StyleGuide, record: &RequirementRecord) -> String {
    let label = record.category.label();
    let theme = &record.theme;
    let colors = guide.visual.palette.join(",");
    let elements = scene_elements(record.category, guide);

    format!(
        "设计一张符合北京大学信息科学技术学院风格的{label}主视觉，主题为{theme}，配色方案选择红黄色调或者蓝白色调{colors}，\
         包含元素有{elements}，北京大学灰色的九层高中式风格博雅塔作为背景，风格简洁高级有趣，\
         如果你要在图片中包含字符，只能是{theme}或者‘PKU’或者‘EECS’。{LAYOUT_INSTRUCTION}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::RequirementExtractor;

    #[test]
    fn test_prompt_for_competition() {
        let record = RequirementExtractor::new().extract("人工智能挑战赛");
        let prompt = visual_prompt(&StyleGuide::default(), &record);

        assert!(prompt.starts_with("设计一张符合北京大学信息科学技术学院风格的比赛类主视觉，主题为人工智能，"));
        assert!(prompt.contains("蓝白色调红色,白色,黑色，包含元素有奖杯，赛道，计算机，代码，"));
        assert!(prompt.contains("只能是人工智能或者‘PKU’或者‘EECS’。请将生成的元素居中摆放"));
    }

    #[test]
    fn test_other_category_uses_guide_elements() {
        assert_eq!(scene_elements(Category::Other, &StyleGuide::default()), "大信科logo,表情包人物");
    }
}
