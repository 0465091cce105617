//! Regex utilities for eventcraft
//! Extracted to a separate crate for compilation optimization

use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword groups used to classify an event description.
///
/// Groups are listed in priority order; the first group that matches wins.
pub mod event_category {
    use super::*;

    pub static COMPETITION: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"比赛|竞赛|挑战赛|马拉松|杯").expect("Invalid regex pattern"));

    pub static LECTURE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"讲座|论坛|辅导|茶话会|学术").expect("Invalid regex pattern"));

    pub static GALA: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"新年|毕业|迎新").expect("Invalid regex pattern"));

    pub static ACTIVITY: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"活动|联谊|节").expect("Invalid regex pattern"));
}

/// Theme keywords
pub mod theme {
    use super::*;

    pub static KEYWORDS: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"大模型|AI|人工智能|机器学习").expect("Invalid regex pattern")
    });
}

/// "Marker sentence, then target sentence" patterns.
///
/// Each pattern matches a sentence containing a marker word, its closing
/// `。`, and captures the whole sentence that follows it.
pub mod follow_up {
    use super::*;

    pub static SCHEDULE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(安排|时间)[^\n。]*。([^\n。]+)。?").expect("Invalid regex pattern")
    });

    pub static PURPOSE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(目标|目的|旨在)[^\n。]*。([^\n。]+)。?").expect("Invalid regex pattern")
    });

    pub static IDEA: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"想法[^\n。]*。([^\n。]+)。?").expect("Invalid regex pattern"));

    /// Capture `group` of the first match of `pattern`
    pub fn capture(pattern: &Regex, text: &str, group: usize) -> Option<String> {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(group))
            .map(|m| m.as_str().to_string())
    }
}

/// Markers that request a speech or emcee script
pub mod speech {
    use super::*;

    pub static MARKERS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"讲稿|主持词").expect("Invalid regex pattern"));

    pub fn requested(text: &str) -> bool {
        MARKERS.is_match(text)
    }
}

/// Line-break cleanup for extracted fields
pub mod newline {
    /// Remove escaped (`\` + `n`) and literal line breaks
    pub fn strip(text: &str) -> String {
        text.replace("\\n", "").replace('\n', "")
    }

    /// Turn escaped `\n` sequences into real line breaks
    pub fn unescape(text: &str) -> String {
        text.replace("\\n", "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keywords() {
        assert!(event_category::COMPETITION.is_match("AI调参挑战赛"));
        assert!(event_category::LECTURE.is_match("学术讲座"));
        assert!(event_category::GALA.is_match("迎新晚会"));
        assert!(event_category::ACTIVITY.is_match("社团联谊"));
        assert!(!event_category::GALA.is_match("普通聚会"));
    }

    #[test]
    fn test_theme_extraction() {
        assert_eq!(
            follow_up::capture(&theme::KEYWORDS, "关于机器学习和大模型的分享", 0),
            Some("机器学习".to_string())
        );
        assert!(!theme::KEYWORDS.is_match("户外徒步"));
    }

    #[test]
    fn test_follow_up_capture() {
        let text = "时间安排：下周三。具体是上午九点。";
        assert_eq!(
            follow_up::capture(&follow_up::SCHEDULE, text, 2),
            Some("具体是上午九点".to_string())
        );

        assert_eq!(follow_up::capture(&follow_up::SCHEDULE, "安排：下周三。", 2), None);

        let text = "我有个想法。办一场黑客松";
        assert_eq!(
            follow_up::capture(&follow_up::IDEA, text, 1),
            Some("办一场黑客松".to_string())
        );
    }

    #[test]
    fn test_speech_markers() {
        assert!(speech::requested("需要准备主持词"));
        assert!(!speech::requested("不需要别的"));
    }

    #[test]
    fn test_newline_helpers() {
        assert_eq!(newline::strip("a\\nb\nc"), "abc");
        assert_eq!(newline::unescape("a\\nb"), "a\nb");
    }
}
