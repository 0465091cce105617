use super::*;
use crate::copywriting::CopyKind;
use crate::demand::Category;
use crate::llm::mock::{MockImageProvider, MockLLMProvider, REFINED_PREFIX};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 255])))
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn config(root: &Path) -> StudioConfig {
    let mut config = StudioConfig::default();
    config.paths.reference_docs = root.join("docs");
    config.paths.reference_images = root.join("images");

    let required = config.paths.required_elements_dir();
    std::fs::create_dir_all(&required).unwrap();
    std::fs::write(required.join("logo.png"), png(8, 8)).unwrap();

    let lectures = config.paths.reference_docs.join("讲座类");
    std::fs::create_dir_all(&lectures).unwrap();
    std::fs::write(lectures.join("sample.txt"), "往期讲座推送").unwrap();
    config
}

struct Harness {
    text: MockLLMProvider,
    rules: MockLLMProvider,
    images: MockImageProvider,
}

impl Harness {
    fn coordinator(&self, config: &StudioConfig) -> EventCoordinator {
        EventCoordinator::new(
            config,
            Arc::new(self.text.clone()),
            Arc::new(self.rules.clone()),
            Arc::new(self.images.clone()),
        )
    }
}

#[tokio::test]
async fn test_full_run() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path());
    let harness = Harness {
        text: MockLLMProvider::new(),
        rules: MockLLMProvider::with_response("讲座流程草案"),
        images: MockImageProvider::returning(vec![png(64, 64)]),
    };

    let outcome = harness
        .coordinator(&config)
        .run("举办一场大模型学术讲座。时间安排如下。下周五下午。请准备主持词。")
        .await;

    assert_eq!(outcome.requirement.category, Category::Lecture);
    assert_eq!(outcome.requirement.schedule, "下周五下午");
    assert!(outcome.plan.plan_summary.starts_with(REFINED_PREFIX));
    assert!(outcome.visual.is_some());
    assert_eq!(outcome.copy.len(), 5);
    assert!(outcome.copy.get(CopyKind::Speech).is_some());

    // 2 plan refinements + 5 copy refinements, one rules draft
    assert_eq!(harness.text.call_count(), 7);
    assert_eq!(harness.rules.call_count(), 1);
    assert!(harness.text.user_messages().iter().all(|p| p.contains("往期讲座推送")));
}

#[tokio::test]
async fn test_failed_services_do_not_abort_later_stages() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path());
    let harness = Harness {
        text: MockLLMProvider::failing(),
        rules: MockLLMProvider::failing(),
        images: MockImageProvider::failing(),
    };

    let outcome = harness.coordinator(&config).run("周末户外徒步").await;

    assert_eq!(outcome.requirement.category, Category::Other);
    assert!(outcome.visual.is_none());
    assert!(outcome.plan.plan_summary.starts_with("活动规划方案\n\n- 活动方案：根据具体需求定制"));
    assert_eq!(outcome.copy.len(), 4);
    assert!(outcome.copy.get(CopyKind::Article).unwrap().starts_with("未知精彩来袭！"));
    assert_eq!(harness.rules.call_count(), 0);
}

#[test]
fn test_from_config_builds_without_credentials() {
    let mut config = StudioConfig::default();
    config.service.api_key_env = "EVENTCRAFT_TEST_KEY_THAT_IS_NEVER_SET".to_string();
    assert!(EventCoordinator::from_config(&config).is_ok());
}
