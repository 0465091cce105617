//! Configuration for the event pipeline
//!
//! All constants the stages depend on (service endpoints, models, timeouts,
//! reference paths, overlay assets, persona prompts and the style guide) are
//! collected here and handed to each component at construction.

use crate::error::{Result, StudioError};
use crate::style::StyleGuide;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Generative service settings
    pub service: ServiceConfig,

    /// Reference asset locations
    pub paths: PathsConfig,

    /// Decorative overlay settings
    pub overlay: OverlayConfig,

    /// Persona prompts used by the refine calls
    pub personas: Personas,

    /// Static style guide
    pub style: StyleGuide,
}

impl StudioConfig {
    /// Load from a TOML file, or fall back to defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| StudioError::Config {
                    message: format!("failed to read {}: {}", path.display(), e),
                })?;
                Self::from_toml(&raw)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse from TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| StudioError::Config { message: e.to_string() })
    }
}

/// OpenAI-compatible service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    pub text_model: String,
    pub rules_model: String,
    pub image_model: String,
    pub image_size: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub text_timeout_secs: u64,
    pub image_timeout_secs: u64,
    /// Timeout for downloading each generated image by URL
    pub fetch_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn text_timeout(&self) -> Duration {
        Duration::from_secs(self.text_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://llmapi.lcpu.dev/v1".to_string(),
            api_key_env: "EVENTCRAFT_API_KEY".to_string(),
            text_model: "deepseek-chat".to_string(),
            rules_model: "deepseek-reasoner".to_string(),
            image_model: "flux-dev".to_string(),
            image_size: "1024x1024".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            text_timeout_secs: 120,
            image_timeout_secs: 300,
            fetch_timeout_secs: 30,
        }
    }
}

/// Reference asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the per-category reference documents
    pub reference_docs: PathBuf,
    /// Root of the reference images
    pub reference_images: PathBuf,
    /// Subdirectory of `reference_images` that is always loaded
    pub required_elements: String,
}

impl PathsConfig {
    pub fn required_elements_dir(&self) -> PathBuf {
        self.reference_images.join(&self.required_elements)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            reference_docs: PathBuf::from("./数据集-推送"),
            reference_images: PathBuf::from("./数据集-图片"),
            required_elements: "必要元素".to_string(),
        }
    }
}

/// Decorative overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Overlay width as a fraction of the canvas width
    pub scale: f64,
    /// Distance in pixels from the anchored edges
    pub margin: u32,
    pub logo: String,
    pub emblem: String,
    /// Emblem used for gala events instead of `emblem`
    pub gala_emblem: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            scale: 0.3,
            margin: 10,
            logo: "logo.png".to_string(),
            emblem: "lion.png".to_string(),
            gala_emblem: "ball.png".to_string(),
        }
    }
}

/// Persona prompts for every refined artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Personas {
    /// Tone passed to the plan refinements
    pub plan_tone: String,
    pub requirement_summary: String,
    pub plan_summary: String,
    pub wechat_article: String,
    pub email_notice: String,
    pub tagline: String,
    pub social_post: String,
    pub speech: String,
}

impl Default for Personas {
    fn default() -> Self {
        Self {
            plan_tone: "正式".to_string(),
            requirement_summary: "你需要根据我提供的基本信息，写一个活动需求信息汇总。请在第一行用标题写出‘活动需求信息汇总’，正文部分按照信息收集的常见格式,按照我提供的信息分点分段列出信息，请确保语言顺畅，格式清晰易懂，注意文本里面分段之间要换行输出。".to_string(),
            plan_summary: "你需要根据我提供的基本信息，写一个活动规划方案。请在第一行用标题写出‘活动规划方案’，正文部分按照活动规划的常见格式，按照我提供的信息分点分段列出信息，请确保语言顺畅，格式清晰易懂，注意文本里面分段之间要换行输出。".to_string(),
            wechat_article: "请根据我提供的base_content，写一篇微信公众号推送稿，风格请模仿北京大学信息科学技术学院大信科微信公众号的写作风格，亲切有趣可添加表情emoji".to_string(),
            email_notice: "请根据我提供的base_content，写一篇邮件通知文本，风格参考常见高校邮件通知模板，正式严谨。".to_string(),
            tagline: "请根据我提供的base_content，写一篇短文本宣传语，能准确提炼活动内容和特色，宣传语概括性好，且语言具有感染力。".to_string(),
            social_post: "请根据我提供的base_content，写一篇社交媒体分享文本，风格请模仿北京大学信息科学技术学院官网的推文，语言亲切的同时，体现北京大学的文化底蕴。".to_string(),
            speech: "请根据我提供的base_content，写一篇活动讲稿或主持词，语言正式且富有感染力。".to_string(),
        }
    }
}

/// Example configuration TOML
pub const EXAMPLE_CONFIG: &str = r#"
# eventcraft configuration

[service]
base_url = "https://llmapi.lcpu.dev/v1"
api_key_env = "EVENTCRAFT_API_KEY"
text_model = "deepseek-chat"
rules_model = "deepseek-reasoner"
image_model = "flux-dev"
image_size = "1024x1024"
text_timeout_secs = 120
image_timeout_secs = 300
fetch_timeout_secs = 30

[paths]
reference_docs = "./数据集-推送"
reference_images = "./数据集-图片"
required_elements = "必要元素"

[overlay]
scale = 0.3
margin = 10
logo = "logo.png"
emblem = "lion.png"
gala_emblem = "ball.png"

[personas]
plan_tone = "正式"

[style.copy]
tone = "正式、学术、亲切"
keywords = ["创新", "交流", "技术", "人才"]
structure = "引言-主体-结语"
"#;
