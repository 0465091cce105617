//! Main visual composition
//!
//! Generates a base canvas through the image capability, conditioned on the
//! reference images, then pins the school emblem and logo to its corners.

pub mod overlay;
pub mod prompt;

pub use overlay::{Anchor, apply_overlay, scaled_dimensions};
pub use prompt::visual_prompt;

use crate::config::OverlayConfig;
use crate::demand::{Category, RequirementRecord};
use crate::error::Result;
use crate::llm::{ImageProvider, ImageRequest};
use crate::reference::ReferenceImages;
use crate::reference::images::encode_png;
use crate::style::StyleGuide;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct VisualDesigner {
    provider: Arc<dyn ImageProvider>,
    images: ReferenceImages,
    overlay: OverlayConfig,
}

impl VisualDesigner {
    pub fn new(provider: Arc<dyn ImageProvider>, images: ReferenceImages, overlay: OverlayConfig) -> Self {
        Self { provider, images, overlay }
    }

    /// Overlay files and their corners, in compositing order
    pub fn overlays_for(&self, category: Category) -> Vec<(&str, Anchor)> {
        let emblem = match category {
            Category::Gala => &self.overlay.gala_emblem,
            Category::Competition | Category::Lecture | Category::Activity | Category::Other => {
                &self.overlay.emblem
            }
        };
        vec![(emblem.as_str(), Anchor::BottomRight), (self.overlay.logo.as_str(), Anchor::TopLeft)]
    }

    /// PNG bytes of the main visual, or `None` when nothing was generated
    pub async fn design(&self, style: &StyleGuide, record: &RequirementRecord) -> Option<Vec<u8>> {
        let prompt = visual_prompt(style, record);
        let references = self.images.load(record.category).await;
        info!(
            "Generating {} main visual via {} with {} reference images",
            record.category,
            self.provider.name(),
            references.len()
        );

        let request = ImageRequest::new(prompt).with_reference_images(references);
        let base = match self.provider.generate(request).await {
            Ok(images) => images.into_iter().next(),
            Err(e) => {
                warn!("Image generation failed: {}", e);
                return None;
            }
        };

        let Some(base) = base else {
            warn!("Image generation returned no images");
            return None;
        };

        match self.decorate(&base, record.category).await {
            Ok(decorated) => Some(decorated),
            Err(e) => {
                warn!("Overlay failed, keeping generated image: {}", e);
                Some(base)
            }
        }
    }

    /// Composite the emblem and logo onto `base`; individual overlays that
    /// cannot be loaded are skipped
    pub async fn decorate(&self, base: &[u8], category: Category) -> Result<Vec<u8>> {
        let mut canvas = image::load_from_memory(base)?.to_rgba8();

        for (file, anchor) in self.overlays_for(category) {
            let path = self.images.required_dir().join(file);
            let overlay = match load_overlay(&path).await {
                Ok(overlay) => overlay,
                Err(e) => {
                    warn!("Skipping overlay {:?}: {}", path, e);
                    continue;
                }
            };

            if let Err(e) = apply_overlay(&mut canvas, &overlay, self.overlay.scale, self.overlay.margin, anchor) {
                warn!("Skipping overlay {:?}: {}", path, e);
                continue;
            }
            debug!("Applied overlay {:?} at {:?}", path, anchor);
        }

        encode_png(DynamicImage::ImageRgba8(canvas))
    }
}

async fn load_overlay(path: &Path) -> Result<DynamicImage> {
    let bytes = tokio::fs::read(path).await?;
    Ok(image::load_from_memory(&bytes)?)
}
