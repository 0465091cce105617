//! Decorative overlay placement and compositing

use crate::error::{Result, StudioError};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// Corner of the canvas an overlay is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// Top-left pixel of an `overlay`-sized image placed `margin` pixels in
    /// from this corner of `canvas`. Negative when the overlay does not fit.
    pub fn position(&self, canvas: (u32, u32), overlay: (u32, u32), margin: u32) -> (i64, i64) {
        let (cw, ch) = (i64::from(canvas.0), i64::from(canvas.1));
        let (ow, oh) = (i64::from(overlay.0), i64::from(overlay.1));
        let m = i64::from(margin);

        match self {
            Anchor::TopLeft => (m, m),
            Anchor::TopRight => (cw - ow - m, m),
            Anchor::BottomLeft => (m, ch - oh - m),
            Anchor::BottomRight => (cw - ow - m, ch - oh - m),
        }
    }
}

/// Overlay size for a canvas `canvas_width` wide: `scale` of the canvas width,
/// height keeping the source aspect ratio (both rounded down)
pub fn scaled_dimensions(canvas_width: u32, source: (u32, u32), scale: f64) -> Result<(u32, u32)> {
    let (sw, sh) = source;
    if sw == 0 || sh == 0 {
        return Err(StudioError::Image { message: "overlay has no pixels".to_string() });
    }

    let width = (f64::from(canvas_width) * scale).floor() as u32;
    let height = (u64::from(sh) * u64::from(width) / u64::from(sw)) as u32;
    if width == 0 || height == 0 {
        return Err(StudioError::Image {
            message: format!("overlay {}x{} scales to nothing on a {}px canvas", sw, sh, canvas_width),
        });
    }

    Ok((width, height))
}

/// Resize `overlay` and alpha-blend it onto `canvas` at `anchor`
pub fn apply_overlay(
    canvas: &mut RgbaImage,
    overlay: &DynamicImage,
    scale: f64,
    margin: u32,
    anchor: Anchor,
) -> Result<()> {
    let (width, height) = scaled_dimensions(canvas.width(), (overlay.width(), overlay.height()), scale)?;
    let resized = imageops::resize(&overlay.to_rgba8(), width, height, FilterType::Lanczos3);
    let (x, y) = anchor.position(canvas.dimensions(), (width, height), margin);

    imageops::overlay(canvas, &resized, x, y);
    Ok(())
}
