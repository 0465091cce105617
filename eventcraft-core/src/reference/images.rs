//! Reference image loading

use super::files_in;
use crate::config::PathsConfig;
use crate::demand::Category;
use crate::error::Result;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decode any supported format and re-encode as an RGBA PNG
pub fn normalize_to_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    encode_png(DynamicImage::ImageRgba8(rgba))
}

pub(crate) fn encode_png(image: DynamicImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    image.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}

/// Every decodable image in `dir` as RGBA PNG bytes, in file-name order
pub async fn load_folder(dir: &Path) -> Vec<Vec<u8>> {
    let mut images = Vec::new();

    for path in files_in(dir) {
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read image {:?}: {}", path, e);
                continue;
            }
        };

        match normalize_to_png(&bytes) {
            Ok(png) => images.push(png),
            Err(e) => warn!("Failed to load image {:?}: {}", path, e),
        }
    }

    debug!("Loaded {} reference images from {:?}", images.len(), dir);
    images
}

/// Required-element and per-category reference images
#[derive(Debug, Clone)]
pub struct ReferenceImages {
    root: PathBuf,
    required: PathBuf,
}

impl ReferenceImages {
    pub fn new(paths: &PathsConfig) -> Self {
        Self { root: paths.reference_images.clone(), required: paths.required_elements_dir() }
    }

    pub fn required_dir(&self) -> &Path {
        &self.required
    }

    /// Required elements first, then the category's own images
    pub async fn load(&self, category: Category) -> Vec<Vec<u8>> {
        let mut images = load_folder(&self.required).await;
        images.extend(load_folder(&self.root.join(category.label())).await);
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageReader, Rgb, RgbImage};
    use tempfile::TempDir;

    fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Bmp)
            .unwrap();
        out
    }

    #[test]
    fn test_normalize_round_trip() {
        let png = normalize_to_png(&bmp_bytes(7, 5)).unwrap();

        let format = ImageReader::new(Cursor::new(&png)).with_guessed_format().unwrap().format();
        assert_eq!(format, Some(ImageFormat::Png));

        let reloaded = image::load_from_memory(&png).unwrap();
        assert_eq!(reloaded.dimensions(), (7, 5));
        assert!(reloaded.color().has_alpha());
        assert_eq!(reloaded.to_rgba8().get_pixel(3, 2).0, [200, 30, 30, 255]);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_to_png(b"not an image").is_err());
    }

    #[tokio::test]
    async fn test_load_required_then_category() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PathsConfig {
            reference_images: temp_dir.path().to_path_buf(),
            ..PathsConfig::default()
        };

        let required = paths.required_elements_dir();
        std::fs::create_dir_all(&required).unwrap();
        std::fs::write(required.join("logo.bmp"), bmp_bytes(2, 2)).unwrap();
        std::fs::write(required.join("notes.txt"), "skip me").unwrap();

        let gala = temp_dir.path().join("晚会类");
        std::fs::create_dir_all(&gala).unwrap();
        std::fs::write(gala.join("a.bmp"), bmp_bytes(3, 1)).unwrap();
        std::fs::write(gala.join("b.bmp"), bmp_bytes(4, 1)).unwrap();

        let images = ReferenceImages::new(&paths);
        let loaded = images.load(Category::Gala).await;
        let widths: Vec<u32> = loaded
            .iter()
            .map(|png| image::load_from_memory(png).unwrap().width())
            .collect();
        assert_eq!(widths, vec![2, 3, 4]);

        // Categories without a directory still get the required elements
        assert_eq!(images.load(Category::Lecture).await.len(), 1);
    }
}
