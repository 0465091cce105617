//! Locally stored reference assets
//!
//! Reference documents bias the refined copy toward the school's house style;
//! reference images condition the main visual. Both are organized by category
//! label and re-read on every call.

pub mod documents;
pub mod images;

pub use documents::{DocumentKind, ReferenceDocument, ReferenceLibrary};
pub use images::{ReferenceImages, normalize_to_png};

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Regular files directly inside `dir`, sorted by file name
///
/// A missing directory yields an empty list.
pub(crate) fn files_in(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!("Reference directory {:?} does not exist", dir);
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
