use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::chosen::ChosenDir;
use super::data::{ImageRecord, ReviewState};
use crate::error::ViewerError;

/// Supported image extensions (compared lowercase)
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tga"];

/// The Catalog is the fixed, path-sorted list of images for one session.
/// Its length never changes after `scan`.
pub struct Catalog {
    root: PathBuf,
    records: Vec<ImageRecord>,
}

impl Catalog {
    /// Scan `root` (non-recursively) for supported images.
    ///
    /// The root is canonicalised first so every record carries an absolute path.
    pub fn scan(root: &Path) -> Result<Self, ViewerError> {
        if !root.is_dir() {
            return Err(ViewerError::DirectoryNotFound(root.to_path_buf()));
        }
        let root = fs::canonicalize(root)
            .map_err(|_| ViewerError::DirectoryNotFound(root.to_path_buf()))?;

        tracing::info!(root = %root.display(), "🔍 Scanning directory");

        let mut paths: Vec<PathBuf> = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_image_file(path))
            .collect();

        if paths.is_empty() {
            return Err(ViewerError::NoImagesFound(root));
        }

        paths.sort();
        let records: Vec<ImageRecord> = paths.into_iter().map(ImageRecord::new).collect();

        tracing::info!(count = records.len(), "📁 Found images");
        Ok(Catalog { root, records })
    }

    /// Mark records Accepted when the output directory already holds their marker.
    /// Returns how many were restored.
    pub fn recover(&mut self, chosen: &ChosenDir) -> usize {
        let markers = match chosen.markers() {
            Ok(markers) => markers,
            Err(e) => {
                tracing::warn!("⚠️  Could not read {}: {}", chosen.path().display(), e);
                return 0;
            }
        };

        let mut restored = 0;
        for record in &mut self.records {
            if markers.contains(&record.filename) {
                record.review = ReviewState::Accepted;
                restored += 1;
            }
        }

        if restored > 0 {
            tracing::info!(restored, "🔄 Restored accepted images from a previous session");
        }
        let orphaned = markers.len().saturating_sub(restored);
        if orphaned > 0 {
            tracing::debug!(orphaned, "Markers with no matching image in this folder");
        }
        restored
    }

    /// Drop every record's pixels. Safe on partially loaded catalogs.
    /// Returns how many buffers were released.
    pub fn release_pixels(&mut self) -> usize {
        self.records
            .iter_mut()
            .map(|record| record.release())
            .filter(|released| *released)
            .count()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Scan guarantees at least one record
    pub fn non_zero_len(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.records.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImageRecord> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [ImageRecord] {
        &mut self.records
    }

    /// Count records in each review state: (accepted, rejected, neutral)
    pub fn review_counts(&self) -> (usize, usize, usize) {
        self.records
            .iter()
            .fold((0, 0, 0), |(a, r, n), record| match record.review {
                ReviewState::Accepted => (a + 1, r, n),
                ReviewState::Rejected => (a, r + 1, n),
                ReviewState::Neutral => (a, r, n + 1),
            })
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("root", &self.root)
            .field("len", &self.records.len())
            .finish()
    }
}

fn is_image_file(path: &Path) -> bool {
    match path.extension() {
        Some(extension) => {
            let ext = extension.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
