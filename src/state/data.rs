/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the loader, the review state machine and the display layer.

use bytes::Bytes;
use std::fmt;
use std::path::PathBuf;

/// Every loaded buffer is RGBA, whatever the source file stored
pub const CHANNELS: usize = 4;

/// Decoded RGBA8 pixels, row-major, no padding between rows.
/// Cloning shares the underlying allocation.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

impl PixelBuffer {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// Pixel data is far too large to print
impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Where a record is in its load lifecycle
///
/// The pixel buffer lives inside `Loaded`, so a record holds pixels
/// exactly when it is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Scanned, not yet decoded (only before the load barrier)
    Pending,
    /// Decoded successfully
    Loaded(PixelBuffer),
    /// Decode failed; the record stays navigable but shows nothing
    Failed(String),
    /// Pixels dropped at teardown
    Released,
}

/// Triage classification of a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReviewState {
    #[default]
    Neutral,
    Accepted,
    Rejected,
}

impl ReviewState {
    pub fn label(self) -> &'static str {
        match self {
            ReviewState::Neutral => "neutral",
            ReviewState::Accepted => "accepted",
            ReviewState::Rejected => "rejected",
        }
    }
}

/// Represents a single image in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Filename only (e.g., "DSC_0001.jpg")
    pub filename: String,
    /// Full, absolute path to the source file
    pub path: PathBuf,
    /// Dimensions, zero until decoded
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file (the buffer is always RGBA)
    pub channels: u8,
    pub load: LoadState,
    pub review: ReviewState,
}

impl ImageRecord {
    /// Create a scanned, not yet decoded record
    pub fn new(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self {
            filename,
            path,
            width: 0,
            height: 0,
            channels: 0,
            load: LoadState::Pending,
            review: ReviewState::Neutral,
        }
    }

    /// Pixels to display, if this record decoded successfully
    pub fn pixels(&self) -> Option<&PixelBuffer> {
        match &self.load {
            LoadState::Loaded(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.load, LoadState::Loaded(_))
    }

    #[cfg(test)]
    pub fn is_failed(&self) -> bool {
        matches!(self.load, LoadState::Failed(_))
    }

    /// Why decoding failed, for failed records
    pub fn failure(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Drop the pixel buffer. Returns true if there was one to drop.
    pub fn release(&mut self) -> bool {
        if self.is_loaded() {
            self.load = LoadState::Released;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_pending_and_neutral() {
        let record = ImageRecord::new(PathBuf::from("/photos/a.jpg"));
        assert_eq!(record.filename, "a.jpg");
        assert_eq!(record.load, LoadState::Pending);
        assert_eq!(record.review, ReviewState::Neutral);
        assert!(record.pixels().is_none());
    }

    #[test]
    fn test_release_only_drops_loaded_pixels() {
        let mut record = ImageRecord::new(PathBuf::from("/photos/a.jpg"));
        assert!(!record.release());

        record.load = LoadState::Loaded(PixelBuffer {
            width: 1,
            height: 1,
            data: Bytes::from(vec![0u8; 4]),
        });
        assert!(record.release());
        assert_eq!(record.load, LoadState::Released);
        assert!(!record.release());
    }
}
