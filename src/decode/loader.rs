/// Image file loader
///
/// Decodes any supported format into a tightly packed RGBA8 buffer,
/// regardless of how many channels the source stores.

use bytes::Bytes;
use image::ImageReader;
use std::path::Path;

use crate::error::DecodeError;
use crate::state::data::{PixelBuffer, CHANNELS};

/// Result of decoding one image file
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: PixelBuffer,
    /// Channel count of the source file before RGBA expansion
    pub source_channels: u8,
}

/// Decode `path` into RGBA8 pixels.
///
/// Blocking and CPU-intensive; the bulk loader runs it on the blocking pool.
pub fn decode(path: &Path) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::open(path)
        .map_err(|source| DecodeError::Open {
            path: path.to_path_buf(),
            source,
        })?
        // Content sniffing wins over the extension, which stays as the fallback
        .with_guessed_format()
        .map_err(|source| DecodeError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let image = reader.decode().map_err(|source| DecodeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let source_channels = image.color().channel_count();
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();

    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    let data = Bytes::from(rgba.into_raw());
    debug_assert_eq!(data.len(), width as usize * height as usize * CHANNELS);

    Ok(DecodedImage {
        pixels: PixelBuffer {
            width,
            height,
            data,
        },
        source_channels,
    })
}
