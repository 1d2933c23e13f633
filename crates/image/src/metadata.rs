//! Image metadata extraction.

use crate::{detect_format, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Image metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// File size in bytes
    pub size_bytes: usize,
}

impl ImageMetadata {
    /// Calculate aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Check if image is landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Check if image is portrait orientation.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Whether an image of `other`'s size fits inside this one.
    pub fn contains(&self, other: &ImageMetadata) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

/// Extract metadata from image data.
///
/// Only the header is parsed. HEIC and AVIF containers are recognised but
/// their dimensions are not read, so they yield `None`.
pub fn extract_metadata(data: &[u8]) -> Option<ImageMetadata> {
    let format = detect_format(data).ok()?;

    if matches!(format, ImageFormat::Heic | ImageFormat::Avif) {
        return None;
    }

    let (width, height) = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;

    Some(ImageMetadata {
        width,
        height,
        format,
        size_bytes: data.len(),
    })
}
