//! HEIC/HEIF to JPEG transcoding.
//!
//! The backend expects formats it can decode, so HEIC uploads are turned into
//! JPEG before they are stored. Decoding sits behind [`HeicDecoder`]; the
//! libheif-backed implementation is compiled in with the `heif` feature.

use crate::{ImageError, Result};
use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use watermark_core::media::heic_suffix;
use watermark_core::MediaFile;

/// MIME type of transcoded output.
pub const JPEG_MIME: &str = "image/jpeg";

/// Decodes a HEIC/HEIF container into pixels.
pub trait HeicDecoder: Send + Sync {
    /// Decode the primary image of `data`.
    fn decode(&self, data: &[u8]) -> Result<DynamicImage>;
}

/// Options for transcoding.
#[derive(Debug, Clone, Copy)]
pub struct TranscodeOptions {
    /// JPEG quality factor in (0, 1]
    pub quality: f32,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self { quality: 0.9 }
    }
}

impl TranscodeOptions {
    /// Quality on the encoder's 1-100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        // Clamped to 1..=100 before the cast.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let q = (self.quality * 100.0).round().clamp(1.0, 100.0) as u8;
        q
    }
}

/// Convert a HEIC file to a JPEG file.
///
/// The result is named `<stem>.jpg`, typed `image/jpeg`, and keeps the
/// original modification time.
pub fn heic_to_jpeg(
    file: &MediaFile,
    decoder: &dyn HeicDecoder,
    options: &TranscodeOptions,
) -> Result<MediaFile> {
    let img = decoder.decode(&file.data)?;
    let data = encode_jpeg(&img, options.jpeg_quality())?;

    tracing::debug!(
        from = %file.name,
        width = img.width(),
        height = img.height(),
        bytes = data.len(),
        "Transcoded HEIC to JPEG"
    );

    Ok(MediaFile::new(jpeg_name(&file.name), JPEG_MIME, data).with_last_modified(file.last_modified))
}

/// Encode pixels as JPEG. Alpha is dropped.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut buffer, ImageOutputFormat::Jpeg(quality))?;
    Ok(buffer.into_inner())
}

/// `IMG_01.HEIC` -> `IMG_01.jpg`, `.heic` -> `.jpg`
fn jpeg_name(name: &str) -> String {
    match heic_suffix(name) {
        // The suffix is ASCII, so this cut lands on a char boundary.
        Some(ext) => format!("{}.jpg", &name[..name.len() - ext.len() - 1]),
        None => Path::new(name)
            .with_extension("jpg")
            .to_string_lossy()
            .into_owned(),
    }
}

/// Decoder used when no HEIC support is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableDecoder;

impl HeicDecoder for UnavailableDecoder {
    fn decode(&self, _data: &[u8]) -> Result<DynamicImage> {
        Err(ImageError::HeicUnsupported)
    }
}

/// Decoder backed by the system libheif.
#[cfg(feature = "heif")]
pub struct LibHeifDecoder {
    lib: libheif_rs::LibHeif,
}

#[cfg(feature = "heif")]
impl Default for LibHeifDecoder {
    fn default() -> Self {
        Self {
            lib: libheif_rs::LibHeif::new(),
        }
    }
}

#[cfg(feature = "heif")]
impl HeicDecoder for LibHeifDecoder {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        use libheif_rs::{ColorSpace, HeifContext, RgbChroma};

        let heif_err = |e: libheif_rs::HeifError| ImageError::HeicDecode(e.to_string());

        let ctx = HeifContext::read_from_bytes(data).map_err(heif_err)?;
        let handle = ctx.primary_image_handle().map_err(heif_err)?;
        let decoded = self
            .lib
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(heif_err)?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| ImageError::HeicDecode("no interleaved RGB plane".into()))?;

        let row_len = plane.width as usize * 3;
        let mut pixels = Vec::with_capacity(row_len * plane.height as usize);
        for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
            pixels.extend_from_slice(&row[..row_len]);
        }

        image::RgbImage::from_raw(plane.width, plane.height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| ImageError::HeicDecode("plane size mismatch".into()))
    }
}

/// The best decoder this build has.
pub fn default_decoder() -> Arc<dyn HeicDecoder> {
    #[cfg(feature = "heif")]
    {
        Arc::new(LibHeifDecoder::default())
    }
    #[cfg(not(feature = "heif"))]
    {
        Arc::new(UnavailableDecoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{detect_format, ImageFormat};
    use chrono::{DateTime, TimeZone, Utc};
    use image::{Rgb, RgbImage};

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    struct SolidDecoder;

    impl HeicDecoder for SolidDecoder {
        fn decode(&self, _data: &[u8]) -> Result<DynamicImage> {
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 6, Rgb([200, 10, 10]))))
        }
    }

    #[test]
    fn test_quality_scale() {
        assert_eq!(TranscodeOptions::default().jpeg_quality(), 90);
        assert_eq!(TranscodeOptions { quality: 1.0 }.jpeg_quality(), 100);
        assert_eq!(TranscodeOptions { quality: 0.0 }.jpeg_quality(), 1);
    }

    #[test]
    fn test_jpeg_name() {
        assert_eq!(jpeg_name("x.heic"), "x.jpg");
        assert_eq!(jpeg_name("IMG_0042.HEIC"), "IMG_0042.jpg");
        assert_eq!(jpeg_name("scan"), "scan.jpg");
        assert_eq!(jpeg_name(".heic"), ".jpg");
    }

    #[test]
    fn test_heic_to_jpeg() {
        let heic = MediaFile::new("x.heic", "image/heic", vec![0; 16]).with_last_modified(stamp());

        let jpeg = heic_to_jpeg(&heic, &SolidDecoder, &TranscodeOptions::default()).unwrap();

        assert_eq!(jpeg.name, "x.jpg");
        assert_eq!(jpeg.mime_type, "image/jpeg");
        assert_eq!(jpeg.last_modified, stamp());
        assert_eq!(detect_format(&jpeg.data).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_unavailable_decoder_fails() {
        let heic = MediaFile::new("x.heic", "image/heic", vec![0; 16]);
        let err = heic_to_jpeg(&heic, &UnavailableDecoder, &TranscodeOptions::default()).unwrap_err();
        assert!(matches!(err, ImageError::HeicUnsupported));
    }
}
