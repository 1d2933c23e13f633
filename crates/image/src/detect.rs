//! Content sniffing for uploaded images.
//!
//! Raster formats are told apart by a fixed prefix. HEIC and AVIF share the
//! ISO base media file layout (`....ftyp<major><minor><compatible...>`), so
//! they are separated by reading the brands of the `ftyp` box: a file whose
//! major brand is the generic `mif1` is still AVIF when `avif` appears among
//! its compatible brands, and only the HEVC-coded family needs transcoding.

use crate::{ImageError, Result};

/// Image container recognised from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG/JFIF
    Jpeg,
    /// PNG
    Png,
    /// GIF, still or animated
    Gif,
    /// WebP in a RIFF container
    WebP,
    /// AV1-coded HEIF, uploaded as is
    Avif,
    /// Windows bitmap
    Bmp,
    /// TIFF, either byte order
    Tiff,
    /// HEVC-coded HEIF, as written by phone cameras
    Heic,
}

impl ImageFormat {
    /// MIME type sent with the upload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Avif => "image/avif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Heic => "image/heic",
        }
    }

    /// Whether the bytes must go through the HEIC decoder before upload.
    pub fn needs_transcode(&self) -> bool {
        matches!(self, Self::Heic)
    }
}

const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (&[0xFF, 0xD8, 0xFF], ImageFormat::Jpeg),
    (b"\x89PNG\r\n\x1a\n", ImageFormat::Png),
    (b"GIF87a", ImageFormat::Gif),
    (b"GIF89a", ImageFormat::Gif),
    (b"II*\0", ImageFormat::Tiff),
    (b"MM\0*", ImageFormat::Tiff),
    (b"BM", ImageFormat::Bmp),
];

const AVIF_BRANDS: &[&[u8; 4]] = &[b"avif", b"avis"];

const HEIC_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1",
];

/// Identify the image container from the leading bytes of a file.
///
/// ```
/// use watermark_image::{detect_format, ImageFormat};
///
/// let heic = b"\x00\x00\x00\x14ftypheic\x00\x00\x00\x00mif1";
/// assert_eq!(detect_format(heic).unwrap(), ImageFormat::Heic);
/// ```
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.len() < 4 {
        return Err(ImageError::InvalidData("Not enough data for format detection".into()));
    }

    if let Some(format) = heif_format(data) {
        return Ok(format);
    }

    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Ok(ImageFormat::WebP);
    }

    SIGNATURES
        .iter()
        .find(|(magic, _)| data.starts_with(magic))
        .map(|&(_, format)| format)
        .ok_or(ImageError::UnknownFormat)
}

/// Classify an ISO-BMFF image by the brands of its leading `ftyp` box.
fn heif_format(data: &[u8]) -> Option<ImageFormat> {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return None;
    }

    let declared = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let end = declared.clamp(12, data.len());

    // Skip the minor version that sits between major and compatible brands.
    let compatible = data.get(16..end).unwrap_or_default().chunks_exact(4);
    let brands: Vec<&[u8]> = std::iter::once(&data[8..12]).chain(compatible).collect();

    let has_any = |set: &[&[u8; 4]]| brands.iter().any(|b| set.iter().any(|s| s[..] == **b));
    if has_any(AVIF_BRANDS) {
        Some(ImageFormat::Avif)
    } else if has_any(HEIC_BRANDS) {
        Some(ImageFormat::Heic)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ftyp(major: &[u8; 4], compatible: &[&[u8; 4]]) -> Vec<u8> {
        let size = 16 + 4 * compatible.len();
        let mut box_ = (size as u32).to_be_bytes().to_vec();
        box_.extend_from_slice(b"ftyp");
        box_.extend_from_slice(major);
        box_.extend_from_slice(&[0, 0, 0, 0]);
        for brand in compatible {
            box_.extend_from_slice(*brand);
        }
        box_
    }

    #[test]
    fn test_raster_signatures() {
        let cases: [(&[u8], ImageFormat); 6] = [
            (&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10], ImageFormat::Jpeg),
            (b"\x89PNG\r\n\x1a\n\0\0", ImageFormat::Png),
            (b"GIF89a\0\0", ImageFormat::Gif),
            (b"RIFF\0\0\0\0WEBPVP8 ", ImageFormat::WebP),
            (b"BM\0\0\0\0", ImageFormat::Bmp),
            (b"MM\0*\0\0\0\x08", ImageFormat::Tiff),
        ];
        for (data, expected) in cases {
            assert_eq!(detect_format(data).unwrap(), expected);
        }
    }

    #[test]
    fn test_heic_by_major_brand() {
        assert_eq!(detect_format(&ftyp(b"heic", &[b"mif1"])).unwrap(), ImageFormat::Heic);
        assert_eq!(detect_format(&ftyp(b"mif1", &[b"heic"])).unwrap(), ImageFormat::Heic);
    }

    #[test]
    fn test_generic_heif_with_avif_brand_is_avif() {
        let data = ftyp(b"mif1", &[b"mif1", b"avif", b"miaf"]);
        assert_eq!(detect_format(&data).unwrap(), ImageFormat::Avif);
        assert!(!ImageFormat::Avif.needs_transcode());
    }

    #[test]
    fn test_video_ftyp_is_not_an_image() {
        let data = ftyp(b"isom", &[b"iso2", b"mp41"]);
        assert!(matches!(detect_format(&data), Err(ImageError::UnknownFormat)));
    }

    #[test]
    fn test_box_size_beyond_buffer_is_clamped() {
        let mut data = ftyp(b"heic", &[]);
        data[..4].copy_from_slice(&4096u32.to_be_bytes());
        assert_eq!(detect_format(&data).unwrap(), ImageFormat::Heic);
    }

    #[test]
    fn test_short_or_unknown_input() {
        assert!(matches!(detect_format(b"BM"), Err(ImageError::InvalidData(_))));
        assert!(matches!(detect_format(&[0u8; 8]), Err(ImageError::UnknownFormat)));
    }

    #[test]
    fn test_only_heic_needs_transcode() {
        assert!(ImageFormat::Heic.needs_transcode());
        assert!(!ImageFormat::Jpeg.needs_transcode());
        assert_eq!(ImageFormat::Heic.mime_type(), "image/heic");
    }
}
