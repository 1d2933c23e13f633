//! In-memory media files
//!
//! A `MediaFile` is what an upload zone produces and what the watermark
//! request consumes: raw bytes plus the name and declared MIME type the file
//! arrived with.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// MIME types treated as HEIC/HEIF containers.
pub const HEIC_MIME_TYPES: &[&str] = &["image/heic", "image/heif"];

/// File extensions treated as HEIC/HEIF containers.
pub const HEIC_EXTENSIONS: &[&str] = &["heic", "heif"];

/// An uploaded file held in memory for the length of a session.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    /// File name, including extension
    pub name: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Last modification time reported by the source
    pub last_modified: DateTime<Utc>,
    /// Raw content
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl MediaFile {
    /// Create a file stamped with the current time
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            last_modified: Utc::now(),
            data,
        }
    }

    /// Builder-style method to set the modification time
    #[must_use]
    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = last_modified;
        self
    }

    /// Lowercased extension without the leading dot
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Content length in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether the declared type or the name's suffix marks this as HEIC.
    ///
    /// The suffix is matched on the whole name, so a bare `.heic` counts.
    #[must_use]
    pub fn is_heic(&self) -> bool {
        let mime = self.mime_type.to_ascii_lowercase();
        HEIC_MIME_TYPES.contains(&mime.as_str()) || heic_suffix(&self.name).is_some()
    }
}

/// The HEIC suffix `name` ends with, case-insensitively, without the dot.
#[must_use]
pub fn heic_suffix(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    HEIC_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| lower.strip_suffix(ext).is_some_and(|rest| rest.ends_with('.')))
}

impl fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("last_modified", &self.last_modified)
            .field("size", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        let file = MediaFile::new("IMG_0042.HEIC", "", vec![]);
        assert_eq!(file.extension().as_deref(), Some("heic"));

        let file = MediaFile::new("README", "text/plain", vec![]);
        assert_eq!(file.extension(), None);
    }

    #[test]
    fn test_heic_by_extension() {
        assert!(MediaFile::new("x.heic", "application/octet-stream", vec![]).is_heic());
        assert!(MediaFile::new("x.HEIF", "", vec![]).is_heic());
    }

    #[test]
    fn test_bare_heic_name_is_heic() {
        assert!(MediaFile::new(".heic", "", vec![]).is_heic());
        assert!(MediaFile::new(".HEIF", "application/octet-stream", vec![]).is_heic());
        assert!(!MediaFile::new("heic", "", vec![]).is_heic());
        assert!(!MediaFile::new("photo.heic.png", "image/png", vec![]).is_heic());
    }

    #[test]
    fn test_heic_suffix() {
        assert_eq!(heic_suffix("IMG_0042.HEIC"), Some("heic"));
        assert_eq!(heic_suffix("scan.heif"), Some("heif"));
        assert_eq!(heic_suffix("beach.jpg"), None);
    }

    #[test]
    fn test_heic_by_mime_type() {
        assert!(MediaFile::new("upload.bin", "image/heic", vec![]).is_heic());
    }

    #[test]
    fn test_plain_jpeg_is_not_heic() {
        assert!(!MediaFile::new("photo.jpg", "image/jpeg", vec![1, 2, 3]).is_heic());
    }

    #[test]
    fn test_debug_omits_content() {
        let file = MediaFile::new("a.png", "image/png", vec![0; 4096]);
        let debug = format!("{file:?}");
        assert!(debug.contains("size: 4096"));
        assert!(!debug.contains("0, 0, 0"));
    }
}
