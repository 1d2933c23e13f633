//! Local preflight of the backend's upload rules.
//!
//! The watermark service validates each part before compositing. Running the
//! same checks locally tells the user which error view a request would end on
//! without sending anything. Preflight is advisory; it never blocks a request.
//!
//! Checks, in the order the server applies them:
//!
//! | Check | Status |
//! |-------|--------|
//! | content larger than [`MAX_MEDIA_SIZE`] | 413 |
//! | MIME type not in [`CONTENT_TYPES`] | 415 |
//! | extension not in [`EXTENSION_TYPES`] | 415 |
//! | watermark larger than the photo | 422 |

use crate::extract_metadata;
use serde::Serialize;
use std::fmt;
use watermark_core::{MediaFile, Route, Slot};

/// Largest accepted part, in bytes.
pub const MAX_MEDIA_SIZE: usize = 50 * 1024 * 1024;

/// Accepted MIME types.
pub const CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/tiff",
    "image/webp",
    "image/svg+xml",
    "image/heic",
    "image/heif",
];

/// Accepted file extensions, lowercase with the dot.
pub const EXTENSION_TYPES: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".tif", ".webp", ".svg", ".heic", ".heif",
];

/// One rule a request would break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreflightIssue {
    /// Part exceeds [`MAX_MEDIA_SIZE`]
    TooLarge {
        /// Offending part
        slot: Slot,
        /// Actual size
        size: usize,
    },
    /// MIME type is not accepted
    UnsupportedType {
        /// Offending part
        slot: Slot,
        /// Declared type
        mime_type: String,
    },
    /// Extension is not accepted
    UnsupportedExtension {
        /// Offending part
        slot: Slot,
        /// File name
        name: String,
    },
    /// Watermark does not fit inside the photo
    WatermarkTooLarge {
        /// Photo dimensions
        photo: (u32, u32),
        /// Watermark dimensions
        watermark: (u32, u32),
    },
}

impl PreflightIssue {
    /// HTTP status the server would answer with
    pub fn status(&self) -> u16 {
        match self {
            Self::TooLarge { .. } => 413,
            Self::UnsupportedType { .. } | Self::UnsupportedExtension { .. } => 415,
            Self::WatermarkTooLarge { .. } => 422,
        }
    }

    /// View the error interceptor would navigate to
    pub fn route(&self) -> Route {
        Route::for_status(Some(self.status()))
    }
}

impl fmt::Display for PreflightIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { slot, size } => write!(
                f,
                "{slot} is {size} bytes, the limit is {MAX_MEDIA_SIZE} bytes"
            ),
            Self::UnsupportedType { slot, mime_type } => {
                write!(f, "{slot} has unsupported type `{mime_type}`")
            }
            Self::UnsupportedExtension { slot, name } => {
                write!(f, "{slot} `{name}` has an unsupported extension")
            }
            Self::WatermarkTooLarge { photo, watermark } => write!(
                f,
                "watermark is {}x{} but the photo is only {}x{}; the photo must be bigger",
                watermark.0, watermark.1, photo.0, photo.1
            ),
        }
    }
}

/// Outcome of a preflight run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreflightReport {
    /// Broken rules, in server order
    pub issues: Vec<PreflightIssue>,
}

impl PreflightReport {
    /// Whether the server should accept the request
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// View the request would end on: the first issue's, or home
    pub fn route(&self) -> Route {
        self.issues.first().map_or(Route::Home, PreflightIssue::route)
    }
}

/// Check a single part.
pub fn check_file(slot: Slot, file: &MediaFile) -> Vec<PreflightIssue> {
    let mut issues = Vec::new();

    if file.size() > MAX_MEDIA_SIZE {
        issues.push(PreflightIssue::TooLarge {
            slot,
            size: file.size(),
        });
    }

    if !CONTENT_TYPES.contains(&file.mime_type.as_str()) {
        issues.push(PreflightIssue::UnsupportedType {
            slot,
            mime_type: file.mime_type.clone(),
        });
    }

    // Names without an extension pass; the server only checks what it sees.
    if let Some(ext) = file.extension() {
        if !EXTENSION_TYPES.contains(&format!(".{ext}").as_str()) {
            issues.push(PreflightIssue::UnsupportedExtension {
                slot,
                name: file.name.clone(),
            });
        }
    }

    issues
}

/// Check a full request.
///
/// Dimensions are only compared when both parts pass the per-file checks and
/// both headers can be read.
pub fn check(photo: &MediaFile, watermark: &MediaFile) -> PreflightReport {
    let mut issues = check_file(Slot::Photo, photo);
    issues.extend(check_file(Slot::Watermark, watermark));

    if issues.is_empty() {
        if let (Some(p), Some(w)) = (extract_metadata(&photo.data), extract_metadata(&watermark.data)) {
            if !p.contains(&w) {
                issues.push(PreflightIssue::WatermarkTooLarge {
                    photo: (p.width, p.height),
                    watermark: (w.width, w.height),
                });
            }
        }
    }

    tracing::debug!(issues = issues.len(), "Preflight finished");

    PreflightReport { issues }
}
