//! Image handling for the watermark client.
//!
//! This crate provides:
//! - Format detection from magic bytes
//! - Dimension extraction
//! - HEIC/HEIF to JPEG transcoding behind a pluggable decoder
//! - Data-URL previews
//! - Local preflight of the backend's upload rules

#![warn(missing_docs)]

mod detect;
mod error;
mod metadata;
pub mod preflight;
mod preview;
pub mod transcode;

pub use detect::{detect_format, ImageFormat};
pub use error::{ImageError, Result};
pub use metadata::{extract_metadata, ImageMetadata};
pub use preflight::{PreflightIssue, PreflightReport};
pub use preview::data_url;
pub use transcode::{default_decoder, heic_to_jpeg, HeicDecoder, TranscodeOptions};
