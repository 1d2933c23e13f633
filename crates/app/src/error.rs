//! Error types for the application components

use std::path::PathBuf;
use thiserror::Error;
use watermark_api_client::ApiError;
use watermark_image::ImageError;

/// Shown when a drop does not hold exactly one item
pub const SINGLE_FILE_ONLY: &str = "Only one file can be dropped at a time!";

/// Shown when the dropped item is a directory
pub const NOT_A_FILE: &str = "Only files can be dropped, not folders!";

/// Shown when a file cannot be read, transcoded or previewed
pub const LOAD_FAILED: &str = "The file was not loaded correctly!";

/// Errors raised while taking in a dropped file
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Zero or several items were dropped
    #[error("Expected exactly one dropped file, got {count}")]
    DropCardinality {
        /// Number of dropped items
        count: usize,
    },

    /// The dropped item is a directory
    #[error("Dropped entry is not a file: {}", path.display())]
    NotAFile {
        /// Offending path
        path: PathBuf,
    },

    /// The file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// HEIC to JPEG conversion failed
    #[error("Failed to transcode HEIC file: {0}")]
    Transcode(#[source] ImageError),

    /// The preview could not be built
    #[error("Failed to build preview: {0}")]
    Preview(#[source] ImageError),

    /// A background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

impl IntakeError {
    /// Message to show in the upload zone
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::DropCardinality { .. } => SINGLE_FILE_ONLY,
            Self::NotAFile { .. } => NOT_A_FILE,
            Self::Read { .. } | Self::Transcode(_) | Self::Preview(_) | Self::Interrupted(_) => {
                LOAD_FAILED
            }
        }
    }
}

/// Errors raised by the download zone
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The watermark request failed or could not be built
    #[error(transparent)]
    Request(#[from] ApiError),

    /// The result could not be written
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}
