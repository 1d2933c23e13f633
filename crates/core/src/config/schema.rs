//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub intake: IntakeConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.intake.jpeg_quality) || self.intake.jpeg_quality == 0.0 {
            return Err(crate::Error::invalid_config_value(
                "intake.jpeg_quality",
                "must be in (0, 1]",
            ));
        }

        if self.download.filename.trim().is_empty() {
            return Err(crate::Error::invalid_config_value(
                "download.filename",
                "cannot be empty",
            ));
        }

        if let Some(secs) = self.api.timeout_secs {
            if secs == 0 {
                return Err(crate::Error::invalid_config_value(
                    "api.timeout_secs",
                    "cannot be zero",
                ));
            }
        }

        Ok(())
    }
}

/// Backend API settings
///
/// Unset values fall back to the client's environment-based defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// Base URL of the watermark backend
    #[serde(default)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// File intake settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// JPEG quality factor used when transcoding HEIC uploads
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: f32,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_jpeg_quality() -> f32 {
    0.9
}

/// Download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Name the result is saved under
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Directory the result is saved into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_filename() -> String {
    "watermarked.png".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,

    /// Also write logs to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            file: None,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
