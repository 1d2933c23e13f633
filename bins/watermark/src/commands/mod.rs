//! CLI command implementations

pub mod check;
pub mod inspect;
pub mod preview;
pub mod route;
pub mod run;

use crate::OutputFormat;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use watermark_api_client::{ApiError, ClientConfig, WatermarkClient};
use watermark_app::{DownloadError, IntakeError};
use watermark_core::config::Config;
use watermark_core::{Error, ErrorCode, MediaFile, Navigator, Slot};

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    pub api_url: Option<String>,
    pub format: OutputFormat,
}

impl Context {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Client for the configured backend, reporting failures to `navigator`
    pub fn client(&self, navigator: Arc<dyn Navigator>) -> anyhow::Result<WatermarkClient> {
        let config =
            ClientConfig::from_sources_with(&self.config.schema.api, self.api_url.as_deref())?;
        Ok(WatermarkClient::with_config(config)?.with_navigator(navigator))
    }
}

/// An error already printed as part of a command's output
#[derive(Debug)]
pub struct Reported(pub Error);

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Reported {}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a coded error in the selected format
pub fn report_error(err: &Error, format: OutputFormat) {
    if format == OutputFormat::Json {
        if let Ok(json) = serde_json::to_string_pretty(&err.to_report()) {
            println!("{json}");
        }
        return;
    }

    eprintln!("{} {}", format!("[{}]", err.code).red().bold(), err.message);
    if let Some(context) = &err.context {
        eprintln!("  {}", context.dimmed());
    }
    if let Some(suggestion) = &err.suggestion {
        eprintln!("  {} {}", "hint:".cyan(), suggestion);
    }
}

/// Read a file from disk, mapping failures to coded errors
pub async fn load(path: &Path) -> anyhow::Result<MediaFile> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => return Err(Error::not_a_file(path).into()),
        Ok(_) => {}
        Err(e) => return Err(path_error(path, e).into()),
    }

    let file = watermark_app::read_media(path)
        .await
        .map_err(|e| path_error(path, e))?;
    Ok(file)
}

/// Coded error for an I/O failure on `path`
pub fn path_error(path: &Path, err: std::io::Error) -> Error {
    match err.kind() {
        std::io::ErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::from(err).with_context(path.display().to_string()),
    }
}

/// Coded error for a rejected drop
pub fn intake_error(slot: Slot, err: IntakeError) -> Error {
    let code = match &err {
        IntakeError::DropCardinality { .. } => ErrorCode::DropCardinality,
        IntakeError::NotAFile { .. } => ErrorCode::NotAFile,
        IntakeError::Read { .. } => ErrorCode::IoError,
        IntakeError::Transcode(_) => ErrorCode::TranscodeFailed,
        IntakeError::Preview(_) => ErrorCode::PreviewFailed,
        IntakeError::Interrupted(_) => ErrorCode::Internal,
    };

    let mut coded = Error::new(code, err.user_message()).with_context(format!("{slot}: {err}"));
    if matches!(err, IntakeError::Transcode(_)) {
        coded = coded.with_suggestion("Build with the `heif` feature to convert HEIC files");
    }
    coded
}

/// Coded error for a failed download
pub fn download_error(err: DownloadError) -> Error {
    match err {
        DownloadError::Request(api) => request_error(&api),
        DownloadError::Save { path, source } => {
            Error::from(source).with_context(format!("saving {}", path.display()))
        }
        DownloadError::Interrupted(e) => Error::new(ErrorCode::Internal, e.to_string()),
    }
}

fn request_error(err: &ApiError) -> Error {
    let code = match (err, err.status()) {
        (ApiError::MissingFile { .. }, _) => ErrorCode::MissingFile,
        (_, Some(415)) => ErrorCode::UnsupportedMedia,
        (_, Some(422)) => ErrorCode::Unprocessable,
        _ => ErrorCode::RequestError,
    };

    Error::new(code, err.to_string())
}
