//! Run command - drop both files, request the watermark, save the result

use super::{download_error, intake_error, path_error, Context};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use watermark_app::{DownloadZone, DropEntry, Page, Router, View};
use watermark_cli::output::{format_duration, format_size, Status};
use watermark_cli::progress;
use watermark_core::{Error, MediaFile, Slot};
use watermark_image::preflight::{self, PreflightIssue};
use watermark_telemetry::Timer;

#[derive(Serialize)]
struct RunOutput<'a> {
    photo: Option<&'a MediaFile>,
    watermark: Option<&'a MediaFile>,
    warnings: Vec<PreflightIssue>,
    saved: Option<PathBuf>,
    view: View,
    error: Option<watermark_core::error::ErrorReport>,
}

/// Execute the full intake, request and download flow
pub async fn run(
    ctx: &Context,
    photos: Vec<PathBuf>,
    watermarks: Vec<PathBuf>,
    output: Option<PathBuf>,
    filename: Option<String>,
) -> Result<()> {
    let schema = &ctx.config.schema;
    let router = Arc::new(Router::new());
    let api = ctx.client(router.clone())?.watermark();

    let zone = DownloadZone::new(
        filename.unwrap_or_else(|| schema.download.filename.clone()),
        output.unwrap_or_else(|| schema.download.output_dir.clone()),
    );
    let mut page = Page::from_config(schema).with_download_zone(zone);

    for (slot, paths) in [(Slot::Photo, photos), (Slot::Watermark, watermarks)] {
        let mut entries = Vec::with_capacity(paths.len());
        for path in &paths {
            let entry = DropEntry::from_path(path)
                .await
                .map_err(|e| path_error(path, e))?;
            entries.push(entry);
        }

        page.drop_files(slot, entries)
            .await
            .map_err(|e| intake_error(slot, e))?;

        if !ctx.is_json() {
            if let Some(file) = page.zone(slot).file() {
                Status::success(&format!(
                    "{slot}: {} ({}, {})",
                    file.name,
                    file.mime_type,
                    format_size(file.size() as u64)
                ));
            }
        }
    }

    let warnings = match page.state().pair() {
        Ok((photo, watermark)) => preflight::check(photo, watermark).issues,
        Err(_) => Vec::new(),
    };
    if !ctx.is_json() {
        for issue in &warnings {
            Status::warning(&format!("{issue} (server would answer {})", issue.status()));
        }
    }

    let spinner = if ctx.is_json() {
        progress::hidden()
    } else {
        progress::spinner("Applying watermark...")
    };
    let timer = Timer::start("watermark_request");
    let result = page.download(&api).await;
    let elapsed = timer.stop();

    let view = View::for_route(router.current());
    let (saved, error) = match result {
        Ok(path) => {
            progress::finish_success(
                &spinner,
                &format!(
                    "Saved {} in {}",
                    path.display(),
                    format_duration(elapsed)
                ),
            );
            (Some(path), None)
        }
        Err(e) => {
            progress::finish_error(&spinner, "Watermark request failed");
            (None, Some(download_error(e)))
        }
    };

    if ctx.is_json() {
        super::print_json(&RunOutput {
            photo: page.state().photo(),
            watermark: page.state().watermark(),
            warnings,
            saved,
            view,
            error: error.as_ref().map(Error::to_report),
        })?;
    } else {
        Status::view(view.icon, view.title, view.message, view.is_error());
    }

    match error {
        Some(e) if ctx.is_json() => Err(super::Reported(e).into()),
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
