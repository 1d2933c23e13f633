//! Preview command - take in one file and print its data URL

use super::{intake_error, load, Context};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use watermark_app::{DropEntry, UploadZone};
use watermark_core::{MediaFile, RequestState, Slot};
use watermark_image::TranscodeOptions;

#[derive(Serialize)]
struct PreviewOutput<'a> {
    #[serde(flatten)]
    file: &'a MediaFile,
    size: usize,
    preview: &'a str,
}

/// Run a file through the upload zone and print the result
pub async fn run(ctx: &Context, path: &Path) -> Result<()> {
    // Surfaces missing files and directories with coded errors before the drop.
    load(path).await?;

    let mut zone = UploadZone::new(Slot::Photo).with_transcode_options(TranscodeOptions {
        quality: ctx.config.schema.intake.jpeg_quality,
    });
    let mut state = RequestState::new();

    let entry = DropEntry::from_path(path).await?;
    zone.on_file_drop(vec![entry], &mut state)
        .await
        .map_err(|e| intake_error(Slot::Photo, e))?;

    let (Some(file), Some(preview)) = (zone.file(), zone.file_preview()) else {
        anyhow::bail!("no preview was produced for {}", path.display());
    };

    if ctx.is_json() {
        super::print_json(&PreviewOutput {
            file,
            size: file.size(),
            preview,
        })?;
    } else {
        println!("{preview}");
    }

    Ok(())
}
