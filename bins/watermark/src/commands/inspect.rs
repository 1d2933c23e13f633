//! Inspect command - detected format and dimensions of one file

use super::{load, Context};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use watermark_cli::output::{format_size, Status};
use watermark_image::{detect_format, extract_metadata, ImageFormat, ImageMetadata};

#[derive(Serialize)]
struct InspectOutput<'a> {
    name: &'a str,
    declared_type: &'a str,
    format: Option<ImageFormat>,
    detected_type: Option<&'static str>,
    size_bytes: usize,
    metadata: Option<ImageMetadata>,
    needs_transcode: bool,
}

/// Print what is known about an image file
pub async fn run(ctx: &Context, path: &Path) -> Result<()> {
    let file = load(path).await?;
    let format = detect_format(&file.data).ok();
    let metadata = extract_metadata(&file.data);

    let output = InspectOutput {
        name: &file.name,
        declared_type: &file.mime_type,
        format,
        detected_type: format.map(|f| f.mime_type()),
        size_bytes: file.size(),
        metadata,
        needs_transcode: file.is_heic() || format.is_some_and(|f| f.needs_transcode()),
    };

    if ctx.is_json() {
        return super::print_json(&output);
    }

    Status::header(&file.name);
    Status::field("type", &file.mime_type);
    match format {
        Some(format) => Status::field("detected", &format!("{format:?} ({})", format.mime_type())),
        None => Status::field("detected", "unknown"),
    }
    Status::field("size", &format_size(file.size() as u64));

    match &output.metadata {
        Some(meta) => {
            let orientation = if meta.is_landscape() {
                "landscape"
            } else if meta.is_portrait() {
                "portrait"
            } else {
                "square"
            };
            Status::field("dimensions", &format!("{}x{}", meta.width, meta.height));
            Status::field("aspect", &format!("{:.2} ({orientation})", meta.aspect_ratio()));
        }
        None => Status::field("dimensions", "unavailable"),
    }

    if output.needs_transcode {
        Status::info("HEIC file: it is converted to JPEG when dropped");
    }

    Ok(())
}
