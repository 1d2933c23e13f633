//! Check command - run the server's upload rules locally

use super::{load, Context};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use watermark_app::View;
use watermark_cli::output::{format_count, Status};
use watermark_core::{Error, ErrorCode, Route};
use watermark_image::preflight::{self, PreflightReport};

#[derive(Serialize)]
struct CheckOutput<'a> {
    ok: bool,
    #[serde(flatten)]
    report: &'a PreflightReport,
    view: View,
}

/// Check a photo and watermark pair without sending them
pub async fn run(ctx: &Context, photo: &Path, watermark: &Path) -> Result<()> {
    let photo = load(photo).await?;
    let watermark = load(watermark).await?;

    let report = preflight::check(&photo, &watermark);
    let route = report.route();
    let view = View::for_route(route);

    if ctx.is_json() {
        super::print_json(&CheckOutput {
            ok: report.is_ok(),
            report: &report,
            view,
        })?;
    } else if report.is_ok() {
        Status::success(&format!("{} and {} would be accepted", photo.name, watermark.name));
    } else {
        Status::header(&format!(
            "{} found",
            format_count(report.issues.len(), "issue", "issues")
        ));
        for issue in &report.issues {
            Status::error(&format!("[{}] {issue}", issue.status()));
        }
        Status::info(&format!("The request would end on {}", route.path()));
    }

    if report.is_ok() {
        return Ok(());
    }

    let code = match route {
        Route::UnsupportedMedia => ErrorCode::UnsupportedMedia,
        Route::ValidationError => ErrorCode::Unprocessable,
        Route::Home | Route::Error => ErrorCode::RequestError,
    };
    let err = Error::new(code, "Preflight found problems with the upload");

    if ctx.is_json() {
        Err(super::Reported(err).into())
    } else {
        Err(err.into())
    }
}
