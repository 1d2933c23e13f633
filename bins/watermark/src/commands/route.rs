//! Route command - resolve a path and render its view

use super::Context;
use anyhow::Result;
use watermark_app::View;
use watermark_cli::output::Status;

/// Show the view a path resolves to
pub fn run(ctx: &Context, path: &str) -> Result<()> {
    let view = View::for_path(path);

    if ctx.is_json() {
        return super::print_json(&view);
    }

    Status::view(view.icon, view.title, view.message, view.is_error());
    Status::field("path", view.path);
    Ok(())
}
