//! What each route shows

use serde::Serialize;
use watermark_core::Route;

/// Static content of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    /// Route this view belongs to
    pub route: Route,
    /// Path the route is served at
    pub path: &'static str,
    /// Short glyph shown next to the title
    pub icon: &'static str,
    /// Heading
    pub title: &'static str,
    /// Body text
    pub message: &'static str,
}

impl View {
    /// The view for `route`
    pub fn for_route(route: Route) -> Self {
        let (icon, title, message) = match route {
            Route::Home => (
                "◆",
                "Watermark",
                "Drop a photo and a watermark image, then download the result.",
            ),
            Route::UnsupportedMedia => (
                "✗",
                "Unsupported media type",
                "One of the files is not an accepted image.\n\
                 Use JPEG, PNG, GIF, BMP, TIFF, WebP, SVG or HEIC files.",
            ),
            Route::ValidationError => (
                "✗",
                "Invalid images",
                "Make sure the base image is bigger than the watermark image.",
            ),
            Route::Error => (
                "✗",
                "Something went wrong",
                "The watermark could not be created. Please try again later.",
            ),
        };

        Self {
            route,
            path: route.path(),
            icon,
            title,
            message,
        }
    }

    /// The view for a raw path, unknown paths showing home
    pub fn for_path(path: &str) -> Self {
        Self::for_route(Route::resolve(path))
    }

    /// Whether this is an error screen
    pub fn is_error(&self) -> bool {
        self.route.is_error()
    }
}
