//! Application routes and the navigation seam
//!
//! | Path | Route |
//! |------|-------|
//! | `/home` | [`Route::Home`] |
//! | `/error-415` | [`Route::UnsupportedMedia`] |
//! | `/error-422` | [`Route::ValidationError`] |
//! | `/error` | [`Route::Error`] |
//! | anything else | redirect to `/home` |

use serde::{Deserialize, Serialize};
use std::fmt;

/// A view the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Upload page
    Home,
    /// The server refused the media type (HTTP 415)
    UnsupportedMedia,
    /// The server could not process the images (HTTP 422)
    ValidationError,
    /// Any other failure
    Error,
}

impl Route {
    /// Every route with a view
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::UnsupportedMedia,
        Route::ValidationError,
        Route::Error,
    ];

    /// Canonical path
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::UnsupportedMedia => "/error-415",
            Route::ValidationError => "/error-422",
            Route::Error => "/error",
        }
    }

    /// Resolve a path; unknown paths redirect to [`Route::Home`].
    #[must_use]
    pub fn resolve(path: &str) -> Route {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/');

        match trimmed {
            "home" => Route::Home,
            "error-415" => Route::UnsupportedMedia,
            "error-422" => Route::ValidationError,
            "error" => Route::Error,
            _ => Route::Home,
        }
    }

    /// Error view for a failed request. `None` means no response was received.
    #[must_use]
    pub fn for_status(status: Option<u16>) -> Route {
        match status {
            Some(415) => Route::UnsupportedMedia,
            Some(422) => Route::ValidationError,
            _ => Route::Error,
        }
    }

    /// Whether this route is one of the error views
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Something that can switch the active view.
pub trait Navigator: Send + Sync {
    /// Show `route`
    fn navigate(&self, route: Route);
}
