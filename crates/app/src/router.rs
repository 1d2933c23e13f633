//! In-process router
//!
//! Holds the active route and every route visited so far. Installed as the
//! client's [`Navigator`] so a failed request moves the user to its error view.

use std::sync::{Mutex, MutexGuard};
use tracing::info;
use watermark_core::{Navigator, Route};

#[derive(Debug)]
struct RouterState {
    current: Route,
    history: Vec<Route>,
}

/// Tracks the active view.
#[derive(Debug)]
pub struct Router {
    state: Mutex<RouterState>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router starting at [`Route::Home`]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RouterState {
                current: Route::Home,
                history: vec![Route::Home],
            }),
        }
    }

    /// Active route
    pub fn current(&self) -> Route {
        self.lock().current
    }

    /// Every route visited, oldest first
    pub fn history(&self) -> Vec<Route> {
        self.lock().history.clone()
    }

    /// Navigate by path; unknown paths land on home
    pub fn navigate_to_path(&self, path: &str) -> Route {
        let route = Route::resolve(path);
        self.navigate(route);
        route
    }

    // A panic while holding the lock leaves plain data behind; keep using it.
    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) {
        let mut state = self.lock();
        info!(from = %state.current, to = %route, "Navigating");
        state.current = route;
        state.history.push(route);
    }
}
