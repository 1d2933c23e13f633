//! Request/response middleware
//!
//! [`HttpErrorInterceptor`] is the only centralized failure policy: every
//! request the client sends passes through it, and failures move the
//! application to an error view before the error is handed back to the caller.

use crate::error::{ApiError, ApiResult};
use std::sync::Arc;
use tracing::error;
use watermark_core::{Navigator, Route};

/// Navigates to an error view on failure, then re-raises the error.
#[derive(Clone)]
pub struct HttpErrorInterceptor {
    navigator: Arc<dyn Navigator>,
}

impl HttpErrorInterceptor {
    /// Route failures through `navigator`
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// View a failed request leads to
    ///
    /// 415 and 422 have dedicated views; everything else, including
    /// transport failures with no status, goes to the generic one.
    #[must_use]
    pub fn classify(err: &ApiError) -> Route {
        Route::for_status(err.status())
    }

    /// Pass `result` through, navigating first if it is an error
    pub fn intercept<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        result.map_err(|err| {
            let route = Self::classify(&err);
            error!(status = ?err.status(), route = %route, error = %err, "Request failed");
            self.navigator.navigate(route);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Route>>);

    impl Navigator for Recorder {
        fn navigate(&self, route: Route) {
            self.0.lock().unwrap().push(route);
        }
    }

    fn intercept_status(status: u16) -> Route {
        let recorder = Arc::new(Recorder::default());
        let interceptor = HttpErrorInterceptor::new(recorder.clone());

        let result: ApiResult<()> = Err(ApiError::api_response(status, "nope"));
        let err = interceptor.intercept(result).unwrap_err();
        assert_eq!(err.status(), Some(status));

        let routes = recorder.0.lock().unwrap();
        assert_eq!(routes.len(), 1);
        routes[0]
    }

    #[test]
    fn test_415_goes_to_unsupported_media() {
        assert_eq!(intercept_status(415), Route::UnsupportedMedia);
    }

    #[test]
    fn test_422_goes_to_validation_error() {
        assert_eq!(intercept_status(422), Route::ValidationError);
    }

    #[test]
    fn test_other_statuses_go_to_generic_error() {
        assert_eq!(intercept_status(413), Route::Error);
        assert_eq!(intercept_status(500), Route::Error);
        assert_eq!(intercept_status(404), Route::Error);
    }

    #[test]
    fn test_success_does_not_navigate() {
        let recorder = Arc::new(Recorder::default());
        let interceptor = HttpErrorInterceptor::new(recorder.clone());

        assert_eq!(interceptor.intercept(Ok(7)).unwrap(), 7);
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
