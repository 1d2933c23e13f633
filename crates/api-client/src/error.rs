//! Error types for the API client

use std::fmt;
use thiserror::Error;
use watermark_core::Slot;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error body from the API
        message: String,
    },

    /// A request was built before both files were chosen
    #[error("Photo or watermark file is not set, cannot watermark ({slot} is missing)")]
    MissingFile {
        /// First empty slot
        slot: Slot,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// HTTP status, when a response was received
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::MissingEnvVar(_) | Self::MissingFile { .. } | Self::InvalidUrl(_) => {
                None
            }
        }
    }

    /// Whether this error happened before anything was sent
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingFile { .. } | Self::Config(_) | Self::MissingEnvVar(_) | Self::InvalidUrl(_)
        )
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }
}

/// Error context for better debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: Option<String>,
    /// Endpoint that was called
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)?;
        if let Some(ref id) = self.request_id {
            write!(f, " (request_id: {id})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_of_api_response() {
        let err = ApiError::api_response(415, "media type is not supported.");
        assert_eq!(err.status(), Some(415));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_missing_file_is_precondition() {
        let err = ApiError::MissingFile { slot: Slot::Watermark };
        assert_eq!(err.status(), None);
        assert!(err.is_precondition());
        assert!(err.to_string().contains("watermark is missing"));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext {
            request_id: Some("abc".into()),
            endpoint: "/watermark".into(),
            method: "POST".into(),
        };
        assert_eq!(ctx.to_string(), "POST /watermark (request_id: abc)");
    }
}
