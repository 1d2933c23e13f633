//! HTTP client for the watermark backend
//!
//! This crate wraps `reqwest` for the one call the application makes: a
//! multipart POST of a photo and a watermark that answers with the composited
//! image.
//!
//! # Features
//!
//! - **Environment-based configuration**: base URL and timeout from environment variables
//! - **Binary responses**: bodies are returned as raw bytes
//! - **Error routing**: failed requests navigate to a view picked by status code
//! - **Request correlation**: every request carries an `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use watermark_api_client::WatermarkClient;
//! use watermark_core::RequestState;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WatermarkClient::new()?;
//!     let state = RequestState::new();
//!
//!     // Fails before any network call: both slots are empty.
//!     assert!(client.watermark().watermark(&state).await.is_err());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod middleware;

pub use client::WatermarkClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};
pub use middleware::HttpErrorInterceptor;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::WatermarkClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::WatermarkApi;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::middleware::HttpErrorInterceptor;
}
