//! Core types for the watermark client
//!
//! This crate provides the pieces every other crate in the workspace shares:
//!
//! - **Media files**: in-memory uploads with name, MIME type and timestamp
//! - **Request state**: the photo and watermark slots a request is built from
//! - **Routes**: the views the application can navigate to, and the `Navigator` seam
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with per-field defaults
//!
//! # Example
//!
//! ```rust
//! use watermark_core::{MediaFile, RequestState, Slot};
//!
//! let mut state = RequestState::new();
//! state.set(Slot::Photo, MediaFile::new("beach.png", "image/png", vec![0x89, 0x50]));
//!
//! assert!(state.photo().is_some());
//! assert!(!state.is_complete());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod media;
pub mod routes;
pub mod state;

pub use error::{Error, ErrorCode, Result, ResultExt};
pub use media::MediaFile;
pub use routes::{Navigator, Route};
pub use state::{RequestState, Slot};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::media::MediaFile;
    pub use crate::routes::{Navigator, Route};
    pub use crate::state::{RequestState, Slot};
}
