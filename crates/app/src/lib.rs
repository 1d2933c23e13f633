//! Application components for the watermark client
//!
//! The pieces a front end wires together:
//!
//! - [`UploadZone`]: takes one dropped file, transcodes HEIC, stores it, builds a preview
//! - [`DownloadZone`]: sends the request and saves the result
//! - [`Router`]: tracks the active view; failed requests navigate through it
//! - [`View`]: what each route shows
//! - [`Page`]: two upload zones and a download zone around one request state
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use watermark_api_client::{ClientConfig, WatermarkClient};
//! use watermark_app::{DropEntry, Page, Router};
//! use watermark_core::{config::ConfigSchema, Slot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Arc::new(Router::new());
//!     let client = WatermarkClient::with_config(ClientConfig::development())?
//!         .with_navigator(router.clone());
//!
//!     let mut page = Page::from_config(&ConfigSchema::default());
//!     page.drop_files(Slot::Photo, vec![DropEntry::from_path("beach.jpg").await?]).await?;
//!     page.drop_files(Slot::Watermark, vec![DropEntry::from_path("logo.png").await?]).await?;
//!
//!     let saved = page.download(&client.watermark()).await?;
//!     println!("saved to {}", saved.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod download_zone;
pub mod error;
pub mod page;
pub mod router;
pub mod upload_zone;
pub mod views;

pub use download_zone::DownloadZone;
pub use error::{DownloadError, IntakeError};
pub use page::Page;
pub use router::Router;
pub use upload_zone::{read_media, DropEntry, UploadZone};
pub use views::View;
