//! Watermark endpoint
//!
//! Maps to `POST /watermark`, which takes a multipart body with a `photo` and
//! a `watermark` part and answers with the composited PNG.

use crate::client::WatermarkClient;
use crate::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use tracing::info;
use watermark_core::{MediaFile, RequestState, Slot};

/// Endpoint path, relative to the base URL
pub const WATERMARK_PATH: &str = "watermark";

/// Watermark API interface
#[derive(Clone)]
pub struct WatermarkApi {
    client: WatermarkClient,
}

impl WatermarkApi {
    /// Create a new watermark API interface
    pub(crate) fn new(client: WatermarkClient) -> Self {
        Self { client }
    }

    /// Build the multipart body from both slots.
    ///
    /// Fails with [`ApiError::MissingFile`] when either slot is empty.
    pub fn form(state: &RequestState) -> ApiResult<Form> {
        let (photo, watermark) = state.pair().map_err(|slot| ApiError::MissingFile { slot })?;

        Ok(Form::new()
            .part(Slot::Photo.as_str(), part(photo)?)
            .part(Slot::Watermark.as_str(), part(watermark)?))
    }

    /// Send both files and return the watermarked image
    ///
    /// POST /watermark
    pub async fn watermark(&self, state: &RequestState) -> ApiResult<Vec<u8>> {
        let form = Self::form(state)?;

        if let (Some(photo), Some(watermark)) = (state.photo(), state.watermark()) {
            info!(photo = %photo.name, watermark = %watermark.name, "Requesting watermark");
        }

        self.client.post_binary(WATERMARK_PATH, form).await
    }
}

fn part(file: &MediaFile) -> ApiResult<Part> {
    let mime = if file.mime_type.is_empty() {
        "application/octet-stream"
    } else {
        file.mime_type.as_str()
    };

    Part::bytes(file.data.clone())
        .file_name(file.name.clone())
        .mime_str(mime)
        .map_err(ApiError::Request)
}
