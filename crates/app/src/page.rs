//! The upload page: two upload zones and a download zone sharing one request

use crate::download_zone::DownloadZone;
use crate::error::{DownloadError, IntakeError};
use crate::upload_zone::{DropEntry, UploadZone};
use std::path::PathBuf;
use std::sync::Arc;
use watermark_api_client::endpoints::WatermarkApi;
use watermark_core::config::ConfigSchema;
use watermark_core::{RequestState, Slot};
use watermark_image::{HeicDecoder, TranscodeOptions};

/// Home screen state.
pub struct Page {
    state: RequestState,
    photo_zone: UploadZone,
    watermark_zone: UploadZone,
    download_zone: DownloadZone,
}

impl Default for Page {
    fn default() -> Self {
        Self::from_config(&ConfigSchema::default())
    }
}

impl Page {
    /// Page wired from configuration
    pub fn from_config(config: &ConfigSchema) -> Self {
        let transcode = TranscodeOptions {
            quality: config.intake.jpeg_quality,
        };

        Self {
            state: RequestState::new(),
            photo_zone: UploadZone::new(Slot::Photo).with_transcode_options(transcode),
            watermark_zone: UploadZone::new(Slot::Watermark).with_transcode_options(transcode),
            download_zone: DownloadZone::from_config(&config.download),
        }
    }

    /// Use `decoder` for HEIC files in both zones
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn HeicDecoder>) -> Self {
        self.photo_zone = self.photo_zone.with_decoder(Arc::clone(&decoder));
        self.watermark_zone = self.watermark_zone.with_decoder(decoder);
        self
    }

    /// Replace the download zone
    #[must_use]
    pub fn with_download_zone(mut self, zone: DownloadZone) -> Self {
        self.download_zone = zone;
        self
    }

    /// Drop entries onto the zone for `slot`
    pub async fn drop_files(
        &mut self,
        slot: Slot,
        entries: Vec<DropEntry>,
    ) -> Result<(), IntakeError> {
        let zone = match slot {
            Slot::Photo => &mut self.photo_zone,
            Slot::Watermark => &mut self.watermark_zone,
        };
        zone.on_file_drop(entries, &mut self.state).await
    }

    /// Request the watermark and save it
    pub async fn download(&mut self, api: &WatermarkApi) -> Result<PathBuf, DownloadError> {
        self.download_zone.download(api, &self.state).await
    }

    /// Upload zone for `slot`
    pub fn zone(&self, slot: Slot) -> &UploadZone {
        match slot {
            Slot::Photo => &self.photo_zone,
            Slot::Watermark => &self.watermark_zone,
        }
    }

    /// Download zone
    pub fn download_zone(&self) -> &DownloadZone {
        &self.download_zone
    }

    /// Shared request state
    pub fn state(&self) -> &RequestState {
        &self.state
    }
}
