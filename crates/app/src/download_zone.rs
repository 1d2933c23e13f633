//! Result download
//!
//! Sends the watermark request and saves the returned image under a fixed
//! name. The body is staged in a temporary file next to the target, which is
//! renamed into place once fully written. A temporary file that is never
//! persisted is removed when dropped.

use crate::error::DownloadError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use watermark_api_client::endpoints::WatermarkApi;
use watermark_core::config::DownloadConfig;
use watermark_core::RequestState;

/// Default name of the saved result
pub const DEFAULT_FILENAME: &str = "watermarked.png";

/// Trigger for the watermark request.
#[derive(Debug, Clone)]
pub struct DownloadZone {
    is_loading: bool,
    filename: String,
    output_dir: PathBuf,
}

impl Default for DownloadZone {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME, ".")
    }
}

impl DownloadZone {
    /// Zone that saves to `output_dir/filename`
    pub fn new(filename: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            is_loading: false,
            filename: filename.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Zone built from the `[download]` config section
    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(config.filename.clone(), config.output_dir.clone())
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Name the result is saved under
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Full path the result is saved to
    pub fn target(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }

    /// Request the watermarked image and save it.
    ///
    /// Nothing is sent if either slot is empty. The loading flag is set for
    /// the duration of the request and cleared whatever the outcome.
    pub async fn download(
        &mut self,
        api: &WatermarkApi,
        state: &RequestState,
    ) -> Result<PathBuf, DownloadError> {
        self.is_loading = true;
        let result = self.fetch_and_save(api, state).await;
        self.is_loading = false;
        result
    }

    async fn fetch_and_save(
        &self,
        api: &WatermarkApi,
        state: &RequestState,
    ) -> Result<PathBuf, DownloadError> {
        let body = api.watermark(state).await?;
        debug!(bytes = body.len(), "Watermark response received");

        let dir = self.output_dir.clone();
        let target = self.target();

        let saved = tokio::task::spawn_blocking(move || save(&dir, &target, &body)).await??;
        info!(path = %saved.display(), "Watermarked image saved");
        Ok(saved)
    }
}

/// Response body staged on disk until it is handed to its final name.
struct ObjectUrl {
    file: NamedTempFile,
}

impl ObjectUrl {
    fn create(dir: &Path, data: &[u8]) -> std::io::Result<Self> {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(Self { file })
    }

    fn persist(self, target: &Path) -> std::io::Result<PathBuf> {
        self.file.persist(target).map_err(|e| e.error)?;
        Ok(target.to_path_buf())
    }
}

fn save(dir: &Path, target: &Path, data: &[u8]) -> Result<PathBuf, DownloadError> {
    let wrap = |source| DownloadError::Save {
        path: target.to_path_buf(),
        source,
    };

    ObjectUrl::create(dir, data)
        .and_then(|url| url.persist(target))
        .map_err(wrap)
}
