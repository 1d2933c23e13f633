//! File intake
//!
//! An upload zone accepts one dropped file for one slot. HEIC files are
//! converted to JPEG first. On success the file goes into the zone and into
//! the shared request state, and a data-URL preview is built in the
//! background. Failures set a user-facing message and leave the request state
//! as it was.

use crate::error::IntakeError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use watermark_core::{MediaFile, RequestState, Slot};
use watermark_image::{data_url, default_decoder, heic_to_jpeg, HeicDecoder, TranscodeOptions};

/// One dropped item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropEntry {
    /// A regular file
    File(PathBuf),
    /// A directory
    Directory(PathBuf),
}

impl DropEntry {
    /// Classify `path` by looking at the filesystem
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        Ok(if metadata.is_dir() {
            Self::Directory(path.to_path_buf())
        } else {
            Self::File(path.to_path_buf())
        })
    }

    /// Path of the entry
    pub fn path(&self) -> &Path {
        match self {
            Self::File(p) | Self::Directory(p) => p,
        }
    }
}

/// Intake for a single slot.
pub struct UploadZone {
    slot: Slot,
    decoder: Arc<dyn HeicDecoder>,
    transcode: TranscodeOptions,
    file: Option<MediaFile>,
    file_preview: Option<String>,
    error: Option<String>,
}

impl UploadZone {
    /// Zone feeding `slot`, using the best HEIC decoder this build has
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            decoder: default_decoder(),
            transcode: TranscodeOptions::default(),
            file: None,
            file_preview: None,
            error: None,
        }
    }

    /// Use a specific HEIC decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn HeicDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Use specific transcoding options
    #[must_use]
    pub fn with_transcode_options(mut self, options: TranscodeOptions) -> Self {
        self.transcode = options;
        self
    }

    /// Slot this zone feeds
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Last accepted file
    pub fn file(&self) -> Option<&MediaFile> {
        self.file.as_ref()
    }

    /// Data URL of the last accepted file
    pub fn file_preview(&self) -> Option<&str> {
        self.file_preview.as_deref()
    }

    /// Message to show, if the last drop failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handle a drop.
    ///
    /// Rejects anything but a single file. On success the file is stored in
    /// this zone and in `state`; a preview failure after that point is
    /// reported but does not undo the store.
    pub async fn on_file_drop(
        &mut self,
        entries: Vec<DropEntry>,
        state: &mut RequestState,
    ) -> Result<(), IntakeError> {
        let path = match entries.as_slice() {
            [DropEntry::File(path)] => path.clone(),
            [DropEntry::Directory(path)] => {
                return self.fail(IntakeError::NotAFile { path: path.clone() })
            }
            _ => {
                return self.fail(IntakeError::DropCardinality {
                    count: entries.len(),
                })
            }
        };

        let mut file = match read_media(&path).await {
            Ok(file) => file,
            Err(source) => return self.fail(IntakeError::Read { path, source }),
        };

        if file.is_heic() {
            file = match self.transcode(file).await {
                Ok(jpeg) => jpeg,
                Err(err) => return self.fail(err),
            };
        }

        info!(slot = %self.slot, name = %file.name, size = file.size(), "File accepted");

        state.set(self.slot, file.clone());
        self.file = Some(file.clone());

        let preview = tokio::task::spawn_blocking(move || data_url(&file)).await;
        match preview {
            Ok(Ok(url)) => {
                self.file_preview = Some(url);
                self.error = None;
                Ok(())
            }
            Ok(Err(err)) => self.fail(IntakeError::Preview(err)),
            Err(join) => self.fail(IntakeError::Interrupted(join)),
        }
    }

    async fn transcode(&self, file: MediaFile) -> Result<MediaFile, IntakeError> {
        let decoder = Arc::clone(&self.decoder);
        let options = self.transcode;

        tokio::task::spawn_blocking(move || heic_to_jpeg(&file, decoder.as_ref(), &options))
            .await?
            .map_err(IntakeError::Transcode)
    }

    fn fail(&mut self, err: IntakeError) -> Result<(), IntakeError> {
        warn!(slot = %self.slot, error = %err, "Drop rejected");
        self.error = Some(err.user_message().to_string());
        Err(err)
    }
}

/// Read a file the way a browser hands one over: name, guessed type, mtime.
pub async fn read_media(path: &Path) -> std::io::Result<MediaFile> {
    let data = tokio::fs::read(path).await?;
    let modified = tokio::fs::metadata(path).await?.modified()?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Ok(MediaFile::new(name, mime.essence_str(), data)
        .with_last_modified(DateTime::<Utc>::from(modified)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LOAD_FAILED, NOT_A_FILE, SINGLE_FILE_ONLY};
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use watermark_image::ImageError;

    struct FakeHeic;

    impl HeicDecoder for FakeHeic {
        fn decode(&self, _data: &[u8]) -> watermark_image::Result<DynamicImage> {
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([0, 90, 200]))))
        }
    }

    struct BrokenHeic;

    impl HeicDecoder for BrokenHeic {
        fn decode(&self, _data: &[u8]) -> watermark_image::Result<DynamicImage> {
            Err(ImageError::HeicDecode("corrupt container".into()))
        }
    }

    fn png_bytes() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn write(dir: &Path, name: &str, data: &[u8]) -> DropEntry {
        let path = dir.join(name);
        std::fs::write(&path, data).unwrap();
        DropEntry::File(path)
    }

    #[tokio::test]
    async fn test_drop_entry_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write(dir.path(), "a.png", b"x");

        assert_eq!(DropEntry::from_path(entry.path()).await.unwrap(), entry);
        assert_eq!(
            DropEntry::from_path(dir.path()).await.unwrap(),
            DropEntry::Directory(dir.path().to_path_buf())
        );
        assert!(DropEntry::from_path(dir.path().join("missing")).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_drop_is_rejected() {
        let mut zone = UploadZone::new(Slot::Photo);
        let mut state = RequestState::new();

        let err = zone.on_file_drop(Vec::new(), &mut state).await.unwrap_err();

        assert!(matches!(err, IntakeError::DropCardinality { count: 0 }));
        assert_eq!(zone.error(), Some(SINGLE_FILE_ONLY));
        assert!(state.photo().is_none());
        assert!(zone.file().is_none());
    }

    #[tokio::test]
    async fn test_multiple_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = UploadZone::new(Slot::Watermark);
        let mut state = RequestState::new();

        let entries = vec![
            write(dir.path(), "a.png", &png_bytes()),
            write(dir.path(), "b.png", &png_bytes()),
        ];
        let err = zone.on_file_drop(entries, &mut state).await.unwrap_err();

        assert!(matches!(err, IntakeError::DropCardinality { count: 2 }));
        assert_eq!(zone.error(), Some(SINGLE_FILE_ONLY));
        assert!(state.watermark().is_none());
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = UploadZone::new(Slot::Photo);
        let mut state = RequestState::new();

        let entries = vec![DropEntry::Directory(dir.path().to_path_buf())];
        let err = zone.on_file_drop(entries, &mut state).await.unwrap_err();

        assert!(matches!(err, IntakeError::NotAFile { .. }));
        assert_eq!(zone.error(), Some(NOT_A_FILE));
        assert!(state.photo().is_none());
    }

    #[tokio::test]
    async fn test_png_passes_through_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data = png_bytes();
        let mut zone = UploadZone::new(Slot::Photo);
        let mut state = RequestState::new();

        zone.on_file_drop(vec![write(dir.path(), "beach.png", &data)], &mut state)
            .await
            .unwrap();

        let stored = state.photo().unwrap();
        assert_eq!(stored.name, "beach.png");
        assert_eq!(stored.mime_type, "image/png");
        assert_eq!(stored.data, data);
        assert_eq!(zone.file(), Some(stored));
        assert!(zone.file_preview().unwrap().starts_with("data:image/png;base64,"));
        assert!(zone.error().is_none());
    }

    #[tokio::test]
    async fn test_heic_is_transcoded_before_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = UploadZone::new(Slot::Photo).with_decoder(Arc::new(FakeHeic));
        let mut state = RequestState::new();

        zone.on_file_drop(vec![write(dir.path(), "x.heic", b"heic-ish")], &mut state)
            .await
            .unwrap();

        let stored = state.photo().unwrap();
        assert_eq!(stored.name, "x.jpg");
        assert_eq!(stored.mime_type, "image/jpeg");
        assert_eq!(&stored.data[..3], &[0xFF, 0xD8, 0xFF]);
        assert!(zone.file_preview().unwrap().starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_name_that_is_only_a_heic_suffix_is_transcoded() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = UploadZone::new(Slot::Watermark).with_decoder(Arc::new(FakeHeic));
        let mut state = RequestState::new();

        zone.on_file_drop(vec![write(dir.path(), ".heic", b"heic-ish")], &mut state)
            .await
            .unwrap();

        let stored = state.watermark().unwrap();
        assert_eq!(stored.name, ".jpg");
        assert_eq!(stored.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_failed_transcode_leaves_state_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = UploadZone::new(Slot::Photo).with_decoder(Arc::new(BrokenHeic));
        let mut state = RequestState::new();

        let err = zone
            .on_file_drop(vec![write(dir.path(), "x.HEIC", b"junk")], &mut state)
            .await
            .unwrap_err();

        assert!(matches!(err, IntakeError::Transcode(_)));
        assert_eq!(zone.error(), Some(LOAD_FAILED));
        assert!(state.photo().is_none());
        assert!(zone.file().is_none());
    }

    #[tokio::test]
    async fn test_empty_file_is_stored_but_has_no_preview() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = UploadZone::new(Slot::Watermark);
        let mut state = RequestState::new();

        let err = zone
            .on_file_drop(vec![write(dir.path(), "logo.png", b"")], &mut state)
            .await
            .unwrap_err();

        assert!(matches!(err, IntakeError::Preview(_)));
        assert_eq!(zone.error(), Some(LOAD_FAILED));
        assert!(state.watermark().is_some());
        assert!(zone.file_preview().is_none());
    }

    #[tokio::test]
    async fn test_new_drop_replaces_only_its_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut photos = UploadZone::new(Slot::Photo);
        let mut marks = UploadZone::new(Slot::Watermark);
        let mut state = RequestState::new();

        marks
            .on_file_drop(vec![write(dir.path(), "logo.png", &png_bytes())], &mut state)
            .await
            .unwrap();
        photos
            .on_file_drop(vec![write(dir.path(), "one.png", &png_bytes())], &mut state)
            .await
            .unwrap();
        photos
            .on_file_drop(vec![write(dir.path(), "two.png", &png_bytes())], &mut state)
            .await
            .unwrap();

        assert_eq!(state.photo().unwrap().name, "two.png");
        assert_eq!(state.watermark().unwrap().name, "logo.png");
    }

    #[tokio::test]
    async fn test_successful_drop_clears_previous_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = UploadZone::new(Slot::Photo);
        let mut state = RequestState::new();

        let _ = zone.on_file_drop(Vec::new(), &mut state).await;
        assert!(zone.error().is_some());

        zone.on_file_drop(vec![write(dir.path(), "a.png", &png_bytes())], &mut state)
            .await
            .unwrap();
        assert!(zone.error().is_none());
    }
}
