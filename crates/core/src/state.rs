//! Request state shared between upload zones and the download zone

use crate::media::MediaFile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which input an upload zone feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// The base photo
    Photo,
    /// The watermark image laid over the photo
    Watermark,
}

impl Slot {
    /// All slots, in form order
    pub const ALL: [Slot; 2] = [Slot::Photo, Slot::Watermark];

    /// Multipart field name for this slot
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Photo => "photo",
            Slot::Watermark => "watermark",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" => Ok(Slot::Photo),
            "watermark" => Ok(Slot::Watermark),
            other => Err(crate::Error::invalid_config_value(
                "slot",
                format!("expected `photo` or `watermark`, got `{other}`"),
            )),
        }
    }
}

/// Holds at most one photo and one watermark.
///
/// Slots are independent: setting one never touches the other.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    photo: Option<MediaFile>,
    watermark: Option<MediaFile>,
}

impl RequestState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a file, replacing whatever the slot held
    pub fn set(&mut self, slot: Slot, file: MediaFile) {
        match slot {
            Slot::Photo => self.photo = Some(file),
            Slot::Watermark => self.watermark = Some(file),
        }
    }

    /// Read a slot
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&MediaFile> {
        match slot {
            Slot::Photo => self.photo.as_ref(),
            Slot::Watermark => self.watermark.as_ref(),
        }
    }

    /// The photo, if set
    #[must_use]
    pub fn photo(&self) -> Option<&MediaFile> {
        self.photo.as_ref()
    }

    /// The watermark, if set
    #[must_use]
    pub fn watermark(&self) -> Option<&MediaFile> {
        self.watermark.as_ref()
    }

    /// Whether both slots are populated
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.photo.is_some() && self.watermark.is_some()
    }

    /// Borrow both files, or name the first empty slot
    pub fn pair(&self) -> std::result::Result<(&MediaFile, &MediaFile), Slot> {
        let photo = self.photo.as_ref().ok_or(Slot::Photo)?;
        let watermark = self.watermark.as_ref().ok_or(Slot::Watermark)?;
        Ok((photo, watermark))
    }
}
