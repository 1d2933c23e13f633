//! Data-URL previews.

use crate::{ImageError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use watermark_core::MediaFile;

/// Encode a file as `data:<mime>;base64,<content>`.
///
/// Empty files have nothing to preview and are rejected.
pub fn data_url(file: &MediaFile) -> Result<String> {
    if file.data.is_empty() {
        return Err(ImageError::InvalidData(format!("{} is empty", file.name)));
    }

    let mime = if file.mime_type.is_empty() {
        "application/octet-stream"
    } else {
        file.mime_type.as_str()
    };

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&file.data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let file = MediaFile::new("dot.png", "image/png", b"hi!".to_vec());
        assert_eq!(data_url(&file).unwrap(), "data:image/png;base64,aGkh");
    }

    #[test]
    fn test_data_url_without_mime() {
        let file = MediaFile::new("blob", "", vec![0xff]);
        assert!(data_url(&file)
            .unwrap()
            .starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_empty_file_has_no_preview() {
        let file = MediaFile::new("empty.png", "image/png", Vec::new());
        assert!(matches!(data_url(&file), Err(ImageError::InvalidData(_))));
    }
}
