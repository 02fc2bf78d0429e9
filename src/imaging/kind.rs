//! Extension-based classification of input files.
//!
//! Classification never looks at file content: `render.exr` takes the float
//! channel path even if the bytes are garbage (it then fails to decode).

use super::backend::BackendError;
use serde::Serialize;
use std::path::Path;

/// Extensions the batch runner picks up, lowercase.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "gif", "exr"];

/// Which pixel path a file takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Three-channel 32-bit float OpenEXR.
    Hdr,
    /// Anything the `image` crate decodes into a bitmap.
    Standard,
}

impl ImageKind {
    /// Map an extension, in any letter case, to its kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if !RECOGNIZED_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        Some(if ext == "exr" { Self::Hdr } else { Self::Standard })
    }

    /// Classify a path, failing with `UnsupportedFormat` for anything outside
    /// [`RECOGNIZED_EXTENSIONS`].
    pub fn classify(path: &Path) -> Result<Self, BackendError> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| BackendError::UnsupportedFormat(path.display().to_string()))
    }
}

/// True when the file name carries one of the recognized extensions.
pub fn is_recognized(path: &Path) -> bool {
    ImageKind::classify(path).is_ok()
}
