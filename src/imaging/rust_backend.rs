//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, TIFF, BMP, GIF) | `image` crate (pure Rust decoders) |
//! | Decode / encode (EXR) | `exr` crate, see [`hdr`](super::hdr) |
//! | Resize (bitmaps) | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Resize (EXR channels) | separable Lanczos-3, see [`resample`](super::resample) |
//! | Sharpening | unsharp mask, see [`sharpen`](super::sharpen) |
//! | Encode (bitmaps) | `DynamicImage::save`, format from the output extension |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::hdr::{identify_exr, read_rgb_channels, write_rgb_channels};
use super::kind::ImageKind;
use super::params::ResizeParams;
use super::sharpen::sharpen_image;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader};
use log::debug;
use std::io;
use std::path::Path;

/// Pure Rust backend using the `image` and `exr` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an `image` decode error.
///
/// The file is already open at this point, so running out of bytes or
/// hitting malformed data means the content is broken, not the file system.
fn decode_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(e)
            if matches!(
                e.kind(),
                io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData
            ) =>
        {
            BackendError::Decode(format!("{}: {}", path.display(), e))
        }
        ImageError::IoError(e) => BackendError::Io(e),
        other => BackendError::Decode(format!("{}: {}", path.display(), other)),
    }
}

fn encode_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(e) => BackendError::Io(e),
        other => BackendError::Encode(format!("{}: {}", path.display(), other)),
    }
}

/// Load and decode a bitmap from disk, format chosen by extension.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| decode_error(path, e))
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    img.save(path).map_err(|e| encode_error(path, e))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        if ImageKind::classify(path)? == ImageKind::Hdr {
            return identify_exr(path);
        }
        let (width, height) = image::image_dimensions(path).map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);

        let final_img = if let Some(sharpening) = params.sharpening {
            debug!(
                "sharpening {} (radius {}, {}%, threshold {})",
                params.output.display(),
                sharpening.radius,
                sharpening.percent,
                sharpening.threshold
            );
            sharpen_image(&resized, sharpening)
        } else {
            resized
        };

        save_image(&final_img, &params.output)
    }

    fn resize_hdr(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let channels = read_rgb_channels(&params.source)?;
        let resized = channels.resample(params.width as usize, params.height as usize);
        write_rgb_channels(&params.output, &resized)
    }
}
