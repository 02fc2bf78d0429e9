//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take an [`ImageTask`], work out the output size and the pixel path,
//! and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{MAX_OUTPUT_EDGE, scaled_dimensions};
use super::kind::ImageKind;
use super::params::{ImageTask, ResizeParams};
use log::debug;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// What a finished transform produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOutcome {
    pub kind: ImageKind,
    pub source: Dimensions,
    pub output: Dimensions,
}

/// Plan the backend call for a task without executing it.
///
/// Sharpening is only planned for standard bitmaps; EXR channels are never
/// sharpened. Fails with `TooLarge` when either output edge would exceed
/// [`MAX_OUTPUT_EDGE`].
pub fn plan_resize(
    task: &ImageTask,
    kind: ImageKind,
    source: Dimensions,
) -> Result<ResizeParams> {
    let (width, height) =
        scaled_dimensions(source.into(), task.scale_factor).ok_or_else(|| {
            BackendError::TooLarge(format!(
                "{}: {}x{} at {} exceeds {} px per edge",
                task.input_path.display(),
                source.width,
                source.height,
                task.scale_factor,
                MAX_OUTPUT_EDGE
            ))
        })?;
    let sharpening = match kind {
        ImageKind::Standard if task.apply_sharpen => Some(task.sharpening),
        _ => None,
    };

    Ok(ResizeParams {
        source: task.input_path.clone(),
        output: task.output_path.clone(),
        width,
        height,
        sharpening,
    })
}

/// Upscale one file.
///
/// Fails with `UnsupportedFormat` before touching the file system when the
/// input extension is not recognized.
pub fn transform(backend: &impl ImageBackend, task: &ImageTask) -> Result<TransformOutcome> {
    let kind = ImageKind::classify(&task.input_path)?;
    let source = backend.identify(&task.input_path)?;
    let params = plan_resize(task, kind, source)?;

    if task.apply_sharpen {
        match kind {
            ImageKind::Hdr => debug!(
                "{}: sharpening is not applied to EXR channels",
                task.input_path.display()
            ),
            ImageKind::Standard => debug!(
                "{}: sharpen intensity {} requested, using fixed mask",
                task.input_path.display(),
                task.sharpen_intensity
            ),
        }
    }

    match kind {
        ImageKind::Hdr => backend.resize_hdr(&params)?,
        ImageKind::Standard => backend.resize(&params)?,
    }

    Ok(TransformOutcome {
        kind,
        source,
        output: Dimensions::new(params.width, params.height),
    })
}
