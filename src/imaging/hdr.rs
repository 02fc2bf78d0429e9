//! OpenEXR channel I/O via the `exr` crate.
//!
//! Only the first layer with R, G and B channels is read; alpha (if present)
//! is dropped. Samples are converted to f32 on read whatever their stored
//! type (f16, f32, u32). Output files get a single RGB float32 layer whose
//! data window starts at the origin.

use super::backend::{BackendError, Dimensions};
use super::resample::RgbChannels;
use exr::meta::header::Header;
use exr::prelude::{MetaData, Vec2, read_first_rgba_layer_from_file, write_rgb_file};
use std::path::Path;

/// Map an `exr` read error: I/O stays I/O, everything else is a decode failure.
fn read_error(path: &Path, err: exr::error::Error) -> BackendError {
    match err {
        exr::error::Error::Io(e) => BackendError::Io(e),
        other => BackendError::Decode(format!("{}: {}", path.display(), other)),
    }
}

fn write_error(path: &Path, err: exr::error::Error) -> BackendError {
    match err {
        exr::error::Error::Io(e) => BackendError::Io(e),
        other => BackendError::Encode(format!("{}: {}", path.display(), other)),
    }
}

/// True when the layer has R, G and B channels, the ones the pixel reader needs.
fn has_rgb_channels(header: &Header) -> bool {
    ["R", "G", "B"].iter().all(|wanted| {
        header
            .channels
            .list
            .iter()
            .any(|channel| channel.name.to_string().eq_ignore_ascii_case(wanted))
    })
}

/// Read the data window extent of the first RGB layer without decoding pixels.
///
/// Layers without R, G and B (depth, masks) are skipped, matching what
/// [`read_rgb_channels`] decodes.
pub fn identify_exr(path: &Path) -> Result<Dimensions, BackendError> {
    let meta = MetaData::read_from_file(path, false).map_err(|e| read_error(path, e))?;
    let header = meta
        .headers
        .iter()
        .find(|header| has_rgb_channels(header))
        .ok_or_else(|| BackendError::Decode(format!("{}: no RGB layer", path.display())))?;
    let size = header.layer_size;
    Ok(Dimensions {
        width: size.width() as u32,
        height: size.height() as u32,
    })
}

/// Decode the R, G and B channels of the first RGB layer into float grids.
pub fn read_rgb_channels(path: &Path) -> Result<RgbChannels, BackendError> {
    let image = read_first_rgba_layer_from_file(
        path,
        |resolution: Vec2<usize>, _| RgbChannels::blank(resolution.width(), resolution.height()),
        |grids: &mut RgbChannels, position: Vec2<usize>, (r, g, b, _a): (f32, f32, f32, f32)| {
            grids.set_pixel(position.x(), position.y(), (r, g, b));
        },
    )
    .map_err(|e| read_error(path, e))?;

    Ok(image.layer_data.channel_data.pixels)
}

/// Encode three float grids as an RGB float32 EXR.
pub fn write_rgb_channels(path: &Path, channels: &RgbChannels) -> Result<(), BackendError> {
    write_rgb_file(path, channels.width(), channels.height(), |x, y| {
        channels.pixel(x, y)
    })
    .map_err(|e| write_error(path, e))
}
