//! Shared test utilities: synthetic image fixtures.
//!
//! Every fixture is generated on the fly into the caller's temp directory, so
//! tests never depend on binary files checked into the repository.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("photo.jpg"), 80, 60);
//! create_test_exr(&tmp.path().join("render.exr"), 32, 16);
//! ```

use crate::imaging::RgbChannels;
use crate::imaging::hdr::write_rgb_channels;
use exr::prelude::{
    AnyChannel, AnyChannels, Encoding, FlatSamples, Image, ImageAttributes, IntegerBounds, Layer,
    LayerAttributes, WritableImage,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Write an 8-bit RGB JPEG with a diagonal gradient.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    img.save(path).unwrap();
}

/// Write an 8-bit RGBA PNG with a checkerboard and an alpha ramp.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let v = if (x / 4 + y / 4) % 2 == 0 { 230 } else { 25 };
        Rgba([v, v, v, (x * 255 / width.max(1)) as u8])
    });
    img.save(path).unwrap();
}

/// Write a float32 RGB EXR whose samples run well above 1.0.
pub fn create_test_exr(path: &Path, width: usize, height: usize) {
    let mut channels = RgbChannels::blank(width, height);
    for y in 0..height {
        for x in 0..width {
            let t = x as f32 / width.max(1) as f32;
            channels.set_pixel(x, y, (t * 8.0, 0.5 + y as f32 * 0.1, 2.5));
        }
    }
    write_rgb_channels(path, &channels).unwrap();
}

fn flat_channel(name: &str, side: usize, value: f32) -> AnyChannel<FlatSamples> {
    AnyChannel::new(name, FlatSamples::F32(vec![value; side * side]))
}

fn depth_layer() -> Layer<AnyChannels<FlatSamples>> {
    Layer::new(
        (4, 4),
        LayerAttributes::named("depth"),
        Encoding::FAST_LOSSLESS,
        AnyChannels::sort(vec![flat_channel("Z", 4, 10.0)].into()),
    )
}

/// Write an EXR whose first layer is a 4×4 depth pass (Z only), followed by
/// an 8×8 "beauty" layer with flat R = 0.5, G = 1.5, B = 2.5.
pub fn create_layered_exr(path: &Path) {
    let beauty = Layer::new(
        (8, 8),
        LayerAttributes::named("beauty"),
        Encoding::FAST_LOSSLESS,
        AnyChannels::sort(
            vec![
                flat_channel("R", 8, 0.5),
                flat_channel("G", 8, 1.5),
                flat_channel("B", 8, 2.5),
            ]
            .into(),
        ),
    );
    let image = Image::from_layers(
        ImageAttributes::new(IntegerBounds::from_dimensions((8, 8))),
        vec![depth_layer(), beauty],
    );
    image.write().to_file(path).unwrap();
}

/// Write an EXR with a single depth layer and no colour channels.
pub fn create_depth_only_exr(path: &Path) {
    let image = Image::from_layers(
        ImageAttributes::new(IntegerBounds::from_dimensions((4, 4))),
        vec![depth_layer()],
    );
    image.write().to_file(path).unwrap();
}

/// Write a file with a recognized extension but undecodable contents.
pub fn create_corrupt_image(path: &Path) {
    std::fs::write(path, b"definitely not image data").unwrap();
}
