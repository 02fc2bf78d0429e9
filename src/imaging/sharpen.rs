//! Unsharp mask with an adjustable amount.
//!
//! `image::imageops::unsharpen` always adds back exactly 100 % of the
//! difference. This version takes a percentage, and works on any pixel type:
//! the threshold is given in 8-bit levels and rescaled to the subpixel range.

use super::params::Sharpening;
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Primitive, imageops};
use num_traits::NumCast;

/// Sharpen a single buffer.
///
/// For every sample: `diff = original - blurred`; if `|diff| >= threshold`
/// the output is `original + diff * percent / 100`, clamped to the subpixel
/// range. Otherwise the original sample is kept.
pub fn unsharp_mask<I, P, S>(image: &I, mask: Sharpening) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let blurred = imageops::blur(image, mask.radius);

    let max = S::DEFAULT_MAX_VALUE.to_f32().unwrap_or(1.0);
    let min = S::DEFAULT_MIN_VALUE.to_f32().unwrap_or(0.0);
    let threshold = mask.threshold as f32 * max / 255.0;
    let amount = mask.percent as f32 / 100.0;
    // float subpixels are normalized to [0, 1]; integers need rounding
    let is_float = max == 1.0;

    let (width, height) = image.dimensions();
    let mut out = ImageBuffer::new(width, height);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let original = image.get_pixel(x, y);
        *pixel = original.map2(blurred.get_pixel(x, y), |o, b| {
            let (Some(of), Some(bf)) = (o.to_f32(), b.to_f32()) else {
                return o;
            };
            let diff = of - bf;
            if diff.abs() < threshold {
                return o;
            }
            let sharpened = (of + diff * amount).clamp(min, max);
            let sharpened = if is_float { sharpened } else { sharpened.round() };
            <S as NumCast>::from(sharpened).unwrap_or(o)
        });
    }
    out
}

/// Sharpen a decoded image, keeping its pixel layout.
pub fn sharpen_image(img: &DynamicImage, mask: Sharpening) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(unsharp_mask(buf, mask)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(unsharp_mask(buf, mask)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(unsharp_mask(buf, mask)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(unsharp_mask(buf, mask)),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(unsharp_mask(buf, mask)),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(unsharp_mask(buf, mask)),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(unsharp_mask(buf, mask)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(unsharp_mask(buf, mask)),
        DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(unsharp_mask(buf, mask)),
        DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(unsharp_mask(buf, mask)),
        other => DynamicImage::ImageRgba32F(unsharp_mask(&other.to_rgba32f(), mask)),
    }
}
