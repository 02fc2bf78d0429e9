//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::ScaleFactor;

/// Largest output edge, in pixels. JPEG cannot store more, and anything
/// bigger would not fit in memory as a decoded buffer anyway.
pub const MAX_OUTPUT_EDGE: u32 = 65_535;

/// Scale one edge, rounding half away from zero. Never returns 0.
///
/// Returns `None` when the result exceeds [`MAX_OUTPUT_EDGE`].
pub fn scale_edge(edge: u32, scale: ScaleFactor) -> Option<u32> {
    let scaled = (edge as f64 * scale.value()).round().max(1.0);
    (scaled <= MAX_OUTPUT_EDGE as f64).then_some(scaled as u32)
}

/// Calculate output dimensions for a uniform scale factor.
///
/// # Examples
/// ```
/// # use upres::imaging::{ScaleFactor, scaled_dimensions};
/// let two = ScaleFactor::new(2.0).unwrap();
/// assert_eq!(scaled_dimensions((800, 600), two), Some((1600, 1200)));
///
/// let third = ScaleFactor::new(1.0 / 3.0).unwrap();
/// assert_eq!(scaled_dimensions((100, 50), third), Some((33, 17)));
///
/// let absurd = ScaleFactor::new(1e9).unwrap();
/// assert_eq!(scaled_dimensions((800, 600), absurd), None);
/// ```
pub fn scaled_dimensions(source: (u32, u32), scale: ScaleFactor) -> Option<(u32, u32)> {
    let (w, h) = source;
    Some((scale_edge(w, scale)?, scale_edge(h, scale)?))
}
