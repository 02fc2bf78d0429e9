//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides output dimensions and which pixel path to take) and the
//! [`backend`](super::backend) (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`ScaleFactor`]: Positive, finite multiplier applied to both axes.
//! - [`Sharpening`]: Unsharp-mask parameters (radius, percent, threshold).
//! - [`ImageTask`]: One input file, one output file, and the user's choices.
//! - [`ResizeParams`]: Everything one backend resize call needs.

use std::fmt;
use std::path::PathBuf;

/// Multiplier applied to width and height. Always finite and `> 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Returns `None` for zero, negative, NaN or infinite values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(2.0)
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Sharpening parameters for unsharp mask.
///
/// - `radius`: Standard deviation of the Gaussian blur, in pixels
/// - `percent`: How much of the (original - blurred) difference is added back
/// - `threshold`: Minimum difference, in 8-bit levels, before a sample is touched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpening {
    pub radius: f32,
    pub percent: u32,
    pub threshold: i32,
}

impl Sharpening {
    /// Radius 2, 150 %, threshold 3.
    pub fn standard() -> Self {
        Self {
            radius: 2.0,
            percent: 150,
            threshold: 3,
        }
    }
}

impl Default for Sharpening {
    fn default() -> Self {
        Self::standard()
    }
}

/// One file to upscale.
///
/// `sharpen_intensity` travels with the task so front ends can pass their
/// value through unchanged; the mask strength comes from `sharpening`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTask {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub scale_factor: ScaleFactor,
    pub apply_sharpen: bool,
    pub sharpen_intensity: f64,
    pub sharpening: Sharpening,
}

/// Parameters for a single resize call on the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub sharpening: Option<Sharpening>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factor_rejects_non_positive() {
        assert!(ScaleFactor::new(0.0).is_none());
        assert!(ScaleFactor::new(-1.5).is_none());
        assert!(ScaleFactor::new(f64::NAN).is_none());
        assert!(ScaleFactor::new(f64::INFINITY).is_none());
        assert_eq!(ScaleFactor::new(0.5).unwrap().value(), 0.5);
    }

    #[test]
    fn scale_factor_default_is_2() {
        assert_eq!(ScaleFactor::default().value(), 2.0);
        assert_eq!(ScaleFactor::default().to_string(), "2x");
    }

    #[test]
    fn sharpening_standard_values() {
        let s = Sharpening::standard();
        assert_eq!(s.radius, 2.0);
        assert_eq!(s.percent, 150);
        assert_eq!(s.threshold, 3);
        assert_eq!(Sharpening::default(), s);
    }
}
