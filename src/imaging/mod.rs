//! Image processing for a single file, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions`, `exr::meta::MetaData` |
//! | **Resize bitmap** | `resize_exact` with Lanczos3 |
//! | **Resize EXR** | per-channel separable Lanczos-3 (no clamping) |
//! | **Sharpen** | unsharp mask, radius 2 / 150 % / threshold 3 |
//!
//! The module is split into:
//! - **Classification**: [`ImageKind`] decides the pixel path from the extension
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`transform`] combines the above for one file

pub mod backend;
mod calculations;
pub mod hdr;
mod kind;
pub mod operations;
mod params;
pub mod resample;
pub mod rust_backend;
pub mod sharpen;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{MAX_OUTPUT_EDGE, scale_edge, scaled_dimensions};
pub use kind::{ImageKind, RECOGNIZED_EXTENSIONS, is_recognized};
pub use operations::{TransformOutcome, plan_resize, transform};
pub use params::{ImageTask, ResizeParams, ScaleFactor, Sharpening};
pub use resample::{ChannelBuffer, RgbChannels};
pub use rust_backend::RustBackend;
