//! # upres
//!
//! Batch upscaling for a directory of images. Every recognized image directly
//! inside an input directory is resized by one scale factor and written to an
//! output directory under the same file name.
//!
//! # Two Pixel Paths
//!
//! ```text
//! photo.jpg   →  decode  →  Lanczos3 resize  →  [unsharp mask]  →  encode (same format)
//! render.exr  →  R, G, B float grids  →  Lanczos-3 per channel  →  RGB float32 EXR
//! ```
//!
//! The path is chosen from the file extension alone. EXR channels keep their
//! full float range: values above 1.0 are not clamped, and sharpening is never
//! applied to them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | One file: classify, identify, resize, sharpen, encode |
//! | [`batch`] | One directory: listing, output directory, error policy, progress |
//! | [`config`] | Optional `upres.toml` loading and validation |
//! | [`output`] | CLI output formatting for plans, progress and summaries |
//!
//! # Design Decisions
//!
//! ## Sequential and Synchronous
//!
//! Files are processed one at a time, in file-name order, and progress is
//! reported from the same loop. A run is deterministic: the same input
//! directory always produces the same output files in the same order.
//!
//! ## Abort by Default
//!
//! The first failing file stops the batch. Outputs already written stay on
//! disk; nothing is rolled back. `--keep-going` switches to collecting
//! failures and reporting them at the end.
//!
//! ## Pure-Rust Imaging
//!
//! Bitmaps go through the `image` crate, EXR files through `exr`. There are no
//! system dependencies, so the binary runs anywhere it can be copied to.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
