//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, resize (standard bitmaps) and resize_hdr (float EXR).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests swap in the
//! `MockBackend` below, which records what it was asked to do.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid channel data: {0}")]
    InvalidChannels(String),
    #[error("Output too large: {0}")]
    TooLarge(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<Dimensions> for (u32, u32) {
    fn from(d: Dimensions) -> Self {
        (d.width, d.height)
    }
}

/// Trait for image processing backends.
///
/// The split between `resize` and `resize_hdr` mirrors the two pixel paths:
/// decoded bitmaps go through the `image` crate, float EXR channels are
/// resampled one grid at a time.
pub trait ImageBackend {
    /// Get image dimensions (EXR: the data window extent).
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resize a standard bitmap, optionally sharpening the result.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Resize the R, G and B float channels of an EXR file.
    fn resize_hdr(&self, params: &ResizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Sharpening;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Mock backend that records operations without executing them.
    ///
    /// Dimensions are handed out in call order. Paths whose file name is
    /// listed in `failing` make `identify` return a decode error.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: RefCell<Vec<Dimensions>>,
        pub failing: HashSet<String>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
            sharpening: Option<(f32, u32, i32)>,
        },
        ResizeHdr {
            source: String,
            output: String,
            width: u32,
            height: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            let mut dims = dims;
            dims.reverse();
            Self {
                identify_results: RefCell::new(dims),
                ..Self::default()
            }
        }

        pub fn failing_on(mut self, file_name: &str) -> Self {
            self.failing.insert(file_name.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if self.failing.contains(&name) {
                return Err(BackendError::Decode(format!("mock failure for {name}")));
            }

            self.identify_results
                .borrow_mut()
                .pop()
                .ok_or_else(|| BackendError::Decode("No mock dimensions".to_string()))
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            self.operations.borrow_mut().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                sharpening: params
                    .sharpening
                    .map(|s| (s.radius, s.percent, s.threshold)),
            });
            Ok(())
        }

        fn resize_hdr(&self, params: &ResizeParams) -> Result<(), BackendError> {
            self.operations.borrow_mut().push(RecordedOp::ResizeHdr {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions::new(800, 600)]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result, Dimensions::new(800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_hands_out_dimensions_in_order() {
        let backend = MockBackend::with_dimensions(vec![
            Dimensions::new(10, 20),
            Dimensions::new(30, 40),
        ]);
        assert_eq!(
            backend.identify(Path::new("a.png")).unwrap(),
            Dimensions::new(10, 20)
        );
        assert_eq!(
            backend.identify(Path::new("b.png")).unwrap(),
            Dimensions::new(30, 40)
        );
    }

    #[test]
    fn mock_fails_on_listed_file() {
        let backend =
            MockBackend::with_dimensions(vec![Dimensions::new(1, 1)]).failing_on("bad.jpg");
        let result = backend.identify(Path::new("/in/bad.jpg"));
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn mock_records_resize_with_sharpening() {
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                source: "/source.jpg".into(),
                output: "/output.jpg".into(),
                width: 1600,
                height: 1200,
                sharpening: Some(Sharpening::standard()),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 1600,
                height: 1200,
                sharpening: Some((2.0, 150, 3)),
                ..
            }
        ));
    }

    #[test]
    fn backend_error_messages() {
        let err = BackendError::UnsupportedFormat("notes.txt".into());
        assert_eq!(err.to_string(), "Unsupported format: notes.txt");
        let err = BackendError::Decode("bad header".into());
        assert_eq!(err.to_string(), "Decode failed: bad header");
    }
}
