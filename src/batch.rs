//! Directory batch upscaling.
//!
//! Lists the images directly inside an input directory, makes sure the output
//! directory exists, and runs [`transform`] once per file, strictly in order.
//!
//! ## Output Structure
//!
//! Output files keep their input file name, so the extension (and with it the
//! encoder) is unchanged:
//!
//! ```text
//! input/                 output/
//! ├── photo.jpg    →     ├── photo.jpg      (round(w×s) × round(h×s))
//! ├── render.exr   →     ├── render.exr     (R, G, B float32)
//! └── notes.txt          └── (skipped)
//! ```
//!
//! ## Error Policy
//!
//! [`ErrorPolicy::Abort`] (the default) stops at the first failing file.
//! Files already written stay in place; later files are not touched.
//! [`ErrorPolicy::Continue`] records the failure and moves on.
//!
//! ## Progress
//!
//! After each file the optional [`ProgressSink`] receives a
//! [`BatchProgress`] with a 1-based `completed` count. Under `Abort` the
//! failing file gets no report.

use crate::imaging::{
    BackendError, ImageBackend, ImageKind, ImageTask, RustBackend, ScaleFactor, Sharpening,
    is_recognized, transform,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed on {file} after {processed} of {found} file(s): {source}")]
    File {
        file: String,
        processed: usize,
        found: usize,
        #[source]
        source: BackendError,
    },
}

/// What to do when one file fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the batch at the first failure.
    #[default]
    Abort,
    /// Record the failure and keep going.
    Continue,
}

/// Position in the batch after a file finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// 1-based count of files handled so far.
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Receives progress synchronously from the batch loop.
pub trait ProgressSink {
    fn report(&mut self, progress: BatchProgress);
}

impl<F: FnMut(BatchProgress)> ProgressSink for F {
    fn report(&mut self, progress: BatchProgress) {
        self(progress)
    }
}

/// Everything a batch run needs. Built once by the front end and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchParams {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scale_factor: ScaleFactor,
    pub apply_sharpen: bool,
    pub sharpen_intensity: f64,
    pub sharpening: Sharpening,
    pub error_policy: ErrorPolicy,
}

impl BatchParams {
    /// Defaults: 2x, no sharpening, intensity 2.0, abort on error.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            scale_factor: ScaleFactor::default(),
            apply_sharpen: false,
            sharpen_intensity: 2.0,
            sharpening: Sharpening::standard(),
            error_policy: ErrorPolicy::default(),
        }
    }

    fn task_for(&self, input: &Path, output: PathBuf) -> ImageTask {
        ImageTask {
            input_path: input.to_path_buf(),
            output_path: output,
            scale_factor: self.scale_factor,
            apply_sharpen: self.apply_sharpen,
            sharpen_intensity: self.sharpen_intensity,
            sharpening: self.sharpening,
        }
    }
}

/// One successfully written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedFile {
    pub file: String,
    pub kind: ImageKind,
    pub source: (u32, u32),
    pub output: (u32, u32),
}

/// One file that failed under [`ErrorPolicy::Continue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

/// Outcome of a batch run that was not aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Recognized image files found in the input directory.
    pub found: usize,
    /// Files written successfully.
    pub processed: usize,
    pub outputs: Vec<ProcessedFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl BatchResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.processed == self.found
    }
}

/// A file the batch would process, and where its output would go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: ImageKind,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Recognized image files directly inside `dir`, sorted by file name.
///
/// Not recursive. Only the extension decides, so dot-files such as
/// `.shot.png` are picked up. Anything that is not a regular file (after
/// following symlinks) is skipped. An unreadable entry fails the listing.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_recognized(&path) {
            entries.push(path);
        }
    }

    entries.sort();
    Ok(entries)
}

/// List what a batch would do without decoding anything.
pub fn plan_batch(input_dir: &Path, output_dir: &Path) -> Result<Vec<PlannedFile>, BatchError> {
    let files = list_images(input_dir)?;
    let found = files.len();
    files
        .into_iter()
        .map(|input| {
            let kind = ImageKind::classify(&input).map_err(|source| BatchError::File {
                file: file_name_of(&input),
                processed: 0,
                found,
                source,
            })?;
            let output = output_dir.join(file_name_of(&input));
            Ok(PlannedFile {
                input,
                output,
                kind,
            })
        })
        .collect()
}

/// Upscale every recognized image in `params.input_dir`.
pub fn run_batch(
    params: &BatchParams,
    progress: Option<&mut dyn ProgressSink>,
) -> Result<BatchResult, BatchError> {
    let backend = RustBackend::new();
    run_batch_with_backend(&backend, params, progress)
}

/// Run a batch using a specific backend (allows testing with mock).
pub fn run_batch_with_backend(
    backend: &impl ImageBackend,
    params: &BatchParams,
    mut progress: Option<&mut dyn ProgressSink>,
) -> Result<BatchResult, BatchError> {
    fs::create_dir_all(&params.output_dir)?;

    let files = list_images(&params.input_dir)?;
    let total = files.len();
    info!(
        "Upscaling {} image(s) from {} to {} at {}",
        total,
        params.input_dir.display(),
        params.output_dir.display(),
        params.scale_factor
    );

    let mut result = BatchResult {
        found: total,
        ..Default::default()
    };

    for (index, input) in files.iter().enumerate() {
        let file = file_name_of(input);
        let task = params.task_for(input, params.output_dir.join(&file));
        debug!("{} -> {}", input.display(), task.output_path.display());

        match transform(backend, &task) {
            Ok(outcome) => {
                info!(
                    "Processed {} ({}x{} -> {}x{})",
                    file,
                    outcome.source.width,
                    outcome.source.height,
                    outcome.output.width,
                    outcome.output.height
                );
                result.processed += 1;
                result.outputs.push(ProcessedFile {
                    file,
                    kind: outcome.kind,
                    source: outcome.source.into(),
                    output: outcome.output.into(),
                });
            }
            Err(source) => match params.error_policy {
                ErrorPolicy::Abort => {
                    return Err(BatchError::File {
                        file,
                        processed: result.processed,
                        found: total,
                        source,
                    });
                }
                ErrorPolicy::Continue => {
                    warn!("Skipping {}: {}", file, source);
                    result.failures.push(FileFailure {
                        file,
                        message: source.to_string(),
                    });
                }
            },
        }

        if let Some(sink) = progress.as_deref_mut() {
            sink.report(BatchProgress {
                completed: index + 1,
                total,
            });
        }
    }

    info!("Upscaled {} of {} image(s)", result.processed, total);
    Ok(result)
}
