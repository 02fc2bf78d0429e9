//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! 001 photo.jpg (standard)
//!     Output: out/photo.jpg
//! 002 render.exr (hdr)
//!     Output: out/render.exr
//!
//! 2 images to upscale
//! ```
//!
//! ## Run
//!
//! ```text
//! [001/002] 50%
//! [002/002] 100%
//! 001 photo.jpg: 800x600 → 1600x1200
//! 002 render.exr: 1920x1080 → 3840x2160 (hdr)
//!
//! Upscaled 2 of 2 images
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::batch::{BatchProgress, BatchResult, PlannedFile};
use crate::imaging::ImageKind;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn kind_label(kind: ImageKind) -> &'static str {
    match kind {
        ImageKind::Hdr => "hdr",
        ImageKind::Standard => "standard",
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "image" } else { "images" }
}

/// Format one progress report.
///
/// ```text
/// [003/010] 30%
/// ```
pub fn format_progress(progress: &BatchProgress) -> String {
    format!(
        "[{}/{}] {:.0}%",
        format_index(progress.completed),
        format_index(progress.total),
        progress.fraction() * 100.0
    )
}

pub fn print_progress(progress: &BatchProgress) {
    println!("{}", format_progress(progress));
}

/// Format the planned work of a batch without running it.
pub fn format_plan(plan: &[PlannedFile]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, planned) in plan.iter().enumerate() {
        let name = planned
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| planned.input.display().to_string());
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            name,
            kind_label(planned.kind)
        ));
        lines.push(format!("    Output: {}", planned.output.display()));
    }
    if !plan.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("{} {} to upscale", plan.len(), plural(plan.len())));
    lines
}

pub fn print_plan(plan: &[PlannedFile]) {
    for line in format_plan(plan) {
        println!("{}", line);
    }
}

/// Format the outcome of a finished batch.
///
/// Successful files come first with their before and after sizes, then any
/// failures recorded under the continue policy.
pub fn format_batch_summary(result: &BatchResult) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, processed) in result.outputs.iter().enumerate() {
        let (sw, sh) = processed.source;
        let (ow, oh) = processed.output;
        let suffix = match processed.kind {
            ImageKind::Hdr => " (hdr)",
            ImageKind::Standard => "",
        };
        lines.push(format!(
            "{} {}: {}x{} \u{2192} {}x{}{}",
            format_index(i + 1),
            processed.file,
            sw,
            sh,
            ow,
            oh,
            suffix
        ));
    }

    if !result.failures.is_empty() {
        lines.push(String::new());
        lines.push("Failed".to_string());
        for failure in &result.failures {
            lines.push(format!("    {}: {}", failure.file, failure.message));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Upscaled {} of {} {}",
        result.processed,
        result.found,
        plural(result.found)
    ));
    lines
}

pub fn print_batch_summary(result: &BatchResult) {
    for line in format_batch_summary(result) {
        println!("{}", line);
    }
}
