//! Float channel grids and separable Lanczos-3 resampling.
//!
//! The `image` crate's resize clamps float samples to `[0, 1]`, which would
//! flatten HDR highlights. EXR channels are therefore resampled here, one
//! [`ChannelBuffer`] at a time, with no clamping.
//!
//! Kernel weights are computed once per output column/row and normalized to
//! sum to 1. When downscaling, the kernel support is widened by the scale
//! ratio so the filter also acts as a low-pass.

use super::backend::BackendError;

/// Lanczos lobes.
const LANCZOS_A: f32 = 3.0;

/// A `width × height` grid of f32 samples, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelBuffer {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl ChannelBuffer {
    /// Zero-filled grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width * height],
        }
    }

    /// Wrap existing samples; the length must equal `width * height`.
    pub fn from_samples(
        width: usize,
        height: usize,
        samples: Vec<f32>,
    ) -> Result<Self, BackendError> {
        if samples.len() != width * height {
            return Err(BackendError::InvalidChannels(format!(
                "{} samples for a {width}x{height} grid",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.samples[y * self.width + x] = value;
    }
}

/// The red, green and blue grids of one image. All three share dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbChannels {
    red: ChannelBuffer,
    green: ChannelBuffer,
    blue: ChannelBuffer,
}

impl RgbChannels {
    pub fn new(
        red: ChannelBuffer,
        green: ChannelBuffer,
        blue: ChannelBuffer,
    ) -> Result<Self, BackendError> {
        let shape = (red.width, red.height);
        if (green.width, green.height) != shape || (blue.width, blue.height) != shape {
            return Err(BackendError::InvalidChannels(format!(
                "channel shapes differ: R {}x{}, G {}x{}, B {}x{}",
                red.width, red.height, green.width, green.height, blue.width, blue.height
            )));
        }
        Ok(Self { red, green, blue })
    }

    /// Three zero-filled grids.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            red: ChannelBuffer::new(width, height),
            green: ChannelBuffer::new(width, height),
            blue: ChannelBuffer::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.red.width
    }

    pub fn height(&self) -> usize {
        self.red.height
    }

    pub fn red(&self) -> &ChannelBuffer {
        &self.red
    }

    pub fn green(&self) -> &ChannelBuffer {
        &self.green
    }

    pub fn blue(&self) -> &ChannelBuffer {
        &self.blue
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, (r, g, b): (f32, f32, f32)) {
        self.red.set(x, y, r);
        self.green.set(x, y, g);
        self.blue.set(x, y, b);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> (f32, f32, f32) {
        (self.red.get(x, y), self.green.get(x, y), self.blue.get(x, y))
    }

    /// Resample each channel independently to `width × height`.
    pub fn resample(&self, width: usize, height: usize) -> Self {
        Self {
            red: resample_lanczos3(&self.red, width, height),
            green: resample_lanczos3(&self.green, width, height),
            blue: resample_lanczos3(&self.blue, width, height),
        }
    }
}

/// Lanczos kernel with three lobes.
#[inline]
fn lanczos3(x: f32) -> f32 {
    let x = x.abs();

    if x < 1e-6 {
        return 1.0;
    }
    if x >= LANCZOS_A {
        return 0.0;
    }

    let pi_x = std::f32::consts::PI * x;
    let pi_x_a = pi_x / LANCZOS_A;
    (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
}

/// Source taps for one output sample.
struct Contribution {
    start: usize,
    weights: Vec<f32>,
}

fn precompute_contributions(in_size: usize, out_size: usize) -> Vec<Contribution> {
    let ratio = in_size as f32 / out_size as f32;
    let filter_scale = ratio.max(1.0);
    let support = LANCZOS_A * filter_scale;

    (0..out_size)
        .map(|out_pos| {
            let center = (out_pos as f32 + 0.5) * ratio;
            let start = (center - support).floor().max(0.0) as usize;
            let end = ((center + support).ceil() as usize).min(in_size);

            let mut weights: Vec<f32> = (start..end)
                .map(|i| lanczos3((i as f32 + 0.5 - center) / filter_scale))
                .collect();

            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                let inv_sum = 1.0 / sum;
                weights.iter_mut().for_each(|w| *w *= inv_sum);
            }

            Contribution { start, weights }
        })
        .collect()
}

#[inline]
fn convolve(taps: impl Iterator<Item = f32>, weights: &[f32]) -> f32 {
    taps.zip(weights).map(|(sample, w)| sample * w).sum()
}

/// Resample one channel to `width × height` with a separable Lanczos-3 filter.
///
/// Horizontal pass first (into a `src.height × width` buffer), then vertical.
/// Either pass is skipped when that axis keeps its size.
pub fn resample_lanczos3(src: &ChannelBuffer, width: usize, height: usize) -> ChannelBuffer {
    if src.width == 0 || src.height == 0 || width == 0 || height == 0 {
        return ChannelBuffer::new(width, height);
    }

    let horizontal = if width != src.width {
        let contributions = precompute_contributions(src.width, width);
        let mut out = ChannelBuffer::new(width, src.height);
        for (in_row, out_row) in src
            .samples
            .chunks_exact(src.width)
            .zip(out.samples.chunks_exact_mut(width))
        {
            for (out_sample, c) in out_row.iter_mut().zip(&contributions) {
                let taps = in_row[c.start..c.start + c.weights.len()].iter().copied();
                *out_sample = convolve(taps, &c.weights);
            }
        }
        out
    } else {
        src.clone()
    };

    if height == horizontal.height {
        return horizontal;
    }

    let contributions = precompute_contributions(horizontal.height, height);
    let mut out = ChannelBuffer::new(width, height);
    for (y, c) in contributions.iter().enumerate() {
        for x in 0..width {
            let taps = (c.start..c.start + c.weights.len()).map(|sy| horizontal.get(x, sy));
            out.set(x, y, convolve(taps, &c.weights));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> ChannelBuffer {
        let samples = (0..width * height)
            .map(|i| (i % width) as f32 / width as f32 + (i / width) as f32)
            .collect();
        ChannelBuffer::from_samples(width, height, samples).unwrap()
    }

    #[test]
    fn kernel_shape() {
        assert_eq!(lanczos3(0.0), 1.0);
        assert!(lanczos3(1.0).abs() < 1e-6);
        assert!(lanczos3(2.0).abs() < 1e-6);
        assert_eq!(lanczos3(3.0), 0.0);
        assert_eq!(lanczos3(-4.0), 0.0);
        assert!(lanczos3(0.5) > 0.0);
        // first negative lobe
        assert!(lanczos3(1.5) < 0.0);
    }

    #[test]
    fn weights_are_normalized() {
        for (inp, out) in [(10, 20), (20, 10), (7, 3), (3, 7)] {
            for c in precompute_contributions(inp, out) {
                let sum: f32 = c.weights.iter().sum();
                assert!((sum - 1.0).abs() < 1e-4, "{inp}->{out}: {sum}");
                assert!(c.start + c.weights.len() <= inp);
            }
        }
    }

    #[test]
    fn output_has_requested_shape() {
        let out = resample_lanczos3(&gradient(16, 9), 32, 18);
        assert_eq!((out.width(), out.height()), (32, 18));
        assert_eq!(out.samples().len(), 32 * 18);
    }

    #[test]
    fn same_size_is_identity() {
        let src = gradient(8, 5);
        assert_eq!(resample_lanczos3(&src, 8, 5), src);
    }

    #[test]
    fn constant_field_stays_constant_above_one() {
        let src = ChannelBuffer::from_samples(6, 4, vec![12.5; 24]).unwrap();
        for (w, h) in [(12, 8), (3, 2), (7, 9)] {
            let out = resample_lanczos3(&src, w, h);
            for &v in out.samples() {
                assert!((v - 12.5).abs() < 1e-3, "{w}x{h}: {v}");
            }
        }
    }

    #[test]
    fn hdr_peaks_are_not_clamped() {
        let mut src = ChannelBuffer::new(9, 9);
        src.set(4, 4, 50.0);
        let out = resample_lanczos3(&src, 18, 18);
        let peak = out.samples().iter().cloned().fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "peak {peak} was clamped");
    }

    #[test]
    fn one_axis_only() {
        let src = gradient(4, 6);
        let wide = resample_lanczos3(&src, 8, 6);
        assert_eq!((wide.width(), wide.height()), (8, 6));
        let tall = resample_lanczos3(&src, 4, 12);
        assert_eq!((tall.width(), tall.height()), (4, 12));
    }

    #[test]
    fn from_samples_rejects_wrong_length() {
        let result = ChannelBuffer::from_samples(3, 3, vec![0.0; 8]);
        assert!(matches!(result, Err(BackendError::InvalidChannels(_))));
    }

    #[test]
    fn rgb_channels_require_equal_shapes() {
        let ok = RgbChannels::new(
            ChannelBuffer::new(4, 2),
            ChannelBuffer::new(4, 2),
            ChannelBuffer::new(4, 2),
        );
        assert!(ok.is_ok());

        let mismatched = RgbChannels::new(
            ChannelBuffer::new(4, 2),
            ChannelBuffer::new(2, 4),
            ChannelBuffer::new(4, 2),
        );
        assert!(matches!(mismatched, Err(BackendError::InvalidChannels(_))));
    }

    #[test]
    fn rgb_resample_keeps_channels_in_step() {
        let mut rgb = RgbChannels::blank(5, 3);
        rgb.set_pixel(2, 1, (1.0, 2.0, 3.0));
        let out = rgb.resample(10, 6);
        assert_eq!((out.width(), out.height()), (10, 6));
        for ch in [out.red(), out.green(), out.blue()] {
            assert_eq!((ch.width(), ch.height()), (10, 6));
        }
        let (r, g, b) = out.pixel(5, 3);
        assert!(r > 0.0 && g > r && b > g);
    }
}
