// src/spectral.rs
//
// Windowing and the direct discrete Fourier transform.
//
// The transform is deliberately the naive O(N^2) DFT rather than an FFT:
// combined with the decimation cap below, the per-slice cost is bounded at
// O(2048^2) regardless of configured window size, which keeps worst-case
// latency predictable at the price of frequency resolution for large
// windows. That tradeoff is intentional, not an approximation bug.

use num_complex::Complex;
use std::f64::consts::PI;

/// Windows longer than this are decimated down to this length before the
/// transform runs.
pub const MAX_DFT_SIZE: usize = 2048;

/// Generate Hamming window coefficients: `0.54 - 0.46*cos(2*pi*i/(N-1))`.
pub fn hamming_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| (0.54 - 0.46 * (2.0 * PI * i as f64 / (size - 1) as f64).cos()) as f32)
        .collect()
}

/// Reduce `samples` to `target` entries by keeping every
/// `floor(len/target)`-th sample.
pub fn decimate(samples: &[f32], target: usize) -> Vec<f32> {
    let step = samples.len() / target;
    (0..target).map(|i| samples[i * step]).collect()
}

/// Direct DFT magnitude spectrum over bins [0, N/2).
///
/// magnitude[k] = |sum_n x[n] * e^(-2*pi*i*k*n/N)| / N
fn dft_magnitudes(samples: &[f32]) -> Vec<f32> {
    let n = samples.len();
    let bins = n / 2;
    let mut magnitudes = Vec::with_capacity(bins);

    for k in 0..bins {
        let angle_step = -2.0 * PI * k as f64 / n as f64;
        let mut acc = Complex::new(0.0f64, 0.0);
        for (i, &x) in samples.iter().enumerate() {
            let angle = angle_step * i as f64;
            acc += Complex::new(angle.cos(), angle.sin()) * x as f64;
        }
        magnitudes.push((acc.norm() / n as f64) as f32);
    }

    magnitudes
}

/// Computes magnitude spectra for fixed-length sample windows.
#[derive(Debug, Clone)]
pub struct SpectralTransformer {
    window_size: usize,
    effective_size: usize,
}

impl SpectralTransformer {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            effective_size: window_size.min(MAX_DFT_SIZE),
        }
    }

    /// Number of frequency bins in the output spectrum, after any
    /// decimation.
    pub fn bin_count(&self) -> usize {
        self.effective_size / 2
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Magnitude spectrum of one analysis window.
    ///
    /// The input must be `window_size` samples (already tapered by the
    /// caller). Oversized windows are decimated to [`MAX_DFT_SIZE`] first,
    /// so the output always has [`bin_count`](Self::bin_count) entries.
    pub fn transform(&self, window: &[f32]) -> Vec<f32> {
        debug_assert_eq!(window.len(), self.window_size);

        if window.len() > MAX_DFT_SIZE {
            let reduced = decimate(window, MAX_DFT_SIZE);
            dft_magnitudes(&reduced)
        } else {
            dft_magnitudes(window)
        }
    }
}
