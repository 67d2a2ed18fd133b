// src/spectrogram.rs
//
// Spectrogram assembly: slides overlapping Hamming-tapered windows across
// the decoded samples, transforms each slice, and paints one pixel column
// per slice with the frequency axis inverted (low frequencies at the
// bottom).

use image::{Rgba, RgbaImage};
use log::debug;
use rayon::prelude::*;

use crate::colormap::{intensity_to_color, magnitude_to_intensity};
use crate::decoder::DecodedAudio;
use crate::error::RenderError;
use crate::overlay;
use crate::spectral::{hamming_window, SpectralTransformer};

/// Spectrogram rendering configuration.
#[derive(Debug, Clone)]
pub struct SpectrogramConfig {
    /// Analysis window length in samples
    pub fft_size: usize,
    /// Maximum rendered width in pixels (time axis)
    pub max_width: u32,
    /// Maximum rendered height in pixels (frequency axis)
    pub max_height: u32,
    /// Overlay title, axis captions, and tick labels
    pub draw_labels: bool,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            max_width: 2000,
            max_height: 512,
            draw_labels: true,
        }
    }
}

impl SpectrogramConfig {
    /// Natural hop between consecutive windows: fft_size/4 (75% overlap).
    pub fn hop_size(&self) -> usize {
        (self.fft_size / 4).max(1)
    }
}

/// Render a decoded clip into a color-mapped spectrogram bitmap.
///
/// The image always spans the full clip duration: when the natural slice
/// count exceeds `max_width`, the hop is recomputed so exactly `width`
/// evenly spaced windows cover the signal. Clips shorter than one window
/// render at width 1 with a zero-padded tail.
pub fn render_spectrogram(
    audio: &DecodedAudio,
    config: &SpectrogramConfig,
) -> Result<RgbaImage, RenderError> {
    let samples = &audio.samples;
    // A window below 2 samples has no frequency bins to render.
    let fft_size = config.fft_size.max(2);
    let natural_hop = config.hop_size();

    let num_slices = samples.len().saturating_sub(fft_size) / natural_hop + 1;
    let width = (num_slices as u64).min(config.max_width as u64).max(1) as u32;

    // Spread exactly `width` windows across the signal when clamping cut
    // slices out. Width 1 keeps the natural hop, so this never divides by
    // zero for short clips.
    let hop = if num_slices > config.max_width as usize && width > 1 {
        samples.len().saturating_sub(fft_size) / (width as usize - 1)
    } else {
        natural_hop
    };

    let transformer = SpectralTransformer::new(fft_size);
    let bin_count = transformer.bin_count();
    let height = (bin_count as u32).min(config.max_height).max(1);

    let mut image = allocate_surface(width, height)?;

    debug!(
        "rendering spectrogram: {} columns x {} rows, hop {} of {} natural slices",
        width, height, hop, num_slices
    );

    let taper = hamming_window(fft_size);

    // Each time slice is independent, so columns are computed in parallel
    // and written back in order.
    let columns: Vec<Vec<Rgba<u8>>> = (0..width)
        .into_par_iter()
        .map(|t| {
            let start = t as usize * hop;
            let mut window = vec![0.0f32; fft_size];
            for (i, w) in window.iter_mut().enumerate() {
                if let Some(&s) = samples.get(start + i) {
                    *w = s * taper[i];
                }
            }

            let magnitudes = transformer.transform(&window);

            (0..height)
                .map(|f| {
                    let bin = (f as usize * bin_count) / height as usize;
                    let intensity = magnitude_to_intensity(magnitudes[bin]);
                    intensity_to_color(intensity)
                })
                .collect()
        })
        .collect();

    let stride = progress_stride(width);
    for (t, column) in columns.iter().enumerate() {
        if t as u32 % stride == 0 {
            debug!("rendering progress: {}%", t as u32 * 100 / width);
        }
        for (f, &color) in column.iter().enumerate() {
            // Row 0 is the highest frequency bin.
            image.put_pixel(t as u32, height - 1 - f as u32, color);
        }
    }

    if config.draw_labels {
        overlay::draw_labels(&mut image, audio.duration_secs, audio.sample_rate);
    }

    debug!("spectrogram rendering complete");
    Ok(image)
}

/// Column interval between progress log lines: one line per 10% of the
/// image width.
fn progress_stride(width: u32) -> u32 {
    (width / 10).max(1)
}

/// Allocate the RGBA drawing surface, reporting exhaustion as a
/// `RenderError` instead of aborting.
fn allocate_surface(width: u32, height: u32) -> Result<RgbaImage, RenderError> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(RenderError::Surface { width, height })?;

    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| RenderError::Surface { width, height })?;
    buf.resize(len, 0);

    RgbaImage::from_raw(width, height, buf).ok_or(RenderError::Surface { width, height })
}
