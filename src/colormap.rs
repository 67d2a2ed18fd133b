// src/colormap.rs
//
// Magnitude -> decibel -> intensity normalization and the intensity color
// ramp used for spectrogram pixels.

use image::Rgba;

/// Floor added before the log so silence maps to a finite dB value.
pub const DB_EPSILON: f32 = 1e-10;

/// Bottom of the visible dynamic range in dB.
pub const DB_FLOOR: f32 = -90.0;

/// Visible dynamic range span in dB (-90 dB .. -10 dB maps to 0..1).
pub const DB_RANGE: f32 = 80.0;

/// Convert a linear magnitude to a normalized intensity in [0, 1].
///
/// `20*log10(m + 1e-10)` then `(db + 90)/80`, clamped. Total over all
/// non-negative inputs; an all-zero spectrum lands exactly on 0.0.
pub fn magnitude_to_intensity(magnitude: f32) -> f32 {
    let db = 20.0 * (magnitude + DB_EPSILON).log10();
    ((db - DB_FLOOR) / DB_RANGE).clamp(0.0, 1.0)
}

/// Map a [0, 1] intensity onto the four-stage ramp
/// black -> blue -> cyan -> yellow -> white.
pub fn intensity_to_color(intensity: f32) -> Rgba<u8> {
    let v = intensity.clamp(0.0, 1.0);

    let (r, g, b) = if v < 0.25 {
        (0.0, 0.0, v * 4.0)
    } else if v < 0.5 {
        (0.0, (v - 0.25) * 4.0, 1.0)
    } else if v < 0.75 {
        ((v - 0.5) * 4.0, 1.0, 1.0 - (v - 0.5) * 4.0)
    } else {
        (1.0, 1.0, (v - 0.75) * 4.0)
    };

    Rgba([
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
        255,
    ])
}
