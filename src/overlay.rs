// src/overlay.rs
//
// Text overlays for the rendered spectrogram: title, axis captions, and
// time tick labels. Glyphs are rasterized with fontdue from an embedded
// monospace font and alpha-blended onto the bitmap.

use fontdue::{Font, FontSettings};
use image::RgbaImage;

const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

const TITLE_SIZE: f32 = 14.0;
const TICK_SIZE: f32 = 10.0;
const NUM_TIME_TICKS: u32 = 5;

pub const LABEL_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Rasterizes and composites text onto an RGBA bitmap.
pub struct TextOverlay {
    font: Font,
    font_size: f32,
}

impl TextOverlay {
    pub fn new(font_size: f32) -> Self {
        // The font is embedded in the binary; parse failure would be a
        // build defect, not a runtime input condition.
        let font = Font::from_bytes(FONT_DATA, FontSettings::default())
            .unwrap_or_else(|e| panic!("embedded font is invalid: {e}"));
        Self { font, font_size }
    }

    /// Width of `text` in pixels when rendered at this overlay's size.
    pub fn measure_width(&self, text: &str) -> u32 {
        let mut width = 0.0f32;
        for ch in text.chars() {
            let (metrics, _) = self.font.rasterize(ch, self.font_size);
            width += metrics.advance_width;
        }
        width.ceil() as u32
    }

    /// Draw `text` left-to-right with its top-left corner at (x, y).
    /// Pixels falling outside the bitmap are clipped.
    pub fn draw(&self, image: &mut RgbaImage, text: &str, x: i32, y: i32, color: [u8; 4]) {
        let mut cursor_x = x;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            let glyph_top = y + self.font_size as i32 - metrics.height as i32 - metrics.ymin;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let px = cursor_x + gx as i32;
                    let py = glyph_top + gy as i32;
                    blend_pixel(image, px, py, color, coverage);
                }
            }

            cursor_x += metrics.advance_width as i32;
        }
    }

    /// Draw `text` rotated 90 degrees counter-clockwise (reading
    /// bottom-to-top), with the column's left edge at `x` and the text
    /// vertically centered on `y_center`.
    pub fn draw_vertical(
        &self,
        image: &mut RgbaImage,
        text: &str,
        x: i32,
        y_center: i32,
        color: [u8; 4],
    ) {
        let text_width = self.measure_width(text) as i32;
        // Baseline runs upward; start at the bottom end of the text.
        let y_bottom = y_center + text_width / 2;

        let mut cursor = 0i32;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            let glyph_top = self.font_size as i32 - metrics.height as i32 - metrics.ymin;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    // Horizontal (sx, sy) rotated CCW: x' = sy, y' = -sx.
                    let sx = cursor + gx as i32;
                    let sy = glyph_top + gy as i32;
                    let px = x + sy;
                    let py = y_bottom - sx;
                    blend_pixel(image, px, py, color, coverage);
                }
            }

            cursor += metrics.advance_width as i32;
        }
    }
}

fn blend_pixel(image: &mut RgbaImage, x: i32, y: i32, color: [u8; 4], coverage: u8) {
    if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
        return;
    }
    let dst = image.get_pixel_mut(x as u32, y as u32);
    let a = coverage as f32 / 255.0 * (color[3] as f32 / 255.0);
    let inv = 1.0 - a;
    for c in 0..3 {
        dst.0[c] = (color[c] as f32 * a + dst.0[c] as f32 * inv) as u8;
    }
    dst.0[3] = 255;
}

/// Overlay the standard label set: centered title, X-axis time caption,
/// rotated Y-axis frequency caption, and evenly spaced time tick labels.
///
/// For very small bitmaps most of this clips away harmlessly.
pub fn draw_labels(image: &mut RgbaImage, duration_secs: f64, sample_rate: u32) {
    let width = image.width() as i32;
    let height = image.height() as i32;

    let title = TextOverlay::new(TITLE_SIZE);
    let ticks = TextOverlay::new(TICK_SIZE);

    let caption = "SPECTROGRAM";
    let cx = (width - title.measure_width(caption) as i32) / 2;
    title.draw(image, caption, cx, 4, LABEL_COLOR);

    let time_caption = format!("Time: 0s - {:.1}s", duration_secs);
    let cx = (width - title.measure_width(&time_caption) as i32) / 2;
    title.draw(image, &time_caption, cx, height - 20, LABEL_COLOR);

    let nyquist = sample_rate as f64 / 2.0;
    let freq_caption = format!("Frequency: 0Hz - {:.0}Hz", nyquist);
    title.draw_vertical(image, &freq_caption, 4, height / 2, LABEL_COLOR);

    for i in 0..=NUM_TIME_TICKS {
        let x = (i as i64 * width as i64 / NUM_TIME_TICKS as i64) as i32;
        let t = i as f64 * duration_secs / NUM_TIME_TICKS as f64;
        let label = format!("{:.1}s", t);
        let label_x = x - ticks.measure_width(&label) as i32 / 2;
        ticks.draw(image, &label, label_x, height - 36, LABEL_COLOR);
    }
}
