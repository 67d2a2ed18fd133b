// src/encode.rs
//
// Bitmap serialization: lossless PNG bytes plus the data-URL adapter used
// by downstream image-analysis consumers.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{ImageFormat, RgbaImage};

use crate::error::RenderError;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode a bitmap to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL.
pub fn to_data_url(png: &[u8]) -> String {
    format!("{}{}", DATA_URL_PREFIX, BASE64.encode(png))
}

/// Recover raw bytes from a base64 data URL. Rejects strings without a
/// `data:...;base64,` header or with invalid base64 payloads.
pub fn data_url_to_bytes(data_url: &str) -> Result<Vec<u8>, RenderError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| RenderError::InvalidDataUrl("missing ',' separator".into()))?;

    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(RenderError::InvalidDataUrl(format!(
            "unexpected header '{}'",
            header
        )));
    }

    BASE64
        .decode(payload)
        .map_err(|e| RenderError::InvalidDataUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_round_trip() {
        let image = RgbaImage::from_pixel(16, 8, Rgba([10, 200, 30, 255]));
        let png = encode_png(&image).unwrap();
        // PNG signature
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(3, 3), &Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn test_data_url_round_trip() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let png = encode_png(&image).unwrap();
        let url = to_data_url(&png);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(data_url_to_bytes(&url).unwrap(), png);
    }

    #[test]
    fn test_malformed_data_url_rejected() {
        assert!(data_url_to_bytes("not a data url").is_err());
        assert!(data_url_to_bytes("data:image/png;base64").is_err());
        assert!(data_url_to_bytes("text/plain,hello").is_err());
        assert!(data_url_to_bytes("data:image/png;base64,@@@@").is_err());
    }
}
