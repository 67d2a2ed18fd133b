//! Spectropix - Convert audio clips into labeled spectrogram images
//!
//! Decodes an audio byte buffer (WAV/MP3/OGG/FLAC/AAC), computes a
//! time-frequency decomposition with a windowed discrete Fourier
//! transform, and renders a color-mapped, axis-labeled PNG suitable for
//! downstream visual analysis.
//!
//! ## Pipeline
//!
//! raw bytes -> [`decoder`] -> samples + metadata -> [`spectrogram`]
//! (driving [`spectral`] per time slice) -> bitmap -> [`encode`] ->
//! PNG bytes / data URL
//!
//! ## Module Structure
//!
//! - `decoder` - Symphonia-backed audio decoding behind an injectable trait
//! - `spectral` - Hamming windowing and the bounded-cost direct DFT
//! - `colormap` - dB normalization and the intensity color ramp
//! - `spectrogram` - grid assembly and column rendering
//! - `overlay` - title, axis captions, and tick labels
//! - `encode` - PNG serialization and the data-URL adapter
//! - `pipeline` - end-to-end orchestration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spectropix::{process_audio_bytes, SpectrogramConfig};
//!
//! let bytes = std::fs::read("clip.wav")?;
//! let out = process_audio_bytes(&bytes, &SpectrogramConfig::default())?;
//!
//! std::fs::write("clip.png", &out.png)?;
//! println!("{:.1}s at {} Hz", out.metadata.duration_secs, out.metadata.sample_rate);
//! ```

pub mod colormap;
pub mod decoder;
pub mod encode;
pub mod error;
pub mod overlay;
pub mod pipeline;
pub mod spectral;
pub mod spectrogram;

// Re-export commonly used types at crate root for convenience
pub use decoder::{decode_bytes, AudioDecoder, DecodedAudio, SymphoniaDecoder};
pub use encode::{data_url_to_bytes, encode_png, to_data_url};
pub use error::{DecodeError, PipelineError, RenderError};
pub use pipeline::{
    process_audio_bytes, process_decoded, process_with_decoder, SpectrogramMetadata,
    SpectrogramOutput,
};
pub use spectral::SpectralTransformer;
pub use spectrogram::{render_spectrogram, SpectrogramConfig};
