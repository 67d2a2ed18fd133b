// src/pipeline.rs
//
// End-to-end orchestration: bytes -> decoded audio -> spectrogram bitmap
// -> PNG. One invocation owns all of its intermediate state; there is no
// caching or sharing across calls.

use log::info;
use serde::Serialize;

use crate::decoder::{AudioDecoder, DecodedAudio, SymphoniaDecoder};
use crate::encode::{encode_png, to_data_url};
use crate::error::{PipelineError, RenderError};
use crate::spectrogram::{render_spectrogram, SpectrogramConfig};

/// Source clip properties passed through to the consumer bit-exact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrogramMetadata {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: usize,
}

/// Pipeline output: the encoded image in both byte and data-URL form,
/// plus the clip metadata.
#[derive(Debug, Clone)]
pub struct SpectrogramOutput {
    pub png: Vec<u8>,
    pub data_url: String,
    pub metadata: SpectrogramMetadata,
}

/// Run the full pipeline on raw audio container bytes using the
/// symphonia-backed decoder.
pub fn process_audio_bytes(
    bytes: &[u8],
    config: &SpectrogramConfig,
) -> Result<SpectrogramOutput, PipelineError> {
    process_with_decoder(&SymphoniaDecoder, bytes, config)
}

/// Run the full pipeline with an injected decoder implementation.
pub fn process_with_decoder<D: AudioDecoder>(
    decoder: &D,
    bytes: &[u8],
    config: &SpectrogramConfig,
) -> Result<SpectrogramOutput, PipelineError> {
    let audio = decoder.decode(bytes)?;
    info!(
        "decoded clip: {:.3}s at {} Hz, {} channel(s)",
        audio.duration_secs, audio.sample_rate, audio.channels
    );
    Ok(process_decoded(&audio, config)?)
}

/// Render and encode an already-decoded clip.
pub fn process_decoded(
    audio: &DecodedAudio,
    config: &SpectrogramConfig,
) -> Result<SpectrogramOutput, RenderError> {
    let image = render_spectrogram(audio, config)?;
    let png = encode_png(&image)?;
    let data_url = to_data_url(&png);

    info!(
        "spectrogram ready: {}x{} pixels, {} PNG bytes",
        image.width(),
        image.height(),
        png.len()
    );

    Ok(SpectrogramOutput {
        png,
        data_url,
        metadata: SpectrogramMetadata {
            duration_secs: audio.duration_secs,
            sample_rate: audio.sample_rate,
            channels: audio.channels,
        },
    })
}
