// src/error.rs
//
// Typed failure taxonomy for the pipeline. Every failure is deterministic
// for a given input, so nothing here is retried — errors propagate straight
// to the caller.

use thiserror::Error;

/// Input bytes could not be decoded into audio samples.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized or unsupported audio container: {0}")]
    UnsupportedFormat(String),

    #[error("no decodable audio track found in input")]
    NoAudioTrack,

    #[error("audio track does not declare a sample rate")]
    MissingSampleRate,

    #[error("audio track reports zero channels")]
    ZeroChannels,

    #[error("codec error while decoding: {0}")]
    Codec(String),

    #[error("input decoded to zero audio samples")]
    Empty,
}

/// Rendering or encoding the spectrogram bitmap failed.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("malformed data URL: {0}")]
    InvalidDataUrl(String),
}

/// Umbrella error for the end-to-end pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
