// src/decoder.rs
//
// Audio decoding from an in-memory byte buffer.
// Uses Symphonia for format-agnostic decoding; only channel 0 is kept,
// since the spectrogram renders a single channel.

use std::io::Cursor;

use log::debug;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::DecodeError;

/// Decoded audio ready for spectral analysis.
///
/// `samples` holds channel 0 only, normalized to [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Channel-0 samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels in the source (before channel-0 extraction)
    pub channels: usize,
    /// Duration in seconds
    pub duration_secs: f64,
}

/// Decoding seam for the pipeline.
///
/// The production implementation is [`SymphoniaDecoder`]; tests substitute
/// a fixture decoder that returns synthetic sample arrays.
pub trait AudioDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError>;
}

/// Symphonia-backed decoder. All format and codec state is constructed per
/// call and dropped on every exit path, so repeated decodes cannot leak
/// resources into each other.
#[derive(Debug, Default)]
pub struct SymphoniaDecoder;

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
        decode_bytes(bytes)
    }
}

/// Decode an audio byte buffer (WAV/MP3/OGG/FLAC/AAC container bytes) to
/// channel-0 floating-point samples.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let hint = Hint::new();
    let meta_opts = MetadataOptions::default();
    let fmt_opts = FormatOptions::default();

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSampleRate)?;

    let channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .unwrap_or(1);
    if channels == 0 {
        return Err(DecodeError::ZeroChannels);
    }

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .map_err(|e| DecodeError::Codec(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(symphonia::core::errors::Error::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(DecodeError::Codec(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            // A corrupt packet mid-stream is skippable; symphonia resyncs.
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(DecodeError::Codec(e.to_string())),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let capacity = decoded.capacity() as u64;
            sample_buf = Some(SampleBuffer::new(capacity, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            // Keep channel 0 from the interleaved frames.
            samples.extend(buf.samples().iter().step_by(channels).copied());
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::Empty);
    }

    let duration_secs = samples.len() as f64 / sample_rate as f64;

    debug!(
        "decoded {} samples, {} Hz, {} channel(s), {:.3}s",
        samples.len(),
        sample_rate,
        channels,
        duration_secs
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
        duration_secs,
    })
}
