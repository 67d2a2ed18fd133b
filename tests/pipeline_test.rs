// tests/pipeline_test.rs
//
// End-to-end pipeline properties: metadata pass-through, determinism,
// dimension bounds, frequency-axis orientation, and decoding of real WAV
// container bytes synthesized with hound.

use std::io::Cursor;

use spectropix::{
    decode_bytes, process_audio_bytes, process_decoded, DecodedAudio, SpectrogramConfig,
};

/// Synthesize a mono sine clip directly as decoded samples.
fn sine_audio(freq: f64, duration_secs: f64, sample_rate: u32) -> DecodedAudio {
    let n = (duration_secs * sample_rate as f64) as usize;
    let samples: Vec<f32> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate as f64).sin() as f32)
        .collect();
    DecodedAudio {
        samples,
        sample_rate,
        channels: 1,
        duration_secs,
    }
}

/// Write an in-memory 16-bit WAV with the given per-channel sample
/// generator.
fn wav_bytes(sample_rate: u32, channels: u16, frames: usize, f: impl Fn(usize, u16) -> f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            for ch in 0..channels {
                let v = (f(i, ch).clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer.write_sample(v).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn one_second_sine_scenario() {
    // 1 s, 44.1 kHz, 1 kHz tone, default configuration: height is clamped
    // from 1024 bins to 512 rows and metadata passes through bit-exact.
    let audio = sine_audio(1000.0, 1.0, 44100);
    let out = process_decoded(&audio, &SpectrogramConfig::default()).unwrap();

    assert_eq!(out.metadata.duration_secs, 1.0);
    assert_eq!(out.metadata.sample_rate, 44100);
    assert_eq!(out.metadata.channels, 1);

    let image = image::load_from_memory(&out.png).unwrap().to_rgba8();
    assert!(image.width() <= 2000);
    assert_eq!(image.height(), 512);
}

#[test]
fn one_second_sine_band_position() {
    // Same scenario without overlays so raw grid pixels are checkable:
    // 1 kHz lands in DFT bin 46 of 1024; with 2 bins per row that is
    // grid row 23, painted at image row 512-1-23.
    let audio = sine_audio(1000.0, 1.0, 44100);
    let config = SpectrogramConfig {
        draw_labels: false,
        ..SpectrogramConfig::default()
    };
    let out = process_decoded(&audio, &config).unwrap();
    let image = image::load_from_memory(&out.png).unwrap().to_rgba8();

    let height = image.height();
    let expected = height - 1 - 23;

    for x in 1..image.width() - 1 {
        let brightest = (0..height)
            .max_by_key(|&y| {
                let p = image.get_pixel(x, y);
                p.0[0] as u32 + p.0[1] as u32 + p.0[2] as u32
            })
            .unwrap();
        assert!(
            (brightest as i64 - expected as i64).abs() <= 2,
            "column {}: brightest row {} not near {}",
            x,
            brightest,
            expected
        );
    }
}

#[test]
fn pipeline_is_idempotent() {
    let audio = sine_audio(440.0, 0.25, 16000);
    let config = SpectrogramConfig {
        fft_size: 512,
        ..SpectrogramConfig::default()
    };
    let a = process_decoded(&audio, &config).unwrap();
    let b = process_decoded(&audio, &config).unwrap();
    assert_eq!(a.png, b.png);
}

#[test]
fn silence_produces_uniform_darkest_image() {
    let audio = DecodedAudio {
        samples: vec![0.0f32; 16000],
        sample_rate: 16000,
        channels: 1,
        duration_secs: 1.0,
    };
    let config = SpectrogramConfig {
        fft_size: 512,
        draw_labels: false,
        ..SpectrogramConfig::default()
    };
    let out = process_decoded(&audio, &config).unwrap();
    let image = image::load_from_memory(&out.png).unwrap().to_rgba8();
    for pixel in image.pixels() {
        assert_eq!(pixel.0, [0, 0, 0, 255]);
    }
}

#[test]
fn wav_decode_round_trip() {
    let rate = 22050;
    let frames = 22050;
    let bytes = wav_bytes(rate, 1, frames, |i, _| {
        (2.0 * std::f32::consts::PI * 440.0 * i as f32 / rate as f32).sin() * 0.8
    });

    let audio = decode_bytes(&bytes).unwrap();
    assert_eq!(audio.sample_rate, rate);
    assert_eq!(audio.channels, 1);
    assert_eq!(audio.samples.len(), frames);
    assert!((audio.duration_secs - 1.0).abs() < 1e-6);
}

#[test]
fn stereo_wav_uses_channel_zero() {
    // Left channel carries a tone, right channel is silent; the decoded
    // samples must be the tone.
    let rate = 8000;
    let bytes = wav_bytes(rate, 2, 8000, |i, ch| {
        if ch == 0 {
            (2.0 * std::f32::consts::PI * 500.0 * i as f32 / rate as f32).sin() * 0.5
        } else {
            0.0
        }
    });

    let audio = decode_bytes(&bytes).unwrap();
    assert_eq!(audio.channels, 2);
    assert_eq!(audio.samples.len(), 8000);

    let rms = (audio.samples.iter().map(|s| s * s).sum::<f32>() / 8000.0).sqrt();
    assert!(rms > 0.2, "channel 0 should carry the tone, rms {}", rms);
}

#[test]
fn wav_bytes_through_full_pipeline() {
    let rate = 16000;
    let bytes = wav_bytes(rate, 1, 16000, |i, _| {
        (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / rate as f32).sin() * 0.7
    });

    let config = SpectrogramConfig {
        fft_size: 1024,
        ..SpectrogramConfig::default()
    };
    let out = process_audio_bytes(&bytes, &config).unwrap();
    assert_eq!(out.metadata.sample_rate, rate);
    assert_eq!(out.metadata.channels, 1);
    assert!((out.metadata.duration_secs - 1.0).abs() < 1e-3);

    let roundtrip = spectropix::data_url_to_bytes(&out.data_url).unwrap();
    assert_eq!(roundtrip, out.png);
}

#[test]
fn invalid_bytes_fail_with_decode_error() {
    let err = process_audio_bytes(&[0u8; 64], &SpectrogramConfig::default());
    assert!(matches!(
        err,
        Err(spectropix::PipelineError::Decode(_))
    ));
}

#[test]
fn clip_shorter_than_window_still_renders() {
    let audio = DecodedAudio {
        samples: vec![0.3f32; 500],
        sample_rate: 8000,
        channels: 1,
        duration_secs: 500.0 / 8000.0,
    };
    let config = SpectrogramConfig {
        fft_size: 2048,
        draw_labels: false,
        ..SpectrogramConfig::default()
    };
    let out = process_decoded(&audio, &config).unwrap();
    let image = image::load_from_memory(&out.png).unwrap().to_rgba8();
    assert_eq!(image.width(), 1);
}
