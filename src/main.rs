// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use colorful::Colorful;
use std::path::PathBuf;

use spectropix::{process_audio_bytes, SpectrogramConfig};

#[derive(Parser, Debug)]
#[command(name = "spectropix")]
#[command(about = "Convert an audio clip into a labeled spectrogram PNG")]
struct Args {
    /// Input audio file (wav, mp3, ogg, flac, m4a, aac)
    input: PathBuf,

    /// Output PNG path (defaults to the input name with .png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analysis window length in samples
    #[arg(long, default_value = "2048")]
    fft_size: usize,

    /// Maximum image width in pixels
    #[arg(long, default_value = "2000")]
    max_width: u32,

    /// Maximum image height in pixels
    #[arg(long, default_value = "512")]
    max_height: u32,

    /// Skip the title/axis/tick overlays
    #[arg(long)]
    no_labels: bool,

    /// Print clip metadata as JSON on stdout
    #[arg(short, long)]
    metadata: bool,

    /// Print the image as a base64 data URL instead of writing a file
    #[arg(long)]
    data_url: bool,

    /// Verbose output (debug-level logging, including render progress)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;

    let config = SpectrogramConfig {
        fft_size: args.fft_size,
        max_width: args.max_width,
        max_height: args.max_height,
        draw_labels: !args.no_labels,
    };

    println!("Processing: {}", args.input.display().to_string().cyan());

    let out = process_audio_bytes(&bytes, &config)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    println!("  Duration: {:.2}s", out.metadata.duration_secs);
    println!("  Sample Rate: {} Hz", out.metadata.sample_rate);
    println!("  Channels: {}", out.metadata.channels);

    if args.data_url {
        println!("{}", out.data_url);
    } else {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| args.input.with_extension("png"));
        std::fs::write(&output, &out.png)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("  Spectrogram saved to: {}", output.display().to_string().green());
    }

    if args.metadata {
        println!("{}", serde_json::to_string_pretty(&out.metadata)?);
    }

    Ok(())
}
