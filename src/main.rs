//! flacwav CLI - lossless audio to WAV
//!
//! A command-line tool for converting lossless audio to linear PCM WAV
//! and inspecting WAV headers

use clap::{Parser, Subcommand};
use flacwav_lib::codec::{PcmConfig, PcmDecoder};
use flacwav_lib::format::{generate_header, parse_header};
use flacwav_lib::{convert_file, init, Config};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "flacwav")]
#[command(about = "flacwav - lossless audio to linear PCM WAV", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a lossless file to WAV
    Convert {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Parse a WAV header and report the payload
    Info {
        /// Input WAV file path
        input: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print a generated 44-byte header as hex
    Header {
        /// Payload size in bytes
        #[arg(long)]
        payload_size: u32,

        /// Sample rate in Hz
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Number of channels
        #[arg(long, default_value = "2")]
        channels: u16,

        /// Bits per sample
        #[arg(long, default_value = "16")]
        bits: u16,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init(Config {
        verbose: cli.verbose,
        debug: cli.debug,
    })?;

    info!("flacwav v{}", flacwav_lib::VERSION);

    match cli.command {
        Commands::Convert { input, output } => cmd_convert(&input, &output)?,
        Commands::Info { input, json } => cmd_info(&input, json)?,
        Commands::Header {
            payload_size,
            sample_rate,
            channels,
            bits,
        } => cmd_header(payload_size, sample_rate, channels, bits),
    }

    Ok(())
}

fn cmd_convert(input: &PathBuf, output: &PathBuf) -> anyhow::Result<()> {
    info!("Converting {} -> {}", input.display(), output.display());

    let summary = convert_file(input, output)?;

    println!("Wrote {}", output.display());
    println!("  Bytes written: {}", summary.total_bytes_written);
    println!("  Samples: {}", summary.total_samples);
    println!("  Sample rate: {} Hz", summary.sample_rate);

    Ok(())
}

fn cmd_info(input: &PathBuf, json: bool) -> anyhow::Result<()> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct InfoReport {
        file: String,
        sample_rate: u32,
        channels: u16,
        bits_per_sample: u16,
        byte_rate: u32,
        block_align: u16,
        data_size: u32,
        data_start: u64,
        num_samples: u64,
        duration_seconds: f64,
        peaks: Vec<u32>,
    }

    let mut reader = BufReader::new(File::open(input)?);
    let header = parse_header(&mut reader)?;

    let mut payload = Vec::new();
    reader
        .take(header.data_size as u64)
        .read_to_end(&mut payload)?;

    let config = PcmConfig::new(header.bits_per_sample(), header.channels())?;
    let usable = payload.len() - payload.len() % config.bytes_per_frame().max(1);
    let planes = PcmDecoder::new(config).decode(&payload[..usable])?;
    let peaks = planes
        .iter()
        .map(|plane| plane.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0))
        .collect();

    let result = InfoReport {
        file: input.display().to_string(),
        sample_rate: header.sample_rate(),
        channels: header.channels(),
        bits_per_sample: header.bits_per_sample(),
        byte_rate: header.format.byte_rate,
        block_align: header.format.block_align,
        data_size: header.data_size,
        data_start: header.data_start,
        num_samples: header.num_samples(),
        duration_seconds: header.duration_seconds(),
        peaks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("File: {}", result.file);
    println!("  Sample rate: {} Hz", result.sample_rate);
    println!("  Channels: {}", result.channels);
    println!("  Bits per sample: {}", result.bits_per_sample);
    println!("  Byte rate: {}", result.byte_rate);
    println!("  Block align: {}", result.block_align);
    println!("  Data: {} bytes at offset {}", result.data_size, result.data_start);
    println!("  Samples: {}", result.num_samples);
    println!("  Duration: {:.2}s", result.duration_seconds);
    for (ch, peak) in result.peaks.iter().enumerate() {
        println!("  Peak ch{}: {}", ch, peak);
    }
    if usable < header.data_size as usize {
        println!("  Warning: payload is shorter than the declared data size");
    }

    Ok(())
}

fn cmd_header(payload_size: u32, sample_rate: u32, channels: u16, bits: u16) {
    let header = generate_header(payload_size, sample_rate, channels, bits);
    let hex: Vec<String> = header.iter().map(|b| format!("{:02X}", b)).collect();
    for line in hex.chunks(16) {
        println!("{}", line.join(" "));
    }
}
