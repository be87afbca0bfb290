//! flacwav - lossless audio to linear PCM WAV conversion
//!
//! Decodes a lossless stream frame by frame, interleaves the samples into
//! little-endian PCM and writes a canonical 44-byte-header WAV file to a
//! seekable sink, patching the header sizes once the stream is consumed.
//!
//! # Architecture
//!
//! - `codec`: frame source abstraction, Symphonia-backed FLAC decoder and
//!   the PCM interleaver
//! - `format`: RIFF/WAVE header generation, parsing and the two-pass muxer
//! - `pipeline`: the decode → encode → write → patch-up state machine
//! - `util`: sample format definitions

pub mod codec;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod util;

pub use error::{Error, Result};
pub use format::{generate_header, parse_header, WavHeader, WAV_HEADER_SIZE};
pub use pipeline::{
    convert, convert_file, convert_frames, ConversionPipeline, ConversionSummary, PipelineConfig,
};

/// flacwav version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the flacwav library
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

/// Initialize the flacwav library with the given configuration
///
/// Installs a `tracing` subscriber when verbose or debug output is asked
/// for. `RUST_LOG` takes precedence over the flags when set.
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}
