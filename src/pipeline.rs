//! Conversion pipeline
//!
//! Pulls frames from a [`FrameSource`], interleaves them into linear PCM
//! and writes a WAV file to a seekable sink. The header is reserved with
//! a placeholder before the first payload byte and patched once the total
//! payload size is known.
//!
//! ```rust,ignore
//! use flacwav_lib::pipeline::convert;
//!
//! let input = std::fs::File::open("in.flac")?;
//! let mut output = std::io::Cursor::new(Vec::new());
//! let summary = convert(input, &mut output)?;
//! println!("{} bytes, {} samples", summary.total_bytes_written, summary.total_samples);
//! ```

use crate::codec::{FlacDecoder, FrameSource, PcmConfig, PcmEncoder};
use crate::error::{Error, Result};
use crate::format::wav::{WavMuxer, WAV_HEADER_SIZE};
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Largest per-frame encode buffer accepted by default (8192 × 16 × 4 bytes)
pub const MAX_FRAME_BUFFER_SIZE: usize = 8192 * 16 * 4;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Upper bound on `max_block_size × channels × bytes_per_sample`
    pub max_frame_buffer: usize,
}

impl PipelineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-frame buffer limit
    pub fn with_max_frame_buffer(mut self, bytes: usize) -> Self {
        self.max_frame_buffer = bytes;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_frame_buffer: MAX_FRAME_BUFFER_SIZE,
        }
    }
}

/// Pipeline lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Not started
    Init,
    /// Decoding and writing frames
    Streaming,
    /// Patching the header
    Finalizing,
    /// Finished successfully
    Done,
    /// Stopped on an error
    Aborted,
}

/// Running totals for one conversion
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionCounters {
    /// Payload bytes written (header excluded)
    pub total_payload_bytes: u64,
    /// Samples per channel written
    pub total_samples: u64,
}

/// Result of a successful conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Payload plus the 44-byte header
    pub total_bytes_written: u64,
    /// Samples per channel
    pub total_samples: u64,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

/// One-pass conversion of a frame source into a WAV sink
pub struct ConversionPipeline<S: FrameSource> {
    source: S,
    config: PipelineConfig,
    state: PipelineState,
    counters: ConversionCounters,
}

impl<S: FrameSource> ConversionPipeline<S> {
    /// Create a pipeline with the default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, PipelineConfig::default())
    }

    /// Create a pipeline with an explicit configuration
    pub fn with_config(source: S, config: PipelineConfig) -> Self {
        ConversionPipeline {
            source,
            config,
            state: PipelineState::Init,
            counters: ConversionCounters::default(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Totals accumulated so far
    pub fn counters(&self) -> ConversionCounters {
        self.counters
    }

    /// Run the conversion to completion
    ///
    /// On error the sink may hold a placeholder header and a partial
    /// payload and should be discarded.
    pub fn run<W: Write + Seek>(&mut self, sink: &mut W) -> Result<ConversionSummary> {
        if self.state != PipelineState::Init {
            return Err(Error::config(format!(
                "Pipeline cannot run from state {:?}",
                self.state
            )));
        }

        match self.run_inner(sink) {
            Ok(summary) => {
                self.state = PipelineState::Done;
                Ok(summary)
            }
            Err(e) => {
                warn!("Conversion aborted in {:?}: {}", self.state, e);
                self.state = PipelineState::Aborted;
                Err(e)
            }
        }
    }

    fn run_inner<W: Write + Seek>(&mut self, sink: &mut W) -> Result<ConversionSummary> {
        let info = self.source.stream_info();
        let format = info.format;

        format.validate()?;
        let encoder = PcmEncoder::new(PcmConfig::from_stream(&format)?);

        let buffer_size = info.max_frame_bytes();
        if buffer_size > self.config.max_frame_buffer {
            return Err(Error::OversizedBuffer {
                size: buffer_size,
                limit: self.config.max_frame_buffer,
            });
        }

        info!(
            "Converting {} Hz, {} channels, {} bit stream (max block {})",
            format.sample_rate, format.channels, format.bits_per_sample, info.max_block_size
        );

        let mut buffer = Vec::with_capacity(buffer_size);
        let mut muxer = WavMuxer::new(&mut *sink, format);
        self.state = PipelineState::Streaming;

        while let Some(frame) = self.source.next_frame().map_err(Error::decode)? {
            encoder.encode_into(&frame, &mut buffer)?;
            muxer.write_payload(&buffer)?;

            self.counters.total_payload_bytes += buffer.len() as u64;
            self.counters.total_samples += frame.block_size as u64;
            trace!(
                "Wrote frame: {} samples, {} bytes",
                frame.block_size,
                buffer.len()
            );

            buffer.clear();
        }

        self.state = PipelineState::Finalizing;
        if self.counters.total_samples == 0 {
            return Err(Error::EmptyStream);
        }

        muxer.finalize()?;

        let summary = ConversionSummary {
            total_bytes_written: self.counters.total_payload_bytes + WAV_HEADER_SIZE as u64,
            total_samples: self.counters.total_samples,
            sample_rate: format.sample_rate,
        };
        info!(
            "Conversion complete: {} bytes, {} samples",
            summary.total_bytes_written, summary.total_samples
        );
        Ok(summary)
    }
}

/// Decode a lossless stream and write it as a WAV file to `sink`
pub fn convert<R, W>(source: R, sink: &mut W) -> Result<ConversionSummary>
where
    R: Read + Send + Sync + 'static,
    W: Write + Seek,
{
    let decoder = FlacDecoder::new(source)?;
    convert_frames(decoder, sink)
}

/// Write the frames of any source as a WAV file to `sink`
pub fn convert_frames<S, W>(source: S, sink: &mut W) -> Result<ConversionSummary>
where
    S: FrameSource,
    W: Write + Seek,
{
    ConversionPipeline::new(source).run(sink)
}

/// Convert a lossless file on disk into a WAV file
pub fn convert_file(input: &Path, output: &Path) -> Result<ConversionSummary> {
    let decoder = FlacDecoder::open(input)?;
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);

    debug!("Writing {}", output.display());
    convert_frames(decoder, &mut writer)
}
