//! Decoded frame and stream metadata types

use crate::error::{Error, Result};
use crate::util::SampleFormat;

/// Format parameters of a decoded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Bits per sample (8, 16, 24 or 32)
    pub bits_per_sample: u16,
}

impl StreamFormat {
    /// Create a new stream format
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        StreamFormat {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Resolve the sample format, rejecting unsupported depths
    pub fn sample_format(&self) -> Result<SampleFormat> {
        SampleFormat::from_bits(self.bits_per_sample)
    }

    /// Bytes per interleaved sample instant (all channels)
    pub fn block_align(&self) -> usize {
        self.channels as usize * (self.bits_per_sample as usize / 8)
    }

    /// Check the format can be written as linear PCM
    pub fn validate(&self) -> Result<()> {
        self.sample_format()?;
        if self.channels == 0 {
            return Err(Error::config("Invalid channel count: 0"));
        }
        Ok(())
    }
}

/// Stream metadata exposed by a frame source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    /// Format of every frame in the stream
    pub format: StreamFormat,
    /// Largest block size (samples per channel) any frame may carry
    pub max_block_size: u32,
}

impl StreamInfo {
    /// Create stream info
    pub fn new(format: StreamFormat, max_block_size: u32) -> Self {
        StreamInfo {
            format,
            max_block_size,
        }
    }

    /// Bytes needed to hold the largest encoded frame
    pub fn max_frame_bytes(&self) -> usize {
        self.max_block_size as usize * self.format.block_align()
    }
}

/// One block of per-channel samples from the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Samples per channel in this frame
    pub block_size: u32,
    /// Per-channel sample sequences, each at least `block_size` long
    pub channels: Vec<Vec<i32>>,
}

impl DecodedFrame {
    /// Create a frame from planar channel data
    pub fn new(block_size: u32, channels: Vec<Vec<i32>>) -> Self {
        DecodedFrame {
            block_size,
            channels,
        }
    }
}
