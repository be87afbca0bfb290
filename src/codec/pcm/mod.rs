//! PCM (Pulse Code Modulation) codec
//!
//! Converts between planar integer frames and interleaved little-endian
//! linear PCM bytes at 8, 16, 24 or 32 bits per sample.

pub mod decoder;
pub mod encoder;

pub use decoder::PcmDecoder;
pub use encoder::{encode_frame, int24_le_bytes, PcmEncoder};

use crate::codec::StreamFormat;
use crate::error::Result;
use crate::util::SampleFormat;

/// PCM codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmConfig {
    /// Sample format
    pub sample_format: SampleFormat,
    /// Number of channels
    pub channels: u16,
}

impl PcmConfig {
    /// Create a new PCM configuration from a declared bit depth
    pub fn new(bits_per_sample: u16, channels: u16) -> Result<Self> {
        Ok(PcmConfig {
            sample_format: SampleFormat::from_bits(bits_per_sample)?,
            channels,
        })
    }

    /// Configuration matching a decoded stream
    pub fn from_stream(format: &StreamFormat) -> Result<Self> {
        Self::new(format.bits_per_sample, format.channels)
    }

    /// Get bytes per sample for a single channel
    pub fn bytes_per_sample(&self) -> usize {
        self.sample_format.sample_size()
    }

    /// Get bytes per frame (all channels)
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }
}
