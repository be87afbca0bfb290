//! PCM encoder implementation

use super::PcmConfig;
use crate::codec::DecodedFrame;
use crate::error::{Error, Result};
use crate::util::SampleFormat;

/// Interleaving PCM encoder
///
/// Output is sample-major: for each sample index every channel's value is
/// emitted before moving to the next index.
#[derive(Debug, Clone, Copy)]
pub struct PcmEncoder {
    config: PcmConfig,
}

impl PcmEncoder {
    /// Create a new PCM encoder
    pub fn new(config: PcmConfig) -> Self {
        PcmEncoder { config }
    }

    /// Get the encoder configuration
    pub fn config(&self) -> &PcmConfig {
        &self.config
    }

    /// Encoded length of a frame with `block_size` samples per channel
    pub fn encoded_len(&self, block_size: u32) -> usize {
        block_size as usize * self.config.bytes_per_frame()
    }

    /// Append the interleaved bytes of `frame` to `out`
    ///
    /// Every channel is checked before anything is appended, so on
    /// `CorruptFrame` the buffer keeps its previous length. Returns the
    /// number of bytes appended.
    pub fn encode_into(&self, frame: &DecodedFrame, out: &mut Vec<u8>) -> Result<usize> {
        let block_size = frame.block_size as usize;
        let channels = self.config.channels as usize;

        if frame.channels.len() < channels {
            return Err(Error::CorruptFrame {
                channel: frame.channels.len(),
                actual: 0,
                expected: block_size,
            });
        }

        let planes = &frame.channels[..channels];
        for (channel, samples) in planes.iter().enumerate() {
            if samples.len() < block_size {
                return Err(Error::CorruptFrame {
                    channel,
                    actual: samples.len(),
                    expected: block_size,
                });
            }
        }

        let len = self.encoded_len(frame.block_size);
        out.reserve(len);

        match self.config.sample_format {
            SampleFormat::S8 => interleave(planes, block_size, out, |s| [s as u8]),
            SampleFormat::S16 => interleave(planes, block_size, out, |s| (s as i16).to_le_bytes()),
            SampleFormat::S24 => interleave(planes, block_size, out, int24_le_bytes),
            SampleFormat::S32 => interleave(planes, block_size, out, i32::to_le_bytes),
        }

        Ok(len)
    }

    /// Encode a frame into a fresh buffer
    pub fn encode(&self, frame: &DecodedFrame) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len(frame.block_size));
        self.encode_into(frame, &mut out)?;
        Ok(out)
    }
}

/// Encode one frame at the given bit depth and channel count
///
/// Unsupported depths fail before any byte is produced.
pub fn encode_frame(frame: &DecodedFrame, bits_per_sample: u16, channels: u16) -> Result<Vec<u8>> {
    let config = PcmConfig::new(bits_per_sample, channels)?;
    PcmEncoder::new(config).encode(frame)
}

/// Low 24 bits of a sample, little-endian
///
/// A value with bit 23 set is sign-extended through the full word first.
pub fn int24_le_bytes(sample: i32) -> [u8; 3] {
    let mut n = sample;
    if n & 0x80_0000 != 0 {
        n |= !0xFF_FFFF;
    }
    let b = n.to_le_bytes();
    [b[0], b[1], b[2]]
}

fn interleave<const N: usize>(
    planes: &[Vec<i32>],
    block_size: usize,
    out: &mut Vec<u8>,
    pack: impl Fn(i32) -> [u8; N],
) {
    for i in 0..block_size {
        for plane in planes {
            out.extend_from_slice(&pack(plane[i]));
        }
    }
}
