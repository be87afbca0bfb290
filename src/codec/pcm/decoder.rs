//! PCM decoder implementation

use super::PcmConfig;
use crate::error::{Error, Result};
use crate::util::SampleFormat;

/// De-interleaves little-endian linear PCM back to planar samples
#[derive(Debug, Clone, Copy)]
pub struct PcmDecoder {
    config: PcmConfig,
}

impl PcmDecoder {
    /// Create a new PCM decoder
    pub fn new(config: PcmConfig) -> Self {
        PcmDecoder { config }
    }

    /// Get the decoder configuration
    pub fn config(&self) -> &PcmConfig {
        &self.config
    }

    /// Decode interleaved bytes into one sample vector per channel
    ///
    /// Values narrower than 32 bits are sign-extended.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Vec<i32>>> {
        let frame_bytes = self.config.bytes_per_frame();
        if frame_bytes == 0 {
            return Err(Error::config("PCM decoder configured with zero channels"));
        }
        if data.len() % frame_bytes != 0 {
            return Err(Error::malformed(format!(
                "PCM payload of {} bytes is not a multiple of block align {}",
                data.len(),
                frame_bytes
            )));
        }

        let channels = self.config.channels as usize;
        let nb_samples = data.len() / frame_bytes;
        let mut planes = vec![Vec::with_capacity(nb_samples); channels];

        let width = self.config.bytes_per_sample();
        for (i, sample) in data.chunks_exact(width).enumerate() {
            planes[i % channels].push(read_sample(self.config.sample_format, sample));
        }

        Ok(planes)
    }
}

fn read_sample(format: SampleFormat, b: &[u8]) -> i32 {
    match format {
        SampleFormat::S8 => b[0] as i8 as i32,
        SampleFormat::S16 => i16::from_le_bytes([b[0], b[1]]) as i32,
        // Place the 3 bytes in the top of the word, then shift back down
        SampleFormat::S24 => i32::from_le_bytes([0, b[0], b[1], b[2]]) >> 8,
        SampleFormat::S32 => i32::from_le_bytes([b[0], b[1], b[2], b[3]]),
    }
}
