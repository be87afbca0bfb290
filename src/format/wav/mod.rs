//! WAV audio format support
//!
//! This module implements the minimal RIFF/WAVE profile used for linear
//! PCM output: a 44-byte header (RIFF/WAVE, a 16-byte `fmt ` chunk and the
//! `data` chunk header) followed by the interleaved payload.

pub mod header;
pub mod muxer;

pub use header::{generate_header, parse_header, FormatTag, WavFormat, WavHeader, WAV_HEADER_SIZE};
pub use muxer::WavMuxer;

use crate::error::{Error, Result};
use std::io::Read;

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// Chunk header (4 byte ID + 4 byte size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    pub size: u32,
}

impl ChunkHeader {
    /// Create a chunk header
    pub fn new(id: &[u8; 4], size: u32) -> Self {
        ChunkHeader { id: *id, size }
    }

    /// Decode a chunk header from its 8 bytes
    pub fn from_bytes(bytes: &[u8; 8]) -> Self {
        let mut id = [0u8; 4];
        id.copy_from_slice(&bytes[0..4]);

        let size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        ChunkHeader { id, size }
    }

    /// Read the next chunk header from a stream
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; 8];
        reader
            .read_exact(&mut bytes)
            .map_err(|e| Error::truncated("chunk header", e))?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Convert chunk header to bytes
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&self.id);
        bytes[4..8].copy_from_slice(&self.size.to_le_bytes());
        bytes
    }

    /// Printable form of the chunk ID
    pub fn tag(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}
