//! WAV file header structures, generation and parsing

use super::{ChunkHeader, DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::error::{Error, Result};
use std::io::{self, Read};
use tracing::debug;

/// Size of the generated header: RIFF/WAVE, 16-byte fmt chunk, data chunk header
pub const WAV_HEADER_SIZE: usize = 44;

/// Size of the fmt chunk body for linear PCM
const PCM_FMT_SIZE: u32 = 16;

/// WAV format tag identifying the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// PCM (uncompressed)
    Pcm,
    /// IEEE Float
    IeeeFloat,
    /// Extensible format
    Extensible,
    /// Unknown format
    Unknown(u16),
}

impl From<u16> for FormatTag {
    fn from(val: u16) -> Self {
        match val {
            0x0001 => FormatTag::Pcm,
            0x0003 => FormatTag::IeeeFloat,
            0xFFFE => FormatTag::Extensible,
            other => FormatTag::Unknown(other),
        }
    }
}

impl From<FormatTag> for u16 {
    fn from(tag: FormatTag) -> Self {
        match tag {
            FormatTag::Pcm => 0x0001,
            FormatTag::IeeeFloat => 0x0003,
            FormatTag::Extensible => 0xFFFE,
            FormatTag::Unknown(val) => val,
        }
    }
}

/// WAV format chunk data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Format tag (codec ID)
    pub format_tag: FormatTag,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Block alignment
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Linear PCM format with derived byte rate and block alignment
    ///
    /// Derived fields wrap to their field widths.
    pub fn pcm(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        let byte_rate = sample_rate
            .wrapping_mul(channels as u32)
            .wrapping_mul(bits_per_sample as u32)
            / 8;
        let block_align = ((channels as u32 * bits_per_sample as u32) / 8) as u16;

        WavFormat {
            format_tag: FormatTag::Pcm,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
        }
    }

    /// Parse WAV format chunk from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < PCM_FMT_SIZE as usize {
            return Err(Error::malformed(format!(
                "invalid fmt chunk size: {}",
                data.len()
            )));
        }

        Ok(WavFormat {
            format_tag: u16::from_le_bytes([data[0], data[1]]).into(),
            channels: u16::from_le_bytes([data[2], data[3]]),
            sample_rate: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
            byte_rate: u32::from_le_bytes([data[8], data[9], data[10], data[11]]),
            block_align: u16::from_le_bytes([data[12], data[13]]),
            bits_per_sample: u16::from_le_bytes([data[14], data[15]]),
        })
    }

    /// Convert to the 16-byte fmt chunk body
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..2].copy_from_slice(&u16::from(self.format_tag).to_le_bytes());
        bytes[2..4].copy_from_slice(&self.channels.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.byte_rate.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        bytes
    }
}

/// Parsed or generated WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// RIFF chunk size (file size - 8)
    pub riff_size: u32,
    /// WAV format information
    pub format: WavFormat,
    /// Data chunk size in bytes
    pub data_size: u32,
    /// Offset of the first payload byte from the start of the stream
    pub data_start: u64,
}

impl WavHeader {
    /// Header for a linear PCM payload of `data_size` bytes
    pub fn pcm(data_size: u32, sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        WavHeader {
            riff_size: data_size.wrapping_add(WAV_HEADER_SIZE as u32 - 8),
            format: WavFormat::pcm(sample_rate, channels, bits_per_sample),
            data_size,
            data_start: WAV_HEADER_SIZE as u64,
        }
    }

    /// Serialize as the fixed 44-byte layout
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_SIZE] {
        let mut header = [0u8; WAV_HEADER_SIZE];

        // RIFF
        header[0..4].copy_from_slice(RIFF_MAGIC);
        header[4..8].copy_from_slice(&self.riff_size.to_le_bytes());
        header[8..12].copy_from_slice(WAVE_MAGIC);

        // fmt
        header[12..20].copy_from_slice(&ChunkHeader::new(FMT_CHUNK, PCM_FMT_SIZE).to_bytes());
        header[20..36].copy_from_slice(&self.format.to_bytes());

        // data
        header[36..44].copy_from_slice(&ChunkHeader::new(DATA_CHUNK, self.data_size).to_bytes());

        header
    }

    /// Read a header from a stream, stopping at the first payload byte
    ///
    /// Chunks other than `fmt ` and `data` are skipped. The `data` chunk
    /// must come after the `fmt ` chunk.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut riff_header = [0u8; 12];
        reader
            .read_exact(&mut riff_header)
            .map_err(|e| Error::truncated("RIFF header", e))?;

        if &riff_header[0..4] != RIFF_MAGIC || &riff_header[8..12] != WAVE_MAGIC {
            return Err(Error::invalid_container("missing RIFF/WAVE"));
        }

        let riff_size = u32::from_le_bytes([
            riff_header[4],
            riff_header[5],
            riff_header[6],
            riff_header[7],
        ]);

        let mut position = riff_header.len() as u64;
        let mut format: Option<WavFormat> = None;

        loop {
            let chunk = ChunkHeader::read(reader)?;
            position += 8;

            if &chunk.id == FMT_CHUNK {
                if chunk.size < PCM_FMT_SIZE {
                    return Err(Error::malformed(format!(
                        "invalid fmt chunk size: {}",
                        chunk.size
                    )));
                }

                let mut fmt_data = [0u8; PCM_FMT_SIZE as usize];
                reader
                    .read_exact(&mut fmt_data)
                    .map_err(|e| Error::truncated("fmt chunk", e))?;
                // Extension fields are not needed for PCM
                skip_exact(reader, (chunk.size - PCM_FMT_SIZE) as u64)
                    .map_err(|e| Error::truncated("fmt chunk", e))?;
                position += chunk.size as u64;

                let parsed = WavFormat::from_bytes(&fmt_data)?;
                if parsed.format_tag != FormatTag::Pcm {
                    return Err(Error::UnsupportedAudioFormat(parsed.format_tag.into()));
                }
                format = Some(parsed);
            } else if &chunk.id == DATA_CHUNK {
                let format = format
                    .ok_or_else(|| Error::malformed("data chunk found before fmt chunk"))?;

                return Ok(WavHeader {
                    riff_size,
                    format,
                    data_size: chunk.size,
                    data_start: position,
                });
            } else {
                debug!("Skipping {:?} chunk ({} bytes)", chunk.tag(), chunk.size);
                skip_exact(reader, chunk.size as u64)
                    .map_err(|e| Error::truncated(format!("{} chunk", chunk.tag()), e))?;
                position += chunk.size as u64;
            }
        }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Number of channels
    pub fn channels(&self) -> u16 {
        self.format.channels
    }

    /// Bits per sample
    pub fn bits_per_sample(&self) -> u16 {
        self.format.bits_per_sample
    }

    /// Get total number of samples (per channel)
    pub fn num_samples(&self) -> u64 {
        match self.format.block_align {
            0 => 0,
            align => self.data_size as u64 / align as u64,
        }
    }

    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        match self.format.sample_rate {
            0 => 0.0,
            rate => self.num_samples() as f64 / rate as f64,
        }
    }
}

/// Generate the 44-byte header for a linear PCM payload
pub fn generate_header(
    payload_size: u32,
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
) -> [u8; WAV_HEADER_SIZE] {
    WavHeader::pcm(payload_size, sample_rate, channels, bits_per_sample).to_bytes()
}

/// Parse a WAV header, leaving `reader` at the first payload byte
pub fn parse_header<R: Read + ?Sized>(reader: &mut R) -> Result<WavHeader> {
    WavHeader::read(reader)
}

fn skip_exact<R: Read + ?Sized>(reader: &mut R, len: u64) -> io::Result<()> {
    let skipped = io::copy(&mut (&mut *reader).take(len), &mut io::sink())?;
    if skipped < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, skipped {}", len, skipped),
        ));
    }
    Ok(())
}
