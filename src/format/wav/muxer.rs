//! WAV file muxer implementation
//!
//! The muxer reserves the header with a zero-filled placeholder on the
//! first payload write and patches it in place once the payload size is
//! known, so the sink must support seeking.

use super::header::{WavHeader, WAV_HEADER_SIZE};
use crate::codec::StreamFormat;
use crate::error::{Error, Result};
use std::io::{self, Seek, SeekFrom, Write};
use tracing::{debug, warn};

/// Two-pass linear PCM WAV writer
pub struct WavMuxer<W: Write + Seek> {
    writer: W,
    format: StreamFormat,
    header_written: bool,
    data_size: u64,
}

impl<W: Write + Seek> WavMuxer<W> {
    /// Create a new WAV muxer over a seekable sink
    pub fn new(writer: W, format: StreamFormat) -> Self {
        WavMuxer {
            writer,
            format,
            header_written: false,
            data_size: 0,
        }
    }

    /// Check if the placeholder header has been written
    pub fn is_header_written(&self) -> bool {
        self.header_written
    }

    /// Payload bytes written so far
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Reserve the header's bytes with zeros
    pub fn write_placeholder(&mut self) -> Result<()> {
        if self.header_written {
            return Err(Error::config("Header already written"));
        }

        self.writer
            .write_all(&[0u8; WAV_HEADER_SIZE])
            .map_err(|e| Error::write("placeholder header", e))?;

        self.header_written = true;
        debug!("Wrote {} byte placeholder header", WAV_HEADER_SIZE);
        Ok(())
    }

    /// Append interleaved PCM bytes, reserving the header first if needed
    pub fn write_payload(&mut self, data: &[u8]) -> Result<()> {
        if !self.header_written {
            self.write_placeholder()?;
        }

        self.writer
            .write_all(data)
            .map_err(|e| Error::write("frame payload", e))?;

        self.data_size += data.len() as u64;
        Ok(())
    }

    /// Overwrite the placeholder with the real header
    ///
    /// Seeking back to the start is required; seeking to the end afterwards
    /// is attempted but a failure there only logs a warning.
    pub fn finalize(&mut self) -> Result<()> {
        if !self.header_written {
            return Err(Error::EmptyStream);
        }

        let data_size = u32::try_from(self.data_size).map_err(|_| {
            Error::write(
                "real header",
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("payload of {} bytes exceeds the WAV size field", self.data_size),
                ),
            )
        })?;

        self.writer
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::seek("seek to start", e))?;

        let header = WavHeader::pcm(
            data_size,
            self.format.sample_rate,
            self.format.channels,
            self.format.bits_per_sample,
        );
        self.writer
            .write_all(&header.to_bytes())
            .map_err(|e| Error::write("real header", e))?;

        if let Err(e) = self.writer.seek(SeekFrom::End(0)) {
            warn!("Failed to seek back to end of WAV payload: {}", e);
        }

        self.writer
            .flush()
            .map_err(|e| Error::write("flush", e))?;

        debug!("Patched WAV header: {} payload bytes", data_size);
        Ok(())
    }

    /// Consume the muxer and return the sink
    pub fn into_inner(self) -> W {
        self.writer
    }
}
