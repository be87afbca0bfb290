//! FLAC audio decoder using Symphonia

use crate::codec::{DecodedFrame, FrameSource, StreamFormat, StreamInfo};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, Signal};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSourceStream, ReadOnlySource};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Block size assumed when the stream does not declare a maximum
pub const DEFAULT_MAX_BLOCK_SIZE: u32 = 4096;

/// Lossless stream decoder producing planar integer frames
///
/// Only FLAC streams are accepted; anything else fails to open with
/// `DecodeFailure`. The maximum block size comes from STREAMINFO.
///
/// Symphonia hands out samples scaled to the full `i32` range; frames are
/// shifted back down to the stream's declared bit depth before they are
/// returned.
pub struct FlacDecoder {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    info: StreamInfo,
    buffer: Option<AudioBuffer<i32>>,
}

impl FlacDecoder {
    /// Open a decoder over any readable byte stream
    pub fn new<R: Read + Send + Sync + 'static>(source: R) -> Result<Self> {
        let mss = MediaSourceStream::new(Box::new(ReadOnlySource::new(source)), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("flac");

        Self::from_stream(mss, &hint)
    }

    /// Open a decoder over a file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        Self::from_stream(mss, &hint)
    }

    fn from_stream(mss: MediaSourceStream, hint: &Hint) -> Result<Self> {
        let opened = symphonia::default::get_probe()
            .format(
                hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(Error::decode)?;

        let reader = opened.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| Error::decode("No supported audio track found"))?;

        let track_id = track.id;
        let params = &track.codec_params;
        let sample_rate = params
            .sample_rate
            .ok_or_else(|| Error::decode("Stream does not declare a sample rate"))?;
        let channels = params
            .channels
            .map(|c| c.count() as u16)
            .ok_or_else(|| Error::decode("Stream does not declare a channel layout"))?;
        let bits_per_sample = params
            .bits_per_sample
            .ok_or_else(|| Error::decode("Stream does not declare bits per sample"))?
            as u16;

        // The demuxer leaves the block bound unset; the decoder fills it
        // in from STREAMINFO.
        let decoder = symphonia::default::get_codecs()
            .make(params, &DecoderOptions::default())
            .map_err(Error::decode)?;
        let max_block_size = decoder
            .codec_params()
            .max_frames_per_packet
            .or(params.max_frames_per_packet)
            .map(|n| n as u32)
            .unwrap_or(DEFAULT_MAX_BLOCK_SIZE);

        let info = StreamInfo::new(
            StreamFormat::new(sample_rate, channels, bits_per_sample),
            max_block_size,
        );

        debug!(
            "Opened lossless stream: {} Hz, {} channels, {} bits, max block {}",
            sample_rate, channels, bits_per_sample, max_block_size
        );

        Ok(FlacDecoder {
            track_id,
            reader,
            decoder,
            info,
            buffer: None,
        })
    }
}

impl FrameSource for FlacDecoder {
    type Error = SymphoniaError;

    fn stream_info(&self) -> StreamInfo {
        self.info
    }

    fn next_frame(&mut self) -> std::result::Result<Option<DecodedFrame>, SymphoniaError> {
        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return Ok(None)
                }
                Err(SymphoniaError::ResetRequired) => return Ok(None),
                Err(e) => return Err(e),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = self.decoder.decode(&packet)?;
            if decoded.frames() == 0 {
                continue;
            }

            let spec = *decoded.spec();
            let stale = self
                .buffer
                .as_ref()
                .map_or(true, |b| b.capacity() < decoded.frames() || *b.spec() != spec);
            if stale {
                self.buffer = None;
            }
            let capacity = decoded.capacity() as u64;
            let buffer = self
                .buffer
                .get_or_insert_with(|| AudioBuffer::new(capacity, spec));
            decoded.convert(buffer);

            let shift = 32u16.saturating_sub(self.info.format.bits_per_sample).min(31);
            let channels = (0..spec.channels.count())
                .map(|ch| buffer.chan(ch).iter().map(|&s| s >> shift).collect())
                .collect();

            return Ok(Some(DecodedFrame::new(buffer.frames() as u32, channels)));
        }
    }
}
