//! Common test utilities for flacwav integration tests
//!
//! Frame sources, sample generators and sinks with injectable failures.

#![allow(dead_code)]

use flacwav_lib::codec::{DecodedFrame, FrameSource, StreamFormat, StreamInfo};
use std::collections::VecDeque;
use std::io::{self, Cursor, Seek, SeekFrom, Write};

// ============================================================================
// Frame sources
// ============================================================================

/// In-memory frame source, optionally failing after a number of frames
pub struct VecSource {
    info: StreamInfo,
    frames: VecDeque<DecodedFrame>,
    fail_after: Option<usize>,
    served: usize,
}

impl VecSource {
    pub fn new(format: StreamFormat, max_block_size: u32, frames: Vec<DecodedFrame>) -> Self {
        VecSource {
            info: StreamInfo::new(format, max_block_size),
            frames: frames.into(),
            fail_after: None,
            served: 0,
        }
    }

    /// Return a decode error once `n` frames have been served
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }
}

impl FrameSource for VecSource {
    type Error = io::Error;

    fn stream_info(&self) -> StreamInfo {
        self.info
    }

    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, io::Error> {
        if self.fail_after == Some(self.served) {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "frame sync lost"));
        }
        self.served += 1;
        Ok(self.frames.pop_front())
    }
}

// ============================================================================
// Sample generation
// ============================================================================

/// Deterministic pseudo-random samples within the range of `bits`
pub fn test_samples(count: usize, bits: u16, seed: u32) -> Vec<i32> {
    let shift = 32 - bits as u32;
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as i32) >> shift
        })
        .collect()
}

/// Frames of `block_size` samples per channel, the last one shorter
pub fn test_frames(total_samples: usize, block_size: usize, channels: u16, bits: u16) -> Vec<DecodedFrame> {
    let mut frames = Vec::new();
    let mut remaining = total_samples;
    let mut seed = 1;
    while remaining > 0 {
        let n = remaining.min(block_size);
        let planes = (0..channels)
            .map(|_| {
                seed += 1;
                test_samples(n, bits, seed)
            })
            .collect();
        frames.push(DecodedFrame::new(n as u32, planes));
        remaining -= n;
    }
    frames
}

// ============================================================================
// Sinks
// ============================================================================

/// Sink that accepts writes but cannot seek
#[derive(Default)]
pub struct NoSeekSink {
    pub data: Vec<u8>,
}

impl Write for NoSeekSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for NoSeekSink {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "sink is not seekable"))
    }
}

/// In-memory sink whose seek-to-end always fails
#[derive(Default)]
pub struct NoSeekEndSink {
    pub inner: Cursor<Vec<u8>>,
}

impl Write for NoSeekEndSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Seek for NoSeekEndSink {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::End(_) => Err(io::Error::new(io::ErrorKind::Other, "end unreachable")),
            other => self.inner.seek(other),
        }
    }
}

/// In-memory sink that rejects writes once `limit` bytes are stored
pub struct LimitedSink {
    pub inner: Cursor<Vec<u8>>,
    pub limit: usize,
}

impl LimitedSink {
    pub fn new(limit: usize) -> Self {
        LimitedSink {
            inner: Cursor::new(Vec::new()),
            limit,
        }
    }
}

impl Write for LimitedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.get_ref().len() + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for LimitedSink {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

// ============================================================================
// Container building
// ============================================================================

/// Raw chunk bytes: tag, little-endian size, body
pub fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + body.len());
    out.extend_from_slice(tag);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// 16-byte PCM fmt chunk body
pub fn fmt_body(sample_rate: u32, channels: u16, bits: u16) -> Vec<u8> {
    let block_align = channels * bits / 8;
    let mut body = Vec::with_capacity(16);
    body.extend_from_slice(&1u16.to_le_bytes());
    body.extend_from_slice(&channels.to_le_bytes());
    body.extend_from_slice(&sample_rate.to_le_bytes());
    body.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    body.extend_from_slice(&block_align.to_le_bytes());
    body.extend_from_slice(&bits.to_le_bytes());
    body
}

/// RIFF/WAVE file made of the given chunks
pub fn riff(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body_len: usize = chunks.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(12 + body_len);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((4 + body_len) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    for c in chunks {
        out.extend_from_slice(c);
    }
    out
}

// ============================================================================
// FLAC building
// ============================================================================

/// MSB-first bit packer
#[derive(Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    acc: u64,
    bits: u32,
}

impl BitWriter {
    /// Append the low `count` bits of `value`, `count` at most 56
    pub fn write(&mut self, value: u64, count: u32) {
        self.acc = (self.acc << count) | (value & ((1u64 << count) - 1));
        self.bits += count;
        while self.bits >= 8 {
            self.bits -= 8;
            self.bytes.push((self.acc >> self.bits) as u8);
        }
        self.acc &= (1u64 << self.bits) - 1;
    }

    /// Zero-pad to the next byte boundary
    pub fn align(&mut self) {
        if self.bits > 0 {
            self.write(0, 8 - self.bits);
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align();
        self.bytes
    }
}

/// CRC-8, polynomial 0x07, as used by FLAC frame headers
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ 0x07 } else { crc << 1 };
        }
    }
    crc
}

/// CRC-16, polynomial 0x8005, as used by FLAC frame footers
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ 0x8005 } else { crc << 1 };
        }
    }
    crc
}

/// UTF-8 style coded number from a FLAC frame header
fn coded_number(value: u64) -> Vec<u8> {
    if value < 0x80 {
        return vec![value as u8];
    }
    let mut len = 2;
    while len < 7 && value >= 1u64 << (5 * len + 1) {
        len += 1;
    }
    let mut out = vec![0u8; len];
    let mut rest = value;
    for byte in out[1..].iter_mut().rev() {
        *byte = 0x80 | (rest & 0x3F) as u8;
        rest >>= 6;
    }
    out[0] = (0xFFu16 << (8 - len)) as u8 | rest as u8;
    out
}

fn sample_size_code(bits: u16) -> u64 {
    match bits {
        8 => 0b001,
        12 => 0b010,
        16 => 0b100,
        20 => 0b101,
        24 => 0b110,
        _ => panic!("no FLAC sample size code for {} bits", bits),
    }
}

/// One variable-blocksize frame with a VERBATIM subframe per channel
pub fn flac_frame(frame: &DecodedFrame, first_sample: u64, bits: u16) -> Vec<u8> {
    let mut w = BitWriter::default();
    w.write(0b11_1111_1111_1110, 14);
    w.write(0, 1);
    w.write(1, 1); // variable blocksize
    w.write(0b0111, 4); // 16-bit block size follows
    w.write(0b0000, 4); // rate from STREAMINFO
    w.write(frame.channels.len() as u64 - 1, 4);
    w.write(sample_size_code(bits), 3);
    w.write(0, 1);
    for byte in coded_number(first_sample) {
        w.write(byte as u64, 8);
    }
    w.write(frame.block_size as u64 - 1, 16);
    let crc = crc8(w.bytes());
    w.write(crc as u64, 8);

    for plane in &frame.channels {
        w.write(0b0000_0010, 8); // VERBATIM, no wasted bits
        for &sample in &plane[..frame.block_size as usize] {
            w.write(sample as u32 as u64, bits as u32);
        }
    }

    let mut bytes = w.into_bytes();
    let crc = crc16(&bytes);
    bytes.extend_from_slice(&crc.to_be_bytes());
    bytes
}

/// Complete FLAC stream: marker, STREAMINFO and verbatim frames
pub fn flac_stream(format: StreamFormat, max_block_size: u32, frames: &[DecodedFrame]) -> Vec<u8> {
    let total: u64 = frames.iter().map(|f| f.block_size as u64).sum();
    let min_block = frames
        .iter()
        .map(|f| f.block_size)
        .min()
        .unwrap_or(16)
        .clamp(16, max_block_size);

    let mut info = BitWriter::default();
    info.write(min_block as u64, 16);
    info.write(max_block_size as u64, 16);
    info.write(0, 24); // min frame size unknown
    info.write(0, 24); // max frame size unknown
    info.write(format.sample_rate as u64, 20);
    info.write(format.channels as u64 - 1, 3);
    info.write(format.bits_per_sample as u64 - 1, 5);
    info.write(total, 36);
    let mut streaminfo = info.into_bytes();
    streaminfo.extend_from_slice(&[0u8; 16]); // MD5 unset

    let mut out = b"fLaC".to_vec();
    out.push(0x80); // last metadata block, STREAMINFO
    out.extend_from_slice(&(streaminfo.len() as u32).to_be_bytes()[1..]);
    out.extend_from_slice(&streaminfo);

    let mut first_sample = 0;
    for frame in frames {
        out.extend(flac_frame(frame, first_sample, format.bits_per_sample));
        first_sample += frame.block_size as u64;
    }
    out
}
