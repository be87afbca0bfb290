//! FLAC audio decoding
//!
//! FLAC (Free Lossless Audio Codec) streams are decoded through Symphonia.
//! The decoder yields planar integer frames at the stream's native bit
//! depth, ready for PCM interleaving.
//!
//! ```rust,ignore
//! use flacwav_lib::codec::{FlacDecoder, FrameSource};
//!
//! let mut decoder = FlacDecoder::new(std::fs::File::open("in.flac")?)?;
//! let info = decoder.stream_info();
//! while let Some(frame) = decoder.next_frame()? {
//!     // frame.channels[ch][..frame.block_size as usize]
//! }
//! ```

pub mod decoder;

pub use decoder::{FlacDecoder, DEFAULT_MAX_BLOCK_SIZE};
