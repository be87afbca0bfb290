//! Codec implementations (lossless decoding and PCM packing)

pub mod decoder;
pub mod flac;
pub mod frame;
pub mod pcm;

pub use decoder::FrameSource;
pub use flac::FlacDecoder;
pub use frame::{DecodedFrame, StreamFormat, StreamInfo};
pub use pcm::{encode_frame, PcmConfig, PcmDecoder, PcmEncoder};
