//! Container format handling
//!
//! Only the RIFF/WAVE container is supported, as the linear PCM output of
//! a conversion and as input to header parsing.

pub mod wav;

pub use wav::{generate_header, parse_header, WavHeader, WavMuxer, WAV_HEADER_SIZE};
