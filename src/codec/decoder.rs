//! Frame source abstraction over the upstream lossless decoder

use super::{DecodedFrame, StreamInfo};
use crate::error::SourceError;

/// A decoder handle that yields planar integer frames
///
/// `stream_info` is read once when a conversion starts. `next_frame`
/// returns `Ok(None)` at end of stream; any error aborts the conversion
/// and is surfaced to the caller unchanged.
pub trait FrameSource {
    /// Error type reported by the decoder
    type Error: Into<SourceError>;

    /// Stream metadata (format and maximum block size)
    fn stream_info(&self) -> StreamInfo;

    /// Decode the next frame
    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, Self::Error>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    type Error = S::Error;

    fn stream_info(&self) -> StreamInfo {
        (**self).stream_info()
    }

    fn next_frame(&mut self) -> Result<Option<DecodedFrame>, Self::Error> {
        (**self).next_frame()
    }
}
