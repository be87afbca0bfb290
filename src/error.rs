//! Error types for flacwav

use thiserror::Error;

/// Result type alias for flacwav operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error surfaced unchanged from a frame source
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for flacwav
#[derive(Error, Debug)]
pub enum Error {
    /// IO error outside of the sink/parse paths
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bit depth outside {8, 16, 24, 32}
    #[error("Unsupported bits per sample: {bits_per_sample}")]
    UnsupportedFormat { bits_per_sample: u16 },

    /// Per-frame buffer implied by the stream metadata exceeds the limit
    #[error("Buffer size too large: {size} bytes (limit {limit})")]
    OversizedBuffer { size: usize, limit: usize },

    /// A channel carries fewer samples than the frame's block size
    #[error("Corrupt frame: channel {channel} contains only {actual} samples, expected {expected}")]
    CorruptFrame {
        channel: usize,
        actual: usize,
        expected: usize,
    },

    /// Error reported by the upstream decoder, kept as-is
    #[error("Decode failure: {0}")]
    DecodeFailure(#[source] SourceError),

    /// The source stream produced no frames
    #[error("No audio frames decoded")]
    EmptyStream,

    /// The sink could not be repositioned
    #[error("Seek failed ({context}): {source}")]
    SeekFailure {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The sink rejected a write
    #[error("Write failed ({context}): {source}")]
    WriteFailure {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Missing RIFF/WAVE magic
    #[error("Invalid WAV header: {0}")]
    InvalidContainer(String),

    /// Chunks present but structurally wrong
    #[error("Malformed WAV container: {0}")]
    MalformedContainer(String),

    /// fmt chunk declares a non-PCM format tag
    #[error("Unsupported audio format: {0} (only PCM supported)")]
    UnsupportedAudioFormat(u16),

    /// Stream ended while reading a chunk
    #[error("Truncated stream while reading {chunk}: {source}")]
    TruncatedStream {
        chunk: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an unsupported bit depth error
    pub fn unsupported_format(bits_per_sample: u16) -> Self {
        Error::UnsupportedFormat { bits_per_sample }
    }

    /// Wrap a decoder error
    pub fn decode<E: Into<SourceError>>(err: E) -> Self {
        Error::DecodeFailure(err.into())
    }

    /// Create a seek error with context
    pub fn seek<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Error::SeekFailure {
            context: context.into(),
            source,
        }
    }

    /// Create a write error with context
    pub fn write<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Error::WriteFailure {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid container error
    pub fn invalid_container<S: Into<String>>(msg: S) -> Self {
        Error::InvalidContainer(msg.into())
    }

    /// Create a malformed container error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedContainer(msg.into())
    }

    /// Create a truncated stream error naming the chunk being read
    pub fn truncated<S: Into<String>>(chunk: S, source: std::io::Error) -> Self {
        Error::TruncatedStream {
            chunk: chunk.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}
