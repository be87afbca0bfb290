//! Integer PCM sample format definitions

use crate::error::{Error, Result};
use std::fmt;

/// Signed integer PCM sample format
///
/// Only the four byte-aligned depths a linear PCM WAV file can carry
/// without an extensible fmt chunk are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// Signed 8-bit
    S8,
    /// Signed 16-bit
    S16,
    /// Signed 24-bit, packed in 3 bytes
    S24,
    /// Signed 32-bit
    S32,
}

impl SampleFormat {
    /// Look up the format for a declared bit depth
    pub fn from_bits(bits_per_sample: u16) -> Result<Self> {
        match bits_per_sample {
            8 => Ok(SampleFormat::S8),
            16 => Ok(SampleFormat::S16),
            24 => Ok(SampleFormat::S24),
            32 => Ok(SampleFormat::S32),
            other => Err(Error::unsupported_format(other)),
        }
    }

    /// Bits per sample
    pub fn bits(&self) -> u16 {
        match self {
            SampleFormat::S8 => 8,
            SampleFormat::S16 => 16,
            SampleFormat::S24 => 24,
            SampleFormat::S32 => 32,
        }
    }

    /// Get the size in bytes of one sample
    pub fn sample_size(&self) -> usize {
        self.bits() as usize / 8
    }

    /// Smallest representable value
    pub fn min_value(&self) -> i32 {
        match self {
            SampleFormat::S8 => i8::MIN as i32,
            SampleFormat::S16 => i16::MIN as i32,
            SampleFormat::S24 => -(1 << 23),
            SampleFormat::S32 => i32::MIN,
        }
    }

    /// Largest representable value
    pub fn max_value(&self) -> i32 {
        match self {
            SampleFormat::S8 => i8::MAX as i32,
            SampleFormat::S16 => i16::MAX as i32,
            SampleFormat::S24 => (1 << 23) - 1,
            SampleFormat::S32 => i32::MAX,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleFormat::S8 => "s8",
            SampleFormat::S16 => "s16",
            SampleFormat::S24 => "s24",
            SampleFormat::S32 => "s32",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits() {
        assert_eq!(SampleFormat::from_bits(8).unwrap(), SampleFormat::S8);
        assert_eq!(SampleFormat::from_bits(24).unwrap(), SampleFormat::S24);
        assert!(matches!(
            SampleFormat::from_bits(20),
            Err(Error::UnsupportedFormat { bits_per_sample: 20 })
        ));
        assert!(SampleFormat::from_bits(0).is_err());
    }

    #[test]
    fn test_sample_size() {
        assert_eq!(SampleFormat::S8.sample_size(), 1);
        assert_eq!(SampleFormat::S16.sample_size(), 2);
        assert_eq!(SampleFormat::S24.sample_size(), 3);
        assert_eq!(SampleFormat::S32.sample_size(), 4);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(SampleFormat::S24.min_value(), -8_388_608);
        assert_eq!(SampleFormat::S24.max_value(), 8_388_607);
        assert_eq!(SampleFormat::S16.to_string(), "s16");
    }
}
