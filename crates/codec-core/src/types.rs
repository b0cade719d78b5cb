//! Core value types for the codec binding layer
//!
//! These types describe a stream configuration (sample rate, bit rate) and
//! the byte order declared by a sample container.

use crate::error::{CodecError, Result};
use std::fmt;

/// Sample rates supported by the G.722 binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    /// 8 kHz (low band only)
    Rate8000,
    /// 16 kHz (wideband, both sub-bands)
    Rate16000,
}

impl SampleRate {
    /// All supported sample rates
    pub const ALL: [SampleRate; 2] = [Self::Rate8000, Self::Rate16000];

    /// Get the sample rate value in Hz
    pub fn hz(self) -> u32 {
        match self {
            Self::Rate8000 => 8000,
            Self::Rate16000 => 16000,
        }
    }

    /// Create from a Hz value
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the `sample_rate` field for any
    /// value other than 8000 or 16000.
    pub fn from_hz(hz: u32) -> Result<Self> {
        match hz {
            8000 => Ok(Self::Rate8000),
            16000 => Ok(Self::Rate16000),
            other => Err(CodecError::configuration(
                "sample_rate",
                other,
                "8000 or 16000",
            )),
        }
    }

    /// Number of PCM samples carried by one code byte
    pub fn samples_per_code(self) -> usize {
        match self {
            Self::Rate8000 => 1,
            Self::Rate16000 => 2,
        }
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.hz())
    }
}

/// G.722 bit rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitRate {
    /// 48 kbit/s (6 bits per code)
    Rate48000,
    /// 56 kbit/s (7 bits per code)
    Rate56000,
    /// 64 kbit/s (8 bits per code)
    Rate64000,
}

impl BitRate {
    /// All supported bit rates
    pub const ALL: [BitRate; 3] = [Self::Rate48000, Self::Rate56000, Self::Rate64000];

    /// Get the bit rate in bits per second
    pub fn bps(self) -> u32 {
        match self {
            Self::Rate48000 => 48000,
            Self::Rate56000 => 56000,
            Self::Rate64000 => 64000,
        }
    }

    /// Create from a bits-per-second value
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the `bit_rate` field for any
    /// value other than 48000, 56000 or 64000.
    pub fn from_bps(bps: u32) -> Result<Self> {
        match bps {
            48000 => Ok(Self::Rate48000),
            56000 => Ok(Self::Rate56000),
            64000 => Ok(Self::Rate64000),
            other => Err(CodecError::configuration(
                "bit_rate",
                other,
                "48000, 56000 or 64000",
            )),
        }
    }

    /// Significant bits in each code byte
    pub fn bits_per_code(self) -> u32 {
        match self {
            Self::Rate48000 => 6,
            Self::Rate56000 => 7,
            Self::Rate64000 => 8,
        }
    }
}

impl fmt::Display for BitRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.bps())
    }
}

/// Byte order declared by a fixed-width sample container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Whatever the host uses
    #[default]
    Native,
    /// Little-endian
    Little,
    /// Big-endian
    Big,
}

impl ByteOrder {
    /// Does this order match the host byte order?
    pub fn is_native(self) -> bool {
        match self {
            Self::Native => true,
            Self::Little => cfg!(target_endian = "little"),
            Self::Big => cfg!(target_endian = "big"),
        }
    }

    /// The concrete order the host uses
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    /// The opposite of the host order
    pub fn swapped() -> Self {
        match Self::host() {
            Self::Big => Self::Little,
            _ => Self::Big,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Native => "native",
            Self::Little => "little",
            Self::Big => "big",
        };
        write!(f, "{}", name)
    }
}
