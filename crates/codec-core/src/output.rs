//! Output container selection
//!
//! Decoded samples are returned either as a simple typed array or, when
//! the accelerated backend is available, as an `ndarray` array. The
//! choice is made once when a session is built and never re-probed.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::buffer::endian::EndianNormalizer;
use crate::buffer::value::{HostValue, TypedArray};
use crate::error::{CodecError, Result};
use crate::types::ByteOrder;
use crate::utils::Capabilities;

#[cfg(feature = "ndarray")]
use crate::buffer::value::AcceleratedArray;
#[cfg(feature = "ndarray")]
use ndarray::Array1;

/// Requested output container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputPreference {
    /// Accelerated if available, simple otherwise
    #[default]
    Auto,
    /// Always the simple container
    ForceSimple,
    /// Always the accelerated container; unavailable is an error
    ForceAccelerated,
}

impl FromStr for OutputPreference {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "force-simple" | "force_simple" | "simple" | "array" => Ok(Self::ForceSimple),
            "force-accelerated" | "force_accelerated" | "accelerated" | "ndarray" | "numpy" => {
                Ok(Self::ForceAccelerated)
            }
            _ => Err(CodecError::configuration(
                "output",
                s,
                "auto, force-simple or force-accelerated",
            )),
        }
    }
}

impl fmt::Display for OutputPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::ForceSimple => write!(f, "force-simple"),
            Self::ForceAccelerated => write!(f, "force-accelerated"),
        }
    }
}

/// Container kind a session produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputContainer {
    /// Typed array of host-order int16
    Simple,
    /// One-dimensional `ndarray` array
    Accelerated,
}

/// Resolved output container for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputContainerSelector {
    container: OutputContainer,
}

impl OutputContainerSelector {
    /// Resolve a preference against the available backends
    ///
    /// # Errors
    ///
    /// `ForceAccelerated` fails with `RuntimeUnavailable` when the backend
    /// is not available.
    pub fn resolve(preference: OutputPreference, capabilities: Capabilities) -> Result<Self> {
        let available = capabilities.accelerated && cfg!(feature = "ndarray");
        let container = match preference {
            OutputPreference::Auto if available => OutputContainer::Accelerated,
            OutputPreference::Auto | OutputPreference::ForceSimple => OutputContainer::Simple,
            OutputPreference::ForceAccelerated if available => OutputContainer::Accelerated,
            OutputPreference::ForceAccelerated => {
                return Err(CodecError::accelerated_unavailable());
            }
        };

        debug!(%preference, ?container, "Resolved output container");
        Ok(Self { container })
    }

    /// The resolved container
    pub fn container(&self) -> OutputContainer {
        self.container
    }

    /// Wrap decoded samples in the resolved container
    pub fn wrap(&self, samples: Vec<i16>) -> DecodedSamples {
        match self.container {
            OutputContainer::Simple => DecodedSamples::Simple(TypedArray::from_native_samples(&samples)),
            #[cfg(feature = "ndarray")]
            OutputContainer::Accelerated => DecodedSamples::Accelerated(Array1::from(samples)),
            // `resolve` only selects it when the backend is compiled in
            #[cfg(not(feature = "ndarray"))]
            OutputContainer::Accelerated => {
                unreachable!("accelerated container resolved without the ndarray backend")
            }
        }
    }
}

/// Decoded samples in the session's output container
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedSamples {
    /// Simple typed array, host order
    Simple(TypedArray),
    /// Accelerated array
    #[cfg(feature = "ndarray")]
    Accelerated(Array1<i16>),
}

impl DecodedSamples {
    /// Number of samples
    pub fn len(&self) -> usize {
        match self {
            Self::Simple(array) => array.len(),
            #[cfg(feature = "ndarray")]
            Self::Accelerated(array) => array.len(),
        }
    }

    /// Whether no samples were decoded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which container this is
    pub fn container(&self) -> OutputContainer {
        match self {
            Self::Simple(_) => OutputContainer::Simple,
            #[cfg(feature = "ndarray")]
            Self::Accelerated(_) => OutputContainer::Accelerated,
        }
    }

    /// Copy the samples out
    pub fn to_vec(&self) -> Vec<i16> {
        match self {
            // Simple output is always host-order int16
            Self::Simple(array) => array
                .as_bytes()
                .chunks_exact(2)
                .map(|pair| i16::from_ne_bytes([pair[0], pair[1]]))
                .collect(),
            #[cfg(feature = "ndarray")]
            Self::Accelerated(array) => array.iter().copied().collect(),
        }
    }

    /// Serialize the samples as packed bytes in `order`
    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        match self {
            Self::Simple(array) if order.is_native() => array.as_bytes().to_vec(),
            _ => EndianNormalizer::native_to_bytes(&self.to_vec(), order),
        }
    }

    /// The simple container, if that is what this is
    pub fn as_typed_array(&self) -> Option<&TypedArray> {
        match self {
            Self::Simple(array) => Some(array),
            #[cfg(feature = "ndarray")]
            Self::Accelerated(_) => None,
        }
    }

    /// The accelerated container, if that is what this is
    #[cfg(feature = "ndarray")]
    pub fn as_ndarray(&self) -> Option<&Array1<i16>> {
        match self {
            Self::Accelerated(array) => Some(array),
            Self::Simple(_) => None,
        }
    }

    /// Hand the samples back to the host unchanged
    pub fn into_host_value(self) -> HostValue {
        match self {
            Self::Simple(array) => HostValue::TypedArray(array),
            #[cfg(feature = "ndarray")]
            Self::Accelerated(array) => HostValue::Accelerated(AcceleratedArray::from_array(array)),
        }
    }
}
