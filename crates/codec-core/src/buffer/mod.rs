//! Host buffer handling
//!
//! Everything between a host value and the contiguous native-endian
//! `&[i16]` the codec consumes:
//!
//! - `value`: the closed set of host values and the typed containers
//! - `endian`: byte-order normalization
//! - `adapter`: classification and validation of host values

pub mod adapter;
pub mod endian;
pub mod value;

pub use adapter::{Representation, SampleBufferAdapter, SampleView};
pub use endian::EndianNormalizer;
#[cfg(feature = "ndarray")]
pub use value::AcceleratedArray;
pub use value::{ElementType, HostValue, TypedArray};
