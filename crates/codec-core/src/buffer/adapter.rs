//! Host value classification and sample extraction
//!
//! One entry point turns any supported [`HostValue`] into a contiguous,
//! host-order view of 16-bit samples. Each representation carries its own
//! validation path; everything else is rejected with a type mismatch.

use std::borrow::Cow;
use std::fmt;

use tracing::trace;

use crate::buffer::endian::EndianNormalizer;
use crate::buffer::value::{ElementType, HostValue};
use crate::error::{CodecError, Result};
use crate::types::ByteOrder;
use crate::utils::Capabilities;

/// Supported sample representations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Raw bytes, host-order packed 16-bit words
    RawBytes,
    /// Typed array of 16-bit elements
    TypedArray,
    /// Accelerated n-dimensional array
    Accelerated,
    /// Generic sequence of integer-like values
    Sequence,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RawBytes => "raw bytes",
            Self::TypedArray => "typed array",
            Self::Accelerated => "accelerated array",
            Self::Sequence => "sequence",
        };
        write!(f, "{}", name)
    }
}

/// Host-order samples extracted from a host value
///
/// Borrows from the host value whenever no conversion was needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleView<'a> {
    samples: Cow<'a, [i16]>,
    representation: Representation,
}

impl<'a> SampleView<'a> {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples, host order
    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }

    /// Representation the samples came from
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Whether the view points into the host value's storage
    pub fn is_borrowed(&self) -> bool {
        matches!(self.samples, Cow::Borrowed(_))
    }

    /// Take ownership of the samples
    pub fn into_owned(self) -> Vec<i16> {
        self.samples.into_owned()
    }
}

/// Turns host values into sample views
#[derive(Debug, Clone, Copy)]
pub struct SampleBufferAdapter {
    accelerated: bool,
}

impl SampleBufferAdapter {
    /// Create an adapter for the given backend capabilities
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            accelerated: capabilities.accelerated,
        }
    }

    /// Determine which representation `value` is, without reading samples
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` for scalars, text and non-16-bit typed arrays
    /// - `RuntimeUnavailable` for accelerated arrays when the backend is off
    pub fn classify(&self, value: &HostValue) -> Result<Representation> {
        match value {
            HostValue::Bytes(_) => Ok(Representation::RawBytes),
            HostValue::TypedArray(array) if array.element() == ElementType::I16 => {
                Ok(Representation::TypedArray)
            }
            HostValue::TypedArray(array) => Err(CodecError::type_mismatch(
                "int16 typed array",
                format!("{} typed array", array.element()),
            )),
            #[cfg(feature = "ndarray")]
            HostValue::Accelerated(_) if self.accelerated => Ok(Representation::Accelerated),
            #[cfg(feature = "ndarray")]
            HostValue::Accelerated(_) => Err(CodecError::accelerated_unavailable()),
            HostValue::Sequence(_) => Ok(Representation::Sequence),
            other => Err(CodecError::type_mismatch(
                "sample buffer",
                other.type_name(),
            )),
        }
    }

    /// Extract host-order 16-bit samples from `value`
    ///
    /// # Errors
    ///
    /// Everything [`classify`](Self::classify) rejects, plus:
    ///
    /// - `Framing` for raw bytes of odd length
    /// - `TypeMismatch` for sequence elements that are not integers or
    ///   bools, or integers outside the 16-bit range
    pub fn adapt<'a>(&self, value: &'a HostValue) -> Result<SampleView<'a>> {
        let representation = self.classify(value)?;

        let samples = match value {
            HostValue::Bytes(bytes) => EndianNormalizer::bytes_to_native(bytes, ByteOrder::Native)?,
            HostValue::TypedArray(array) => array.samples()?,
            #[cfg(feature = "ndarray")]
            HostValue::Accelerated(array) => array.samples(),
            HostValue::Sequence(items) => Cow::Owned(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| sequence_element(index, item))
                    .collect::<Result<Vec<i16>>>()?,
            ),
            // classify() already rejected every other variant
            other => return Err(CodecError::type_mismatch("sample buffer", other.type_name())),
        };

        trace!(
            representation = %representation,
            samples = samples.len(),
            borrowed = matches!(samples, Cow::Borrowed(_)),
            "Adapted sample buffer"
        );

        Ok(SampleView {
            samples,
            representation,
        })
    }

    /// Extract code bytes for decoding
    ///
    /// Accepts raw bytes and typed arrays of 8-bit elements.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch for any other value.
    pub fn adapt_code_bytes<'a>(&self, value: &'a HostValue) -> Result<&'a [u8]> {
        match value {
            HostValue::Bytes(bytes) => Ok(&bytes[..]),
            HostValue::TypedArray(array)
                if matches!(array.element(), ElementType::U8 | ElementType::I8) =>
            {
                Ok(&array.as_bytes()[..])
            }
            HostValue::TypedArray(array) => Err(CodecError::type_mismatch(
                "bytes or 8-bit typed array",
                format!("{} typed array", array.element()),
            )),
            other => Err(CodecError::type_mismatch(
                "bytes or 8-bit typed array",
                other.type_name(),
            )),
        }
    }
}

fn sequence_element(index: usize, item: &HostValue) -> Result<i16> {
    match item {
        HostValue::Int(value) => i16::try_from(*value).map_err(|_| {
            CodecError::type_mismatch(
                "integer in -32768..=32767",
                format!("int {} at index {}", value, index),
            )
        }),
        HostValue::Bool(flag) => Ok(i16::from(*flag)),
        other => Err(CodecError::type_mismatch(
            "integer element",
            format!("{} at index {}", other.type_name(), index),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::value::TypedArray;
    use bytes::Bytes;

    fn adapter() -> SampleBufferAdapter {
        SampleBufferAdapter::new(Capabilities::with_accelerated(true))
    }

    #[test]
    fn test_raw_bytes() {
        let bytes: Vec<u8> = [100i16, -200].iter().flat_map(|s| s.to_ne_bytes()).collect();
        let value = HostValue::from(bytes);
        let view = adapter().adapt(&value).unwrap();
        assert_eq!(view.as_slice(), &[100, -200]);
        assert_eq!(view.representation(), Representation::RawBytes);
    }

    #[test]
    fn test_odd_raw_bytes() {
        let value = HostValue::from(vec![1u8, 2, 3]);
        let err = adapter().adapt(&value).unwrap_err();
        assert!(matches!(err, CodecError::Framing { actual: 3, .. }));
    }

    #[test]
    fn test_typed_array_any_order() {
        let samples = [7i16, -8, 0x0102];
        for order in [ByteOrder::Native, ByteOrder::Little, ByteOrder::Big] {
            let value = HostValue::from(TypedArray::from_samples(&samples, order));
            let view = adapter().adapt(&value).unwrap();
            assert_eq!(view.as_slice(), &samples);
            assert_eq!(view.representation(), Representation::TypedArray);
        }
    }

    #[test]
    fn test_sequence_coercion() {
        let value = HostValue::Sequence(vec![
            HostValue::Int(-32768),
            HostValue::Bool(true),
            HostValue::Bool(false),
            HostValue::Int(32767),
        ]);
        let view = adapter().adapt(&value).unwrap();
        assert_eq!(view.as_slice(), &[-32768, 1, 0, 32767]);
        assert!(!view.is_borrowed());
    }

    #[test]
    fn test_rejected_values() {
        let rejected = [
            HostValue::None,
            HostValue::Bool(true),
            HostValue::Int(5),
            HostValue::Float(1.5),
            HostValue::from("pcm"),
            HostValue::sequence(["a", "b"]),
            HostValue::Sequence(vec![HostValue::Float(0.5)]),
            HostValue::Sequence(vec![HostValue::sequence([1, 2])]),
            HostValue::Sequence(vec![HostValue::Int(40000)]),
            HostValue::Sequence(vec![HostValue::Int(-40000)]),
            HostValue::from(TypedArray::from_u8(vec![1u8, 2])),
        ];
        for value in &rejected {
            let err = adapter().adapt(value).unwrap_err();
            assert!(
                matches!(err, CodecError::TypeMismatch { .. }),
                "{:?} gave {:?}",
                value,
                err
            );
        }
    }

    #[test]
    fn test_empty_inputs() {
        for value in [
            HostValue::Bytes(Bytes::new()),
            HostValue::Sequence(Vec::new()),
            HostValue::from(TypedArray::from_samples(&[], ByteOrder::Big)),
        ] {
            assert!(adapter().adapt(&value).unwrap().is_empty());
        }
    }

    #[test]
    fn test_code_bytes() {
        let adapter = adapter();
        let value = HostValue::from(vec![1u8, 2, 3]);
        assert_eq!(adapter.adapt_code_bytes(&value).unwrap(), &[1, 2, 3]);

        let value = HostValue::from(TypedArray::from_u8(vec![9u8]));
        assert_eq!(adapter.adapt_code_bytes(&value).unwrap(), &[9]);

        for value in [
            HostValue::Int(1),
            HostValue::sequence([1, 2]),
            HostValue::from(TypedArray::from_samples(&[1], ByteOrder::Native)),
        ] {
            assert!(matches!(
                adapter.adapt_code_bytes(&value),
                Err(CodecError::TypeMismatch { .. })
            ));
        }
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_accelerated_orders() {
        use crate::buffer::value::AcceleratedArray;

        let samples = [3i16, -4, 0x7F01, 12];
        let grid = ndarray::Array2::from_shape_vec((2, 2), samples.to_vec()).unwrap();
        for order in [ByteOrder::Native, ByteOrder::Little, ByteOrder::Big] {
            let array = AcceleratedArray::from_array(grid.clone()).with_byte_order(order);
            let value = HostValue::from(array);
            let view = adapter().adapt(&value).unwrap();
            assert_eq!(view.as_slice(), &samples);
            assert_eq!(view.representation(), Representation::Accelerated);
        }
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_accelerated_unavailable() {
        use crate::buffer::value::AcceleratedArray;

        let adapter = SampleBufferAdapter::new(Capabilities::simple_only());
        let value = HostValue::from(AcceleratedArray::from_samples(&[1, 2]));
        assert!(matches!(
            adapter.adapt(&value),
            Err(CodecError::RuntimeUnavailable { .. })
        ));
    }
}
