//! Host values and typed sample containers
//!
//! [`HostValue`] is the closed set of values a host can hand to a codec
//! session. Anything outside it has no representation here, and the
//! adapter rejects the variants it cannot read as samples.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::buffer::endian::EndianNormalizer;
use crate::error::{CodecError, Result};
use crate::types::ByteOrder;

#[cfg(feature = "ndarray")]
use ndarray::{Array, ArrayD, Dimension};

/// Element type of a fixed-width typed array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Signed 8-bit
    I8,
    /// Unsigned 8-bit
    U8,
    /// Signed 16-bit
    I16,
    /// Unsigned 16-bit
    U16,
    /// Signed 32-bit
    I32,
    /// Unsigned 32-bit
    U32,
    /// Signed 64-bit
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl ElementType {
    /// Single-character type code
    pub fn code(self) -> char {
        match self {
            Self::I8 => 'b',
            Self::U8 => 'B',
            Self::I16 => 'h',
            Self::U16 => 'H',
            Self::I32 => 'i',
            Self::U32 => 'I',
            Self::I64 => 'q',
            Self::F32 => 'f',
            Self::F64 => 'd',
        }
    }

    /// Element width in bytes
    pub fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::F64 => 8,
        }
    }

    /// Look up an element type by its type code
    pub fn from_code(code: char) -> Option<Self> {
        let element = match code {
            'b' => Self::I8,
            'B' => Self::U8,
            'h' => Self::I16,
            'H' => Self::U16,
            'i' => Self::I32,
            'I' => Self::U32,
            'q' => Self::I64,
            'f' => Self::F32,
            'd' => Self::F64,
            _ => return None,
        };
        Some(element)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "int8",
            Self::U8 => "uint8",
            Self::I16 => "int16",
            Self::U16 => "uint16",
            Self::I32 => "int32",
            Self::U32 => "uint32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        };
        write!(f, "{}", name)
    }
}

/// Fixed-width typed array with raw storage in a declared byte order
///
/// This is also the simple container decoded samples are returned in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedArray {
    element: ElementType,
    order: ByteOrder,
    data: Bytes,
}

impl TypedArray {
    /// Wrap raw storage
    ///
    /// # Errors
    ///
    /// Returns a framing error if `data` is not a whole number of elements.
    pub fn new(element: ElementType, order: ByteOrder, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.len() % element.width() != 0 {
            return Err(CodecError::framing("bytes", data.len(), element.width()));
        }
        Ok(Self {
            element,
            order,
            data,
        })
    }

    /// 16-bit samples stored in `order`
    pub fn from_samples(samples: &[i16], order: ByteOrder) -> Self {
        Self {
            element: ElementType::I16,
            order,
            data: Bytes::from(EndianNormalizer::native_to_bytes(samples, order)),
        }
    }

    /// 16-bit samples stored in host order
    pub fn from_native_samples(samples: &[i16]) -> Self {
        Self {
            element: ElementType::I16,
            order: ByteOrder::Native,
            data: Bytes::copy_from_slice(bytemuck::cast_slice(samples)),
        }
    }

    /// Unsigned 8-bit elements, such as a block of codec codes
    pub fn from_u8(data: impl Into<Bytes>) -> Self {
        Self {
            element: ElementType::U8,
            order: ByteOrder::Native,
            data: data.into(),
        }
    }

    /// Element type
    pub fn element(&self) -> ElementType {
        self.element
    }

    /// Declared byte order of the storage
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Raw storage
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len() / self.element.width()
    }

    /// Whether the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical 16-bit sample values in host order
    ///
    /// # Errors
    ///
    /// Returns a type mismatch unless the element type is `int16`.
    pub fn samples(&self) -> Result<Cow<'_, [i16]>> {
        if self.element != ElementType::I16 {
            return Err(CodecError::type_mismatch(
                "int16 typed array",
                format!("{} typed array", self.element),
            ));
        }
        EndianNormalizer::bytes_to_native(&self.data, self.order)
    }
}

/// N-dimensional array of 16-bit samples with stored words in a declared
/// byte order
#[cfg(feature = "ndarray")]
#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratedArray {
    data: ArrayD<i16>,
    order: ByteOrder,
}

#[cfg(feature = "ndarray")]
impl AcceleratedArray {
    /// Wrap an array of logical sample values in host order
    pub fn from_array<D: Dimension>(data: Array<i16, D>) -> Self {
        Self {
            data: data.into_dyn(),
            order: ByteOrder::Native,
        }
    }

    /// Wrap stored words that are in `order`
    pub fn from_stored(data: ArrayD<i16>, order: ByteOrder) -> Self {
        Self { data, order }
    }

    /// One-dimensional array of logical values
    pub fn from_samples(samples: &[i16]) -> Self {
        Self::from_array(Array::from(samples.to_vec()))
    }

    /// Convert a PCM16 host value to a one-dimensional accelerated array
    ///
    /// A contiguous one-dimensional accelerated array is returned as is,
    /// order included. Raw bytes (host-native) and `int16` typed arrays go
    /// through the [`EndianNormalizer`] and come back in host order.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for anything else, including multi-dimensional or
    /// strided arrays and byte buffers of odd length.
    pub fn from_pcm16(value: &HostValue) -> Result<Self> {
        const EXPECTED: &str = "a contiguous 1-D 16-bit buffer";

        let samples = match value {
            HostValue::Accelerated(array)
                if array.data.ndim() == 1 && array.data.as_slice().is_some() =>
            {
                return Ok(array.clone());
            }
            HostValue::Bytes(bytes) if bytes.len() % 2 == 0 => {
                EndianNormalizer::bytes_to_native(bytes, ByteOrder::Native)?
            }
            HostValue::TypedArray(array) if array.element() == ElementType::I16 => {
                array.samples()?
            }
            other => return Err(CodecError::type_mismatch(EXPECTED, other.type_name())),
        };
        Ok(Self::from_samples(&samples))
    }

    /// Re-store the same logical values in `order`
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        if self.order.is_native() != order.is_native() {
            self.data.mapv_inplace(i16::swap_bytes);
        }
        self.order = order;
        self
    }

    /// Declared byte order of the stored words
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Stored words
    pub fn stored(&self) -> &ArrayD<i16> {
        &self.data
    }

    /// Array shape
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stored words flattened in logical row-major order
    pub fn flat_words(&self) -> Cow<'_, [i16]> {
        match self.data.as_slice() {
            Some(words) => Cow::Borrowed(words),
            None => Cow::Owned(self.data.iter().copied().collect()),
        }
    }

    /// Logical values flattened in row-major order, in host order
    pub fn samples(&self) -> Cow<'_, [i16]> {
        match self.flat_words() {
            Cow::Borrowed(words) => EndianNormalizer::words_to_native(words, self.order),
            Cow::Owned(words) => {
                Cow::Owned(EndianNormalizer::words_to_native(&words, self.order).into_owned())
            }
        }
    }
}

/// A value handed over by the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Absent value
    None,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// Text
    Str(String),
    /// Raw byte buffer
    Bytes(Bytes),
    /// Fixed-width typed array
    TypedArray(TypedArray),
    /// N-dimensional accelerated array
    #[cfg(feature = "ndarray")]
    Accelerated(AcceleratedArray),
    /// Generic sequence of values
    Sequence(Vec<HostValue>),
}

impl HostValue {
    /// Short name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::TypedArray(_) => "typed array",
            #[cfg(feature = "ndarray")]
            Self::Accelerated(_) => "accelerated array",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Build a generic sequence from anything convertible
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<HostValue>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i16> for HostValue {
    fn from(value: i16) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i32> for HostValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Bytes> for HostValue {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<TypedArray> for HostValue {
    fn from(value: TypedArray) -> Self {
        Self::TypedArray(value)
    }
}

#[cfg(feature = "ndarray")]
impl From<AcceleratedArray> for HostValue {
    fn from(value: AcceleratedArray) -> Self {
        Self::Accelerated(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        Self::Sequence(value)
    }
}
