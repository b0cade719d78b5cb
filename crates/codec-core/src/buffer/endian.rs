//! Byte-order normalization for 16-bit sample words
//!
//! Inputs declared in host order are returned as borrowed views; anything
//! else is byte-swapped into a fresh buffer. Caller data is never mutated.

use std::borrow::Cow;

use crate::error::{CodecError, Result};
use crate::types::ByteOrder;

/// Converts 16-bit words between a declared byte order and host order
#[derive(Debug, Clone, Copy, Default)]
pub struct EndianNormalizer;

impl EndianNormalizer {
    /// Normalize words whose storage is in `order` to host order
    ///
    /// Each element of `words` holds the two stored bytes read as a host
    /// word, which is how typed containers expose foreign-order data.
    pub fn words_to_native(words: &[i16], order: ByteOrder) -> Cow<'_, [i16]> {
        if order.is_native() {
            Cow::Borrowed(words)
        } else {
            Cow::Owned(words.iter().map(|w| w.swap_bytes()).collect())
        }
    }

    /// Interpret packed bytes in `order` as host-order samples
    ///
    /// Host-order input is cast in place when the slice is suitably
    /// aligned and copied otherwise.
    ///
    /// # Errors
    ///
    /// Returns a framing error if the byte count is odd.
    pub fn bytes_to_native(bytes: &[u8], order: ByteOrder) -> Result<Cow<'_, [i16]>> {
        if bytes.len() % 2 != 0 {
            return Err(CodecError::framing("bytes", bytes.len(), 2));
        }

        let pairs = bytes.chunks_exact(2).map(|p| [p[0], p[1]]);
        let samples: Vec<i16> = match order {
            ByteOrder::Native => match bytemuck::try_cast_slice::<u8, i16>(bytes) {
                Ok(words) => return Ok(Cow::Borrowed(words)),
                Err(_) => pairs.map(i16::from_ne_bytes).collect(),
            },
            ByteOrder::Little if cfg!(target_endian = "little") => {
                return Self::bytes_to_native(bytes, ByteOrder::Native);
            }
            ByteOrder::Big if cfg!(target_endian = "big") => {
                return Self::bytes_to_native(bytes, ByteOrder::Native);
            }
            ByteOrder::Little => pairs.map(i16::from_le_bytes).collect(),
            ByteOrder::Big => pairs.map(i16::from_be_bytes).collect(),
        };

        Ok(Cow::Owned(samples))
    }

    /// Serialize host-order samples as packed bytes in `order`
    pub fn native_to_bytes(samples: &[i16], order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(samples.len() * 2);
        for &sample in samples {
            let word = match order {
                ByteOrder::Native => sample.to_ne_bytes(),
                ByteOrder::Little => sample.to_le_bytes(),
                ByteOrder::Big => sample.to_be_bytes(),
            };
            out.extend_from_slice(&word);
        }
        out
    }
}
