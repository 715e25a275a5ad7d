//! Byte ↔ scalar conversion against the native field.
//!
//! | Direction | Order | Width | Overflow |
//! |-----------|-------|-------|----------|
//! | Challenge bytes → scalar | big endian | [`uniform_width`] | reduce mod p |
//! | Reply bytes → scalar | little endian | [`encoded_width`] | reject `>= p` |
//!
//! The challenge width adds 128 bits on top of the modulus so that reducing
//! a uniformly random string modulo `p` is statistically close to uniform.
//! Replies are canonical encodings and are rejected when they are not.

mod error;

pub use error::ScalarRangeError;

use serde::{Deserialize, Serialize};

use crate::field::NativeField;

/// Largest byte width the codec accepts in either direction.
pub const MAX_SCALAR_WIDTH: usize = 128;

/// Byte order of an encoded integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

/// Behaviour when an encoded integer is not smaller than the modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Fail with [`ScalarRangeError::NonCanonical`].
    Reject,
    /// Reduce modulo the field order.
    Reduce,
}

/// Minimal byte width holding every canonical element of a `bits`-bit field.
pub const fn encoded_width(bits: u32) -> usize {
    ((bits as usize) + 7) / 8
}

/// Byte width squeezed per challenge scalar for a `bits`-bit field.
pub const fn uniform_width(bits: u32) -> usize {
    ((bits as usize) + 128) / 8
}

/// Interprets `bytes` as an integer in `order` and maps it into `F`.
pub fn bytes_to_scalar<F: NativeField>(
    bytes: &[u8],
    order: ByteOrder,
    overflow: OverflowPolicy,
) -> Result<F, ScalarRangeError> {
    check_width(bytes.len())?;
    let radix = F::from_u64(256);
    let fold = |acc: F, byte: &u8| acc * radix + F::from_u64(*byte as u64);
    let value = match order {
        ByteOrder::BigEndian => bytes.iter().fold(F::zero(), fold),
        ByteOrder::LittleEndian => bytes.iter().rev().fold(F::zero(), fold),
    };
    if overflow == OverflowPolicy::Reject {
        // the reduced value re-encodes to the input iff the input was < p
        let reencoded = scalar_to_bytes(&value, bytes.len(), order)
            .map_err(|_| ScalarRangeError::NonCanonical { width: bytes.len() })?;
        if reencoded != bytes {
            return Err(ScalarRangeError::NonCanonical { width: bytes.len() });
        }
    }
    Ok(value)
}

/// Encodes the canonical integer of `value` into exactly `width` bytes.
pub fn scalar_to_bytes<F: NativeField>(
    value: &F,
    width: usize,
    order: ByteOrder,
) -> Result<Vec<u8>, ScalarRangeError> {
    check_width(width)?;
    let mut le = value.to_le_bytes();
    let significant = le.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    if significant > width {
        return Err(ScalarRangeError::Overflow {
            width,
            required: significant,
        });
    }
    le.resize(width, 0);
    if order == ByteOrder::BigEndian {
        le.reverse();
    }
    Ok(le)
}

fn check_width(width: usize) -> Result<(), ScalarRangeError> {
    if width == 0 || width > MAX_SCALAR_WIDTH {
        return Err(ScalarRangeError::Width {
            width,
            max: MAX_SCALAR_WIDTH,
        });
    }
    Ok(())
}

/// Fixed per-deployment layout of one encoded scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarCodec {
    /// Number of bytes per scalar.
    pub width: usize,
    /// Byte order of the encoding.
    pub order: ByteOrder,
    /// Overflow behaviour while decoding.
    pub overflow: OverflowPolicy,
}

impl ScalarCodec {
    /// Layout for squeezed challenge scalars.
    pub fn challenge<F: NativeField>() -> Self {
        Self {
            width: uniform_width(F::MODULUS_BITS),
            order: ByteOrder::BigEndian,
            overflow: OverflowPolicy::Reduce,
        }
    }

    /// Layout for absorbed reply scalars.
    pub fn reply<F: NativeField>() -> Self {
        Self {
            width: encoded_width(F::MODULUS_BITS),
            order: ByteOrder::LittleEndian,
            overflow: OverflowPolicy::Reject,
        }
    }

    /// Same layout with a different width.
    pub fn with_width(self, width: usize) -> Self {
        Self { width, ..self }
    }

    /// Decodes one scalar; `bytes` must be exactly `width` long.
    pub fn decode<F: NativeField>(&self, bytes: &[u8]) -> Result<F, ScalarRangeError> {
        if bytes.len() != self.width {
            return Err(ScalarRangeError::Width {
                width: bytes.len(),
                max: self.width,
            });
        }
        bytes_to_scalar(bytes, self.order, self.overflow)
    }

    /// Encodes one scalar into `width` bytes.
    pub fn encode<F: NativeField>(&self, value: &F) -> Result<Vec<u8>, ScalarRangeError> {
        scalar_to_bytes(value, self.width, self.order)
    }

    /// Positional weights `256^k` aligned with the byte positions of an encoding.
    pub fn weights<F: NativeField>(&self) -> Vec<F> {
        let radix = F::from_u64(256);
        let mut weights = Vec::with_capacity(self.width);
        let mut power = F::from_u64(1);
        for _ in 0..self.width {
            weights.push(power);
            power = power * radix;
        }
        if self.order == ByteOrder::BigEndian {
            weights.reverse();
        }
        weights
    }
}
