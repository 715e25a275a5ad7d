use core::{fmt, ops};

use super::prime_field::FieldElement;

/// Contract a circuit's native field must satisfy for transcript replay.
///
/// Byte/scalar conversion only needs addition, multiplication and the
/// canonical little-endian encoding.
pub trait NativeField:
    Copy
    + Eq
    + fmt::Debug
    + ops::Add<Output = Self>
    + ops::Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Bit length of the field modulus.
    const MODULUS_BITS: u32;

    /// Additive identity.
    fn zero() -> Self;

    /// Embeds a `u64`, reducing modulo the prime if required.
    fn from_u64(value: u64) -> Self;

    /// Canonical little-endian encoding, exactly `encoded_width(MODULUS_BITS)` bytes.
    fn to_le_bytes(&self) -> Vec<u8>;
}

impl NativeField for FieldElement {
    const MODULUS_BITS: u32 = FieldElement::MODULUS.bits;

    fn zero() -> Self {
        FieldElement::ZERO
    }

    fn from_u64(value: u64) -> Self {
        FieldElement::from(value)
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        self.as_u64().to_le_bytes().to_vec()
    }
}
