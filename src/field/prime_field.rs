//! Goldilocks prime field used as the default native circuit field.
//!
//! Elements are kept in canonical form: the wrapped integer is always within
//! `[0, MODULUS.value)`. The native encoding is the little-endian `u64`.

use core::{fmt, ops};

/// Prime modulus and its bit length.
#[derive(Debug, Clone, Copy)]
pub struct Modulus {
    pub value: u64,
    pub bits: u32,
}

/// Field element represented as a canonical value modulo the prime.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(pub(crate) u64);

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldElement").field(&self.0).finish()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FieldElement {
    /// Goldilocks modulus `2^64 - 2^32 + 1`.
    pub const MODULUS: Modulus = Modulus {
        value: 0xffff_ffff_0000_0001,
        bits: 64,
    };
    /// Additive identity in canonical form.
    pub const ZERO: FieldElement = FieldElement(0);
    /// Multiplicative identity in canonical form.
    pub const ONE: FieldElement = FieldElement(1);

    /// Builds an element from an arbitrary `u128`, reducing modulo the prime.
    pub const fn from_u128(value: u128) -> Self {
        FieldElement((value % Self::MODULUS.value as u128) as u64)
    }

    /// Returns the canonical integer representative.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Raises the element to `exponent` by square-and-multiply.
    pub fn pow(&self, mut exponent: u64) -> Self {
        let mut base = *self;
        let mut acc = Self::ONE;
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            exponent >>= 1;
        }
        acc
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u128(value as u128)
    }
}

impl ops::Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_u128(self.0 as u128 + rhs.0 as u128)
    }
}

impl ops::Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_u128(self.0 as u128 * rhs.0 as u128)
    }
}
