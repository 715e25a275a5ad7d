//! BN254 scalar field support, the native field of Groth16 circuits over
//! BN254.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};

use super::native::NativeField;

impl NativeField for Fr {
    const MODULUS_BITS: u32 = <Fr as PrimeField>::MODULUS_BIT_SIZE;

    fn zero() -> Self {
        Fr::from(0u64)
    }

    fn from_u64(value: u64) -> Self {
        Fr::from(value)
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        self.into_bigint().to_bytes_le()
    }
}
