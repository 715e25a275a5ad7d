use super::{Blake2sChain, FromPattern, Keccak, NativeSponge, SpongeGadget};
use crate::circuit::{ByteVar, ConstraintSystem};
use crate::field::NativeField;
use crate::pattern::IOPattern;

/// Lifts a [`NativeSponge`] into the circuit by evaluating it on witnesses.
///
/// Squeezed bytes become freshly allocated byte variables; the hashing itself
/// is not constrained.
#[derive(Debug, Clone)]
pub struct WitnessSponge<N> {
    native: N,
}

/// Keccak duplex sponge on byte variables.
pub type KeccakGadget = WitnessSponge<Keccak>;

/// Blake2s chain sponge on byte variables.
pub type Blake2sGadget = WitnessSponge<Blake2sChain>;

impl<N: NativeSponge> WitnessSponge<N> {
    /// Wraps an already keyed native sponge.
    pub fn new(native: N) -> Self {
        Self { native }
    }

    /// Native sponge driven by the adapter.
    pub fn native(&self) -> &N {
        &self.native
    }
}

impl<N: NativeSponge> FromPattern for WitnessSponge<N> {
    fn from_pattern(pattern: &IOPattern) -> Self {
        Self::new(N::from_pattern(pattern))
    }
}

impl<F, CS, N> SpongeGadget<F, CS> for WitnessSponge<N>
where
    F: NativeField,
    CS: ConstraintSystem<F> + ?Sized,
    N: NativeSponge,
{
    fn absorb(&mut self, cs: &mut CS, input: &[ByteVar]) {
        let bytes: Vec<u8> = input.iter().map(|var| cs.byte_value(*var)).collect();
        self.native.absorb(&bytes);
    }

    fn squeeze(&mut self, cs: &mut CS, len: usize) -> Vec<ByteVar> {
        let mut bytes = vec![0u8; len];
        self.native.squeeze(&mut bytes);
        bytes.into_iter().map(|byte| cs.alloc_byte(byte)).collect()
    }
}
