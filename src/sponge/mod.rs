//! Sponge capability injected into the transcript engine.
//!
//! The engine only needs `absorb` and `squeeze` over circuit byte variables;
//! [`SpongeGadget`] captures exactly that. Native sponges implement
//! [`NativeSponge`] and are lifted into the circuit by [`WitnessSponge`],
//! which evaluates them on witness values and works over any
//! [`ConstraintSystem`]. The gadget trait is parameterised by the constraint
//! system type, so a sponge that constrains its own hashing implements it
//! only for back-ends exposing the gates it needs.
//!
//! Every sponge is seeded from the schedule: a zero-keyed instance absorbs
//! the full wire bytes of the [`IOPattern`] and squeezes a 32-byte tag that
//! keys the instance used for the replay.

mod blake2s;
mod duplex;
mod permutation;
mod witness;

pub use blake2s::Blake2sChain;
pub use duplex::{DuplexSponge, Keccak};
pub use permutation::{KeccakF1600, Permutation};
pub use witness::{Blake2sGadget, KeccakGadget, WitnessSponge};

use crate::circuit::{ByteVar, ConstraintSystem};
use crate::field::NativeField;
use crate::pattern::IOPattern;

/// Length of the tag that keys a sponge.
pub const TAG_LEN: usize = 32;

/// Sponge evaluated on plain bytes.
pub trait NativeSponge: Clone {
    /// Creates an instance keyed with `tag`.
    fn new(tag: [u8; TAG_LEN]) -> Self;

    /// Mixes `input` into the state.
    fn absorb(&mut self, input: &[u8]);

    /// Fills `output` with bytes derived from the state.
    fn squeeze(&mut self, output: &mut [u8]);

    /// Creates the instance bound to `pattern`.
    fn from_pattern(pattern: &IOPattern) -> Self {
        Self::new(pattern_tag::<Self>(pattern))
    }
}

/// Tag derived from the wire bytes of `pattern` with a zero-keyed `S`.
pub fn pattern_tag<S: NativeSponge>(pattern: &IOPattern) -> [u8; TAG_LEN] {
    let mut sponge = S::new([0u8; TAG_LEN]);
    sponge.absorb(pattern.as_bytes());
    let mut tag = [0u8; TAG_LEN];
    sponge.squeeze(&mut tag);
    tag
}

/// Sponge that can be instantiated for a schedule before any circuit exists.
pub trait FromPattern {
    /// Creates the sponge bound to `pattern`.
    fn from_pattern(pattern: &IOPattern) -> Self;
}

/// Sponge operating on byte variables of the constraint system `CS`.
pub trait SpongeGadget<F: NativeField, CS: ConstraintSystem<F> + ?Sized> {
    /// Mixes the values carried by `input` into the state.
    fn absorb(&mut self, cs: &mut CS, input: &[ByteVar]);

    /// Returns `len` fresh byte variables derived from the state.
    fn squeeze(&mut self, cs: &mut CS, len: usize) -> Vec<ByteVar>;
}
