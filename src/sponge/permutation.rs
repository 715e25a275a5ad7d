/// Fixed-width permutation driving a [`DuplexSponge`](super::DuplexSponge).
pub trait Permutation: Clone {
    /// State width in bytes.
    const WIDTH: usize;
    /// Number of leading state bytes exposed to absorb and squeeze.
    const RATE: usize;

    /// Fresh state with `iv` written into the capacity.
    fn with_iv(iv: &[u8; super::TAG_LEN]) -> Self;

    /// Applies the permutation in place.
    fn permute(&mut self);

    /// Current state bytes.
    fn state(&self) -> &[u8];

    /// Mutable state bytes.
    fn state_mut(&mut self) -> &mut [u8];
}

const KECCAK_WIDTH: usize = 200;
const KECCAK_RATE: usize = 136;

/// Keccak-f\[1600\] over a byte state with lanes in little-endian order.
#[derive(Clone, PartialEq, Eq)]
pub struct KeccakF1600 {
    state: [u8; KECCAK_WIDTH],
}

impl Default for KeccakF1600 {
    fn default() -> Self {
        Self {
            state: [0u8; KECCAK_WIDTH],
        }
    }
}

impl core::fmt::Debug for KeccakF1600 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeccakF1600").finish_non_exhaustive()
    }
}

impl Permutation for KeccakF1600 {
    const WIDTH: usize = KECCAK_WIDTH;
    const RATE: usize = KECCAK_RATE;

    fn with_iv(iv: &[u8; super::TAG_LEN]) -> Self {
        let mut permutation = Self::default();
        permutation.state[KECCAK_RATE..KECCAK_RATE + iv.len()].copy_from_slice(iv);
        permutation
    }

    fn permute(&mut self) {
        let mut lanes = [0u64; 25];
        for (lane, chunk) in lanes.iter_mut().zip(self.state.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *lane = u64::from_le_bytes(word);
        }
        keccak::f1600(&mut lanes);
        for (chunk, lane) in self.state.chunks_exact_mut(8).zip(lanes.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
    }

    fn state(&self) -> &[u8] {
        &self.state
    }

    fn state_mut(&mut self) -> &mut [u8] {
        &mut self.state
    }
}
