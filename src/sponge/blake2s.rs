use blake2::{Blake2s256, Digest};

use super::{NativeSponge, TAG_LEN};

const ABSORB_TAG: &[u8] = b"arthur/absorb";
const SQUEEZE_TAG: &[u8] = b"arthur/squeeze";

/// Hash-chain sponge over Blake2s.
///
/// Absorb hashes `state || tag || len || data` into the next state. Squeeze
/// streams a counter-mode Blake2s expansion of the state and folds the
/// produced bytes back in, so repeated squeezes never repeat output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blake2sChain {
    state: [u8; 32],
    squeezes: u64,
}

impl Blake2sChain {
    /// Current chaining value.
    pub fn state_digest(&self) -> [u8; 32] {
        self.state
    }
}

impl NativeSponge for Blake2sChain {
    fn new(tag: [u8; TAG_LEN]) -> Self {
        Self {
            state: tag,
            squeezes: 0,
        }
    }

    fn absorb(&mut self, input: &[u8]) {
        self.state = mix(&self.state, ABSORB_TAG, input);
    }

    fn squeeze(&mut self, output: &mut [u8]) {
        let mut seed = Blake2s256::new();
        seed.update(self.state);
        seed.update(SQUEEZE_TAG);
        seed.update(self.squeezes.to_le_bytes());
        let mut block: [u8; 32] = seed.finalize().into();

        let mut counter = 0u64;
        for chunk in output.chunks_mut(block.len()) {
            let mut hasher = Blake2s256::new();
            hasher.update(block);
            hasher.update(counter.to_le_bytes());
            block = hasher.finalize().into();
            chunk.copy_from_slice(&block[..chunk.len()]);
            counter = counter.wrapping_add(1);
        }

        self.squeezes = self.squeezes.wrapping_add(1);
        self.state = mix(&self.state, SQUEEZE_TAG, output);
    }
}

fn mix(state: &[u8; 32], tag: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2s256::new();
    hasher.update(state);
    hasher.update(tag);
    hasher.update((data.len() as u64).to_le_bytes());
    hasher.update(data);
    hasher.finalize().into()
}
