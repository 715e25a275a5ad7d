use super::permutation::{KeccakF1600, Permutation};
use super::{NativeSponge, TAG_LEN};

/// Overwrite-mode duplex sponge over a [`Permutation`].
///
/// Absorbed bytes replace the rate portion of the state and the permutation
/// runs whenever the rate is full. Any absorb forces the next squeeze to
/// permute first, and a squeeze that permutes restarts absorption at the
/// beginning of the rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplexSponge<P> {
    permutation: P,
    absorb_pos: usize,
    squeeze_pos: usize,
}

/// Keccak duplex sponge compatible with the nimue transcript layout.
pub type Keccak = DuplexSponge<KeccakF1600>;

impl<P: Permutation> NativeSponge for DuplexSponge<P> {
    fn new(tag: [u8; TAG_LEN]) -> Self {
        Self {
            permutation: P::with_iv(&tag),
            absorb_pos: 0,
            squeeze_pos: P::RATE,
        }
    }

    fn absorb(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            if self.absorb_pos == P::RATE {
                self.permutation.permute();
                self.absorb_pos = 0;
            }
            let take = input.len().min(P::RATE - self.absorb_pos);
            let (chunk, rest) = input.split_at(take);
            self.permutation.state_mut()[self.absorb_pos..self.absorb_pos + take]
                .copy_from_slice(chunk);
            self.absorb_pos += take;
            input = rest;
        }
        self.squeeze_pos = P::RATE;
    }

    fn squeeze(&mut self, mut output: &mut [u8]) {
        while !output.is_empty() {
            if self.squeeze_pos == P::RATE {
                self.squeeze_pos = 0;
                self.absorb_pos = 0;
                self.permutation.permute();
            }
            let take = output.len().min(P::RATE - self.squeeze_pos);
            let (chunk, rest) = core::mem::take(&mut output).split_at_mut(take);
            chunk.copy_from_slice(
                &self.permutation.state()[self.squeeze_pos..self.squeeze_pos + take],
            );
            self.squeeze_pos += take;
            output = rest;
        }
    }
}
