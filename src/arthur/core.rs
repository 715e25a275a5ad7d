use std::borrow::Cow;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::cursor::TranscriptReader;
use super::errors::{
    ArthurError, BufferExhaustionError, ConstructionError, ReplayResult, Request,
    ScheduleMismatchError,
};
use crate::circuit::{ByteVar, ConstraintSystem, ScalarVar};
use crate::codec::ScalarCodec;
use crate::config::ReplayConfig;
use crate::field::NativeField;
use crate::pattern::{IOPattern, Interaction, Op};
use crate::sponge::{Blake2sGadget, FromPattern, KeccakGadget, SpongeGadget};

/// Totals reported by [`Arthur::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Number of interactions replayed.
    pub interactions: usize,
    /// Transcript bytes consumed by absorb steps.
    pub absorbed_bytes: usize,
    /// Bytes drawn from the sponge.
    pub squeezed_bytes: usize,
    /// Transcript bytes left after the last absorb.
    pub trailing_bytes: usize,
}

/// Verifier-side replay of a Fiat-Shamir transcript inside a circuit.
///
/// The engine walks the [`IOPattern`] with a schedule cursor. Squeeze steps
/// draw challenge variables from the sponge; absorb steps read the prover's
/// reply from the raw transcript, bind every byte to the matching public
/// commitment variable and feed it to the sponge. Each fill consumes exactly
/// one interaction and is validated before anything changes: a rejected call
/// leaves the cursors, the sponge and the constraint system untouched.
#[derive(Debug)]
pub struct Arthur<'a, F: NativeField, S = KeccakGadget> {
    pattern: Cow<'a, IOPattern>,
    transcript: TranscriptReader<'a>,
    commitment: &'a [ByteVar],
    sponge: S,
    config: ReplayConfig,
    challenge_codec: ScalarCodec,
    reply_codec: ScalarCodec,
    schedule_cursor: usize,
    squeezed_bytes: usize,
    _field: PhantomData<F>,
}

/// Engine over the Keccak duplex sponge.
pub type KeccakArthur<'a, F> = Arthur<'a, F, KeccakGadget>;

/// Engine over the Blake2s chain sponge.
pub type Blake2sArthur<'a, F> = Arthur<'a, F, Blake2sGadget>;

impl<'a, F: NativeField, S: FromPattern> Arthur<'a, F, S> {
    /// Creates an engine for `pattern` over `transcript`.
    ///
    /// `commitment` holds one public byte variable per transcript byte.
    pub fn new(
        pattern: &'a IOPattern,
        transcript: &'a [u8],
        commitment: &'a [ByteVar],
        config: ReplayConfig,
    ) -> Result<Self, ConstructionError> {
        Self::with_pattern(Cow::Borrowed(pattern), transcript, commitment, config)
    }

    /// Parses the wire form of a schedule and creates an engine for it.
    pub fn from_schedule(
        schedule: impl AsRef<[u8]>,
        transcript: &'a [u8],
        commitment: &'a [ByteVar],
        config: ReplayConfig,
    ) -> Result<Self, ConstructionError> {
        let pattern = IOPattern::parse(schedule.as_ref())?;
        Self::with_pattern(Cow::Owned(pattern), transcript, commitment, config)
    }

    fn with_pattern(
        pattern: Cow<'a, IOPattern>,
        transcript: &'a [u8],
        commitment: &'a [ByteVar],
        config: ReplayConfig,
    ) -> Result<Self, ConstructionError> {
        config.validate()?;
        if commitment.len() != transcript.len() {
            return Err(ConstructionError::CommitmentLength {
                transcript: transcript.len(),
                commitment: commitment.len(),
            });
        }

        let sponge = S::from_pattern(&pattern);
        tracing::debug!(
            domain = pattern.domain_separator(),
            interactions = pattern.len(),
            transcript_len = transcript.len(),
            "transcript replay initialised"
        );
        Ok(Self {
            challenge_codec: config.challenge_codec::<F>(),
            reply_codec: config.reply_codec::<F>(),
            pattern,
            transcript: TranscriptReader::new(transcript),
            commitment,
            sponge,
            config,
            schedule_cursor: 0,
            squeezed_bytes: 0,
            _field: PhantomData,
        })
    }

    /// Draws `out.len()` challenge bytes.
    pub fn fill_challenge_bytes<CS>(
        &mut self,
        cs: &mut CS,
        out: &mut [ByteVar],
    ) -> ReplayResult<()>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        self.expect(Op::Squeeze, out.len())?;
        let bytes = self.sponge.squeeze(cs, out.len());
        out.copy_from_slice(&bytes);
        self.complete(Op::Squeeze, out.len());
        Ok(())
    }

    /// Draws `out.len()` challenge scalars.
    ///
    /// Each scalar gets its own squeeze of the challenge width; the bytes are
    /// read big endian and reduced modulo the native field.
    pub fn fill_challenge_scalars<CS>(
        &mut self,
        cs: &mut CS,
        out: &mut [ScalarVar],
    ) -> ReplayResult<()>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        let codec = self.challenge_codec;
        let length = out.len().saturating_mul(codec.width);
        self.expect(Op::Squeeze, length)?;

        let weights = codec.weights::<F>();
        for slot in out.iter_mut() {
            let bytes = self.sponge.squeeze(cs, codec.width);
            *slot = pack(cs, &weights, &bytes);
        }
        self.complete(Op::Squeeze, length);
        Ok(())
    }

    /// Reads the prover's next `out.len()` reply bytes.
    pub fn fill_next_bytes<CS>(
        &mut self,
        cs: &mut CS,
        out: &mut [ByteVar],
    ) -> ReplayResult<()>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        self.expect(Op::Absorb, out.len())?;
        let bytes = self.peek(out.len())?;

        let vars = self.bind(cs, bytes);
        self.sponge.absorb(cs, &vars);
        out.copy_from_slice(&vars);
        self.transcript.advance(bytes.len());
        self.complete(Op::Absorb, bytes.len());
        Ok(())
    }

    /// Reads the prover's next `out.len()` reply scalars.
    ///
    /// Every scalar is decoded natively before any variable is allocated, so
    /// a non-canonical reply is rejected without side effects.
    pub fn fill_next_scalars<CS>(
        &mut self,
        cs: &mut CS,
        out: &mut [ScalarVar],
    ) -> ReplayResult<()>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        let codec = self.reply_codec;
        let length = out.len().saturating_mul(codec.width);
        self.expect(Op::Absorb, length)?;
        let bytes = self.peek(length)?;
        let values = bytes
            .chunks_exact(codec.width)
            .map(|chunk| codec.decode::<F>(chunk))
            .collect::<Result<Vec<F>, _>>()
            .map_err(|err| self.reject(err))?;

        let vars = self.bind(cs, bytes);
        self.sponge.absorb(cs, &vars);
        let weights = codec.weights::<F>();
        for ((slot, chunk), value) in out
            .iter_mut()
            .zip(vars.chunks_exact(codec.width))
            .zip(values)
        {
            let scalar = pack(cs, &weights, chunk);
            debug_assert!(cs.scalar_value(scalar) == value);
            *slot = scalar;
        }
        self.transcript.advance(length);
        self.complete(Op::Absorb, length);
        Ok(())
    }

    /// Draws `len` challenge bytes into a fresh vector.
    pub fn challenge_bytes<CS>(
        &mut self,
        cs: &mut CS,
        len: usize,
    ) -> ReplayResult<Vec<ByteVar>>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        let mut out = vec![ByteVar::default(); len];
        self.fill_challenge_bytes(cs, &mut out)?;
        Ok(out)
    }

    /// Draws `count` challenge scalars into a fresh vector.
    pub fn challenge_scalars<CS>(
        &mut self,
        cs: &mut CS,
        count: usize,
    ) -> ReplayResult<Vec<ScalarVar>>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        let mut out = vec![ScalarVar::default(); count];
        self.fill_challenge_scalars(cs, &mut out)?;
        Ok(out)
    }

    /// Reads `len` reply bytes into a fresh vector.
    pub fn next_bytes<CS>(
        &mut self,
        cs: &mut CS,
        len: usize,
    ) -> ReplayResult<Vec<ByteVar>>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        let mut out = vec![ByteVar::default(); len];
        self.fill_next_bytes(cs, &mut out)?;
        Ok(out)
    }

    /// Reads `count` reply scalars into a fresh vector.
    pub fn next_scalars<CS>(
        &mut self,
        cs: &mut CS,
        count: usize,
    ) -> ReplayResult<Vec<ScalarVar>>
    where
        CS: ConstraintSystem<F> + ?Sized,
        S: SpongeGadget<F, CS>,
    {
        let mut out = vec![ScalarVar::default(); count];
        self.fill_next_scalars(cs, &mut out)?;
        Ok(out)
    }

    /// Checks that the whole schedule was replayed and reports totals.
    pub fn finish(&self) -> ReplayResult<ReplaySummary> {
        let remaining = self.remaining();
        if remaining > 0 && !self.config.allow_unconsumed {
            return Err(self.reject(ArthurError::Unconsumed {
                position: self.schedule_cursor,
                remaining,
            }));
        }
        let summary = ReplaySummary {
            interactions: self.schedule_cursor,
            absorbed_bytes: self.transcript.position(),
            squeezed_bytes: self.squeezed_bytes,
            trailing_bytes: self.transcript.remaining(),
        };
        tracing::debug!(
            interactions = summary.interactions,
            absorbed = summary.absorbed_bytes,
            squeezed = summary.squeezed_bytes,
            trailing = summary.trailing_bytes,
            "transcript replay finished"
        );
        Ok(summary)
    }

    /// Schedule the engine replays.
    pub fn pattern(&self) -> &IOPattern {
        &self.pattern
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Index of the next interaction.
    pub fn schedule_cursor(&self) -> usize {
        self.schedule_cursor
    }

    /// Offset of the next unread transcript byte.
    pub fn buffer_cursor(&self) -> usize {
        self.transcript.position()
    }

    /// Interaction the next fill must match.
    pub fn next_interaction(&self) -> Option<&Interaction> {
        self.pattern.interactions().get(self.schedule_cursor)
    }

    /// Number of interactions not replayed yet.
    pub fn remaining(&self) -> usize {
        self.pattern.len() - self.schedule_cursor
    }

    /// Whether every interaction has been replayed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn expect(&self, op: Op, length: usize) -> ReplayResult<()> {
        match self.next_interaction() {
            Some(next) if next.op == op && next.length == length => Ok(()),
            expected => Err(self.reject(ScheduleMismatchError {
                position: self.schedule_cursor,
                expected: expected.cloned(),
                requested: Request { op, length },
            })),
        }
    }

    fn peek(&self, length: usize) -> ReplayResult<&'a [u8]> {
        self.transcript.peek(length).ok_or_else(|| {
            self.reject(BufferExhaustionError {
                position: self.schedule_cursor,
                offset: self.transcript.position(),
                requested: length,
                remaining: self.transcript.remaining(),
            })
        })
    }

    /// Allocates witnesses for `bytes` and binds them to the commitment.
    fn bind<CS: ConstraintSystem<F> + ?Sized>(&self, cs: &mut CS, bytes: &[u8]) -> Vec<ByteVar> {
        let start = self.transcript.position();
        bytes
            .iter()
            .zip(&self.commitment[start..start + bytes.len()])
            .map(|(byte, public)| {
                let var = cs.alloc_byte(*byte);
                cs.assert_equal_bytes(var, *public);
                var
            })
            .collect()
    }

    fn complete(&mut self, op: Op, length: usize) {
        tracing::trace!(
            position = self.schedule_cursor,
            op = %op,
            length,
            offset = self.transcript.position(),
            "replayed interaction"
        );
        if op == Op::Squeeze {
            self.squeezed_bytes += length;
        }
        self.schedule_cursor += 1;
    }

    fn reject(&self, err: impl Into<ArthurError>) -> ArthurError {
        let err = err.into();
        tracing::warn!(position = self.schedule_cursor, error = %err, "rejected replay step");
        err
    }
}

fn pack<F: NativeField, CS: ConstraintSystem<F> + ?Sized>(
    cs: &mut CS,
    weights: &[F],
    bytes: &[ByteVar],
) -> ScalarVar {
    let terms: Vec<(F, ByteVar)> = weights.iter().copied().zip(bytes.iter().copied()).collect();
    cs.pack(&terms)
}
