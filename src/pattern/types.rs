use core::fmt;

use serde::{Deserialize, Serialize};

use super::error::ParseError;
use crate::codec::{encoded_width, uniform_width};
use crate::field::NativeField;

/// Direction of one scheduled interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// The verifier draws a challenge from the sponge.
    Squeeze,
    /// The prover sends a reply that is mixed into the sponge.
    Absorb,
}

impl Op {
    /// Wire character of the operation.
    pub const fn wire_char(self) -> u8 {
        match self {
            Op::Squeeze => b'S',
            Op::Absorb => b'A',
        }
    }

    /// Parses a wire character.
    pub const fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            b'S' => Some(Op::Squeeze),
            b'A' => Some(Op::Absorb),
            _ => None,
        }
    }

    /// Lower-case name used by the pretty rendering.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Squeeze => "squeeze",
            Op::Absorb => "absorb",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scheduled step of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interaction {
    /// Squeeze or absorb.
    pub op: Op,
    /// Number of bytes involved, at least one.
    pub length: usize,
    /// Diagnostic tag; part of the wire bytes and therefore of the sponge seed.
    pub label: String,
}

impl Interaction {
    /// Creates a new interaction.
    pub fn new(op: Op, length: usize, label: impl Into<String>) -> Self {
        Self {
            op,
            length,
            label: label.into(),
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.op, self.length, self.label)
    }
}

/// Ordered squeeze/absorb schedule agreed between prover and verifier.
///
/// The wire bytes are kept next to the decoded form: they seed the sponge,
/// so they must be reproduced exactly as the protocol published them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IOPattern {
    pub(super) domain_separator: String,
    pub(super) interactions: Vec<Interaction>,
    pub(super) wire: Vec<u8>,
}

impl IOPattern {
    /// Starts a builder for a new schedule.
    pub fn new(domain_separator: &str) -> IOPatternBuilder {
        IOPatternBuilder {
            domain_separator: domain_separator.to_owned(),
            interactions: Vec::new(),
            error: if domain_separator.contains('\0') {
                Some(ParseError::InvalidDomain { field: 0 })
            } else {
                None
            },
        }
    }

    /// Parses the NUL-separated wire form.
    pub fn parse(wire: &[u8]) -> Result<Self, ParseError> {
        super::parse::parse(wire)
    }

    /// Domain separator (first wire field).
    pub fn domain_separator(&self) -> &str {
        &self.domain_separator
    }

    /// Scheduled interactions in order.
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Number of scheduled interactions.
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Always `false`: a parsed schedule holds at least one interaction.
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Exact wire bytes of the schedule.
    pub fn as_bytes(&self) -> &[u8] {
        &self.wire
    }

    /// Re-encodes the decoded form into wire bytes.
    pub fn to_wire(&self) -> Vec<u8> {
        encode_wire(&self.domain_separator, &self.interactions)
    }

    /// Total number of bytes the prover sends.
    pub fn absorb_len(&self) -> usize {
        self.total(Op::Absorb)
    }

    /// Total number of bytes the verifier draws.
    pub fn squeeze_len(&self) -> usize {
        self.total(Op::Squeeze)
    }

    fn total(&self, op: Op) -> usize {
        self.interactions
            .iter()
            .filter(|i| i.op == op)
            .map(|i| i.length)
            .sum()
    }
}

pub(super) fn encode_wire(domain_separator: &str, interactions: &[Interaction]) -> Vec<u8> {
    let mut wire = domain_separator.as_bytes().to_vec();
    for interaction in interactions {
        wire.push(0);
        wire.push(interaction.op.wire_char());
        wire.extend_from_slice(interaction.length.to_string().as_bytes());
        wire.extend_from_slice(interaction.label.as_bytes());
    }
    wire
}

/// Fluent builder for [`IOPattern`].
///
/// The first invalid step is remembered and reported by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct IOPatternBuilder {
    domain_separator: String,
    interactions: Vec<Interaction>,
    error: Option<ParseError>,
}

impl IOPatternBuilder {
    /// Declares `length` bytes sent by the prover.
    pub fn absorb(self, length: usize, label: &str) -> Self {
        self.push(Op::Absorb, length, label)
    }

    /// Declares `length` bytes drawn by the verifier.
    pub fn squeeze(self, length: usize, label: &str) -> Self {
        self.push(Op::Squeeze, length, label)
    }

    /// Declares `count` reply scalars in the canonical encoding of `F`.
    pub fn absorb_scalars<F: NativeField>(self, count: usize, label: &str) -> Self {
        self.absorb(count * encoded_width(F::MODULUS_BITS), label)
    }

    /// Declares `count` challenge scalars drawn with the uniform width of `F`.
    pub fn challenge_scalars<F: NativeField>(self, count: usize, label: &str) -> Self {
        self.squeeze(count * uniform_width(F::MODULUS_BITS), label)
    }

    fn push(mut self, op: Op, length: usize, label: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        let field = self.interactions.len() + 1;
        if length == 0 {
            self.error = Some(ParseError::ZeroLength { field });
        } else if label.contains('\0') || label.starts_with(|c: char| c.is_ascii_digit()) {
            self.error = Some(ParseError::InvalidLabel { field });
        } else {
            self.interactions.push(Interaction::new(op, length, label));
        }
        self
    }

    /// Finalises the schedule.
    pub fn build(self) -> Result<IOPattern, ParseError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.interactions.is_empty() {
            return Err(ParseError::EmptySchedule { field: 1 });
        }
        let wire = encode_wire(&self.domain_separator, &self.interactions);
        Ok(IOPattern {
            domain_separator: self.domain_separator,
            interactions: self.interactions,
            wire,
        })
    }
}
