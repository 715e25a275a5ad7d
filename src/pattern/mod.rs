//! IO patterns: the ordered squeeze/absorb schedule of a protocol.
//!
//! Wire form, NUL separated:
//!
//! ```text
//! <domain separator>\0<op><len><label>\0<op><len><label>...
//! ```
//!
//! `op` is `S` (the verifier squeezes a challenge) or `A` (the prover's reply
//! is absorbed), `len` a decimal byte count without leading zeros and `label`
//! free text that must not start with a digit. The wire bytes seed the sponge,
//! so two schedules that only differ in a label are different protocols.

mod error;
mod parse;
mod pretty;
mod types;

pub use error::ParseError;
pub use parse::parse;
pub use pretty::parse_pretty;
pub use types::{IOPattern, IOPatternBuilder, Interaction, Op};
