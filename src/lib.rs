//! In-circuit replay of Fiat-Shamir transcripts.
//!
//! A prover that ran an interactive protocol through a sponge leaves behind
//! an IO pattern (the ordered list of squeezes and absorbs) and the raw bytes
//! it sent. The [`Arthur`] engine replays that schedule inside a constraint
//! system: challenges are squeezed from a sponge seeded by the pattern, and
//! replies are read from the transcript, bound to public commitment
//! variables and absorbed back into the sponge.
//!
//! ```
//! use rpp_arthur::circuit::Composer;
//! use rpp_arthur::field::FieldElement;
//! use rpp_arthur::{IOPattern, KeccakArthur, ReplayConfig};
//!
//! let pattern = IOPattern::new("demo")
//!     .squeeze(8, "challenge")
//!     .absorb(2, "reply")
//!     .build()
//!     .unwrap();
//! let transcript = [0x2a, 0x07];
//!
//! let mut cs = Composer::<FieldElement>::new();
//! let commitment = cs.append_public_bytes(&transcript);
//! let mut arthur =
//!     KeccakArthur::<FieldElement>::new(&pattern, &transcript, &commitment, ReplayConfig::default()).unwrap();
//!
//! arthur.challenge_bytes(&mut cs, 8).unwrap();
//! arthur.next_bytes(&mut cs, 2).unwrap();
//! assert!(arthur.finish().is_ok());
//! assert!(cs.is_satisfied().is_ok());
//! ```

pub mod arthur;
pub mod circuit;
pub mod codec;
pub mod config;
pub mod field;
pub mod pattern;
pub mod sponge;

pub use arthur::{
    Arthur, ArthurError, BufferExhaustionError, ConstructionError, KeccakArthur, ReplayResult,
    ReplaySummary, ScheduleMismatchError,
};
pub use codec::{ByteOrder, OverflowPolicy, ScalarCodec, ScalarRangeError};
pub use config::{ConfigError, ReplayConfig};
pub use pattern::{IOPattern, Interaction, Op, ParseError};
pub use sponge::{FromPattern, NativeSponge, SpongeGadget};
