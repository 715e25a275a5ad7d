//! Transcript engine replaying a Fiat-Shamir schedule in-circuit.
//!
//! | Fill | Op | Length consumed | Effect |
//! |------|----|-----------------|--------|
//! | `fill_challenge_bytes` | squeeze | `out.len()` | squeeze bytes |
//! | `fill_challenge_scalars` | squeeze | `out.len() * challenge width` | one squeeze per scalar, pack big endian mod p |
//! | `fill_next_bytes` | absorb | `out.len()` | read, bind to commitment, absorb |
//! | `fill_next_scalars` | absorb | `out.len() * reply width` | decode, read, bind, absorb, pack |
//!
//! Only absorb steps move the buffer cursor; every successful fill moves the
//! schedule cursor by exactly one.

mod core;
mod cursor;
mod errors;

pub use self::core::{Arthur, Blake2sArthur, KeccakArthur, ReplaySummary};
pub use errors::{
    ArthurError, BufferExhaustionError, ConstructionError, ReplayResult, Request,
    ScheduleMismatchError,
};
