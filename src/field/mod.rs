//! Native field arithmetic for the circuits the transcript is replayed in.
//! Goldilocks is built in; BN254 is available behind the `bn254` feature.

pub mod native;
pub mod prime_field;

#[cfg(feature = "bn254")]
pub mod bn254;

pub use native::NativeField;
pub use prime_field::{FieldElement, Modulus};
