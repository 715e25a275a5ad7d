//! Capability boundary towards the proving back-end.
//!
//! The transcript engine never compiles constraints itself. It allocates
//! typed variables and emits equality and packing constraints through the
//! [`ConstraintSystem`] trait. [`Composer`] is an in-memory reference
//! implementation that keeps witness values next to the constraint list and
//! can check satisfaction, which is what tests and native dry runs need.

mod composer;

pub use composer::{Composer, Constraint, UnsatisfiedConstraint};

use crate::field::NativeField;

/// Handle to a byte-valued circuit variable.
///
/// Range checking the variable to `0..256` is the back-end's concern. The
/// default handle points at the first variable and is meant as a placeholder
/// for output slices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByteVar {
    index: usize,
}

impl ByteVar {
    pub(crate) const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Position of the variable in the back-end's byte arena.
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Handle to a native-field circuit variable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScalarVar {
    index: usize,
}

impl ScalarVar {
    pub(crate) const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Position of the variable in the back-end's scalar arena.
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Operations the engine needs from a constraint system over `F`.
pub trait ConstraintSystem<F: NativeField> {
    /// Allocates a private byte variable carrying `value` as witness.
    fn alloc_byte(&mut self, value: u8) -> ByteVar;

    /// Reads the witness value assigned to `var`.
    fn byte_value(&self, var: ByteVar) -> u8;

    /// Constrains two byte variables to be equal.
    fn assert_equal_bytes(&mut self, left: ByteVar, right: ByteVar);

    /// Allocates a scalar constrained to `sum(coeff * byte)` over the native field.
    fn pack(&mut self, terms: &[(F, ByteVar)]) -> ScalarVar;

    /// Reads the witness value assigned to `var`.
    fn scalar_value(&self, var: ScalarVar) -> F;
}
