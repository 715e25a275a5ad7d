use core::fmt;
use core::ops;

use super::{ByteVar, ConstraintSystem, ScalarVar};
use crate::field::NativeField;

/// Constraint recorded by the [`Composer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint<F> {
    /// Two byte variables must carry the same value.
    EqualBytes(ByteVar, ByteVar),
    /// Two scalar variables must carry the same value.
    EqualScalars(ScalarVar, ScalarVar),
    /// `output` must equal the weighted sum of the listed bytes.
    Pack {
        /// Packed scalar.
        output: ScalarVar,
        /// Weight and byte pairs.
        terms: Vec<(F, ByteVar)>,
    },
    /// `output` must equal the weighted sum of the listed scalars.
    Linear {
        /// Combined scalar.
        output: ScalarVar,
        /// Coefficient and scalar pairs.
        terms: Vec<(F, ScalarVar)>,
    },
}

/// First constraint found violated by [`Composer::is_satisfied`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsatisfiedConstraint {
    /// Index of the violated constraint in insertion order.
    pub index: usize,
    /// Short description of the constraint kind.
    pub kind: &'static str,
}

impl fmt::Display for UnsatisfiedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint #{} ({}) is not satisfied", self.index, self.kind)
    }
}

impl std::error::Error for UnsatisfiedConstraint {}

/// In-memory constraint system keeping witnesses next to constraints.
#[derive(Debug, Clone)]
pub struct Composer<F> {
    bytes: Vec<u8>,
    scalars: Vec<F>,
    public_inputs: Vec<ByteVar>,
    constraints: Vec<Constraint<F>>,
}

impl<F> Default for Composer<F> {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            scalars: Vec::new(),
            public_inputs: Vec::new(),
            constraints: Vec::new(),
        }
    }
}

impl<F> ops::Index<ByteVar> for Composer<F> {
    type Output = u8;

    fn index(&self, var: ByteVar) -> &Self::Output {
        &self.bytes[var.index()]
    }
}

impl<F: NativeField> Composer<F> {
    /// Creates an empty composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded constraints.
    pub fn constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the recorded constraint list.
    pub fn constraint_list(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    /// Returns the number of allocated byte variables.
    pub fn num_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the number of allocated scalar variables.
    pub fn num_scalars(&self) -> usize {
        self.scalars.len()
    }

    /// Returns the byte variables marked as public inputs, in allocation order.
    pub fn public_inputs(&self) -> &[ByteVar] {
        &self.public_inputs
    }

    /// Allocates a public byte variable.
    pub fn append_public_byte(&mut self, value: u8) -> ByteVar {
        let var = self.alloc_byte(value);
        self.public_inputs.push(var);
        var
    }

    /// Allocates one public byte variable per input byte.
    pub fn append_public_bytes(&mut self, values: &[u8]) -> Vec<ByteVar> {
        values.iter().map(|&v| self.append_public_byte(v)).collect()
    }

    /// Constrains two scalar variables to be equal.
    pub fn assert_equal_scalars(&mut self, left: ScalarVar, right: ScalarVar) {
        self.constraints.push(Constraint::EqualScalars(left, right));
    }

    /// Allocates a scalar constrained to `sum(coeff * scalar)`.
    pub fn linear_combination(&mut self, terms: &[(F, ScalarVar)]) -> ScalarVar {
        let value = self.combine(terms);
        let output = ScalarVar::new(self.scalars.len());
        self.scalars.push(value);
        self.constraints.push(Constraint::Linear {
            output,
            terms: terms.to_vec(),
        });
        output
    }

    /// Overwrites the witness of a byte variable, leaving constraints intact.
    pub fn set_byte_witness(&mut self, var: ByteVar, value: u8) {
        self.bytes[var.index()] = value;
    }

    /// Checks every recorded constraint against the current witness.
    pub fn is_satisfied(&self) -> Result<(), UnsatisfiedConstraint> {
        for (index, constraint) in self.constraints.iter().enumerate() {
            let (holds, kind) = match constraint {
                Constraint::EqualBytes(l, r) => (self[*l] == self[*r], "equal bytes"),
                Constraint::EqualScalars(l, r) => (
                    self.scalars[l.index()] == self.scalars[r.index()],
                    "equal scalars",
                ),
                Constraint::Pack { output, terms } => {
                    let sum = terms.iter().fold(F::zero(), |acc, (coeff, byte)| {
                        acc + *coeff * F::from_u64(self[*byte] as u64)
                    });
                    (self.scalars[output.index()] == sum, "pack")
                }
                Constraint::Linear { output, terms } => (
                    self.scalars[output.index()] == self.combine(terms),
                    "linear",
                ),
            };
            if !holds {
                return Err(UnsatisfiedConstraint { index, kind });
            }
        }
        Ok(())
    }

    fn combine(&self, terms: &[(F, ScalarVar)]) -> F {
        terms.iter().fold(F::zero(), |acc, (coeff, var)| {
            acc + *coeff * self.scalars[var.index()]
        })
    }
}

impl<F: NativeField> ConstraintSystem<F> for Composer<F> {
    fn alloc_byte(&mut self, value: u8) -> ByteVar {
        let var = ByteVar::new(self.bytes.len());
        self.bytes.push(value);
        var
    }

    fn byte_value(&self, var: ByteVar) -> u8 {
        self[var]
    }

    fn assert_equal_bytes(&mut self, left: ByteVar, right: ByteVar) {
        self.constraints.push(Constraint::EqualBytes(left, right));
    }

    fn pack(&mut self, terms: &[(F, ByteVar)]) -> ScalarVar {
        let value = terms.iter().fold(F::zero(), |acc, (coeff, byte)| {
            acc + *coeff * F::from_u64(self[*byte] as u64)
        });
        let output = ScalarVar::new(self.scalars.len());
        self.scalars.push(value);
        self.constraints.push(Constraint::Pack {
            output,
            terms: terms.to_vec(),
        });
        output
    }

    fn scalar_value(&self, var: ScalarVar) -> F {
        self.scalars[var.index()]
    }
}
