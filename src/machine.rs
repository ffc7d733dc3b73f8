//! Machine assembly.
//!
//! The assembler owns a single [`RandomSource`] and drives the rotor and
//! permutator builders through a caller-supplied slot layout, strictly
//! sequentially. The draw order is part of the reproducibility contract:
//! with a deterministic source, the same secret and the same layout yield
//! a byte-identical machine.

use serde::Serialize;

use crate::error::ProformaError;
use crate::permutator::{Permutator, PermutatorBuilder};
use crate::random::RandomSource;
use crate::rotor::{Rotor, RotorBuilder, StepPolicy};

/// Engine-reset marker element. The generator only resets its index to
/// zero; no randomness is drawn for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counter {
    /// Position of the counter; always zero in a fresh machine.
    pub index: i32,
}

/// One element of a proforma machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MachineElement {
    Rotor(Rotor),
    Permutator(Permutator),
    Counter(Counter),
}

/// Kind of element to generate at a machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Rotor,
    Permutator,
    Counter,
}

/// The reference machine layout: six rotors with a permutator after each
/// rotor pair.
pub const REFERENCE_LAYOUT: [Slot; 8] = [
    Slot::Rotor,
    Slot::Rotor,
    Slot::Permutator,
    Slot::Rotor,
    Slot::Rotor,
    Slot::Permutator,
    Slot::Rotor,
    Slot::Rotor,
];

/// Assembles a complete proforma machine from one randomness source.
///
/// Construction pre-draws the candidate orderings in a fixed sequence
/// (cycle arrangements first, then rotor sizes); [`assemble`] then
/// consumes the assembler, so each instance performs exactly one
/// generation run and the pool cursors can never be reused.
///
/// [`assemble`]: Self::assemble
///
/// # Examples
///
/// ```
/// use proforma::random::KeyedRandom;
/// use proforma::{MachineAssembler, REFERENCE_LAYOUT};
///
/// let source = KeyedRandom::from_secret(b"example secret").unwrap();
/// let machine = MachineAssembler::new(source)
///     .unwrap()
///     .assemble(&REFERENCE_LAYOUT)
///     .unwrap();
/// assert_eq!(machine.len(), 8);
/// ```
pub struct MachineAssembler<R: RandomSource> {
    source: R,
    rotors: RotorBuilder,
    permutators: PermutatorBuilder,
}

impl<R: RandomSource> MachineAssembler<R> {
    /// Creates an assembler with the reference nonzero step policy.
    pub fn new(source: R) -> Result<Self, ProformaError> {
        Self::with_step_policy(source, StepPolicy::default())
    }

    /// Creates an assembler drawing rotor steps under the given policy.
    pub fn with_step_policy(
        mut source: R,
        step_policy: StepPolicy,
    ) -> Result<Self, ProformaError> {
        let permutators = PermutatorBuilder::new(&mut source)?;
        let rotors = RotorBuilder::new(&mut source, step_policy)?;
        Ok(MachineAssembler {
            source,
            rotors,
            permutators,
        })
    }

    /// Generates every element of `layout` in order and returns the
    /// assembled machine.
    ///
    /// # Errors
    /// Propagates entropy failures and pool exhaustion unchanged; a
    /// failure at any slot aborts the whole run with no partial result.
    pub fn assemble(mut self, layout: &[Slot]) -> Result<Vec<MachineElement>, ProformaError> {
        let mut machine = Vec::with_capacity(layout.len());
        for slot in layout {
            let element = match slot {
                Slot::Rotor => MachineElement::Rotor(self.rotors.build(&mut self.source)?),
                Slot::Permutator => {
                    MachineElement::Permutator(self.permutators.build(&mut self.source)?)
                }
                Slot::Counter => MachineElement::Counter(Counter { index: 0 }),
            };
            machine.push(element);
        }
        Ok(machine)
    }
}
