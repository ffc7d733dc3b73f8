//! Permutator construction.
//!
//! A permutator selects one of many discrete byte-permutation states,
//! cycling among `maximal_states` possibilities. Its state space is
//! partitioned into cycles whose lengths come from a fixed arrangement
//! pool; combining near-coprime cycle lengths composes a high-period
//! permutator from small periodic components.

use serde::Serialize;

use crate::error::ProformaError;
use crate::random::RandomSource;

/// Width of the permutation domain: one entry per byte value.
pub(crate) const PERMUTATION_WIDTH: usize = 256;

/// Candidate cycle-length arrangements. Each tuple sums to 256 so the
/// cycles exactly partition the permutation domain; the products of the
/// lengths (the permutator periods) stay below `i32::MAX`.
pub const CYCLE_SIZES: [[i16; 4]; 6] = [
    [61, 63, 65, 67],
    [53, 65, 67, 71],
    [55, 57, 71, 73],
    [53, 61, 63, 79],
    [43, 57, 73, 83],
    [49, 51, 73, 83],
];

/// One cycle of a permutator's state space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Starting point into `randp` for this cycle.
    pub start: i16,
    /// Length of the cycle.
    pub length: i16,
    /// Point in `[0, length)` the cycle currently sits at.
    pub current: i16,
}

/// A generated permutator, laid out as the cipher engine stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permutator {
    /// Current state number; zero at creation.
    pub current_state: i32,
    /// Number of states this permutator steps through before repeating.
    pub maximal_states: i32,
    /// Cycles ordered as drawn; together they partition `[0, 256)`.
    pub cycles: Vec<Cycle>,
    /// The byte values 0-255 in a random order.
    pub randp: Vec<u8>,
    /// Bit permutation table the engine derives from `randp` on load.
    /// Left zeroed here; the generator never computes it.
    #[serde(skip_serializing)]
    pub(crate) bit_perm: Vec<u8>,
}

/// Builds permutators, consuming one unused arrangement per call.
///
/// The selection order is a permutation of the [`CYCLE_SIZES`] indices
/// drawn once at construction, consumed without replacement.
pub(crate) struct PermutatorBuilder {
    order: Vec<usize>,
    next: usize,
}

impl PermutatorBuilder {
    pub(crate) fn new<R: RandomSource + ?Sized>(source: &mut R) -> Result<Self, ProformaError> {
        Ok(PermutatorBuilder {
            order: source.permutation(CYCLE_SIZES.len())?,
            next: 0,
        })
    }

    /// Builds the next permutator from the shared source.
    ///
    /// # Errors
    /// [`ProformaError::InvalidArgument`] once the arrangement pool is
    /// exhausted; entropy failures propagate unchanged.
    pub(crate) fn build<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<Permutator, ProformaError> {
        let idx = *self.order.get(self.next).ok_or_else(|| {
            ProformaError::InvalidArgument(format!(
                "cycle arrangement pool exhausted after {} permutators",
                self.order.len()
            ))
        })?;
        self.next += 1;

        let arrangement = &CYCLE_SIZES[idx];
        let mut cycles = Vec::with_capacity(arrangement.len());
        let mut running: i16 = 0;
        let mut maximal_states: i32 = 1;
        for &length in arrangement {
            cycles.push(Cycle {
                start: running,
                length,
                current: 0,
            });
            maximal_states *= length as i32;
            running += length;
        }
        debug_assert_eq!(running as usize, PERMUTATION_WIDTH);

        let randp: Vec<u8> = source
            .permutation(PERMUTATION_WIDTH)?
            .into_iter()
            .map(|val| val as u8)
            .collect();

        Ok(Permutator {
            current_state: 0,
            maximal_states,
            cycles,
            randp,
            bit_perm: vec![0u8; PERMUTATION_WIDTH],
        })
    }
}
