//! Rotor construction.
//!
//! A rotor is a bit-indexed rolling state object: the cipher engine reads
//! its bit buffer through a 256-bit sliding window offset by `current` and
//! advanced by `step` each tick. The generator's job is to pick a size
//! from the candidate pool, draw the offsets, randomize the raw buffer and
//! apply the wraparound slice so any 256-bit window starting in
//! `[0, size)` can be read without modular indexing.

use serde::Serialize;

use crate::error::ProformaError;
use crate::random::RandomSource;

/// Width in bits of the engine's sliding read window, replicated onto the
/// rotor tail by the wraparound slice.
pub(crate) const SLICE_BITS: usize = 256;

/// Candidate rotor sizes. All are primes below 1792, so a rotor plus its
/// 256-bit slice fits in 2048 bits, and selecting distinct sizes from this
/// list maximizes the number of unique states the rotor set can take.
pub const ROTOR_SIZES: [i16; 6] = [1789, 1787, 1777, 1759, 1753, 1747];

/// A generated rotor, laid out exactly as the cipher engine stores it.
///
/// `rotor` holds `ceil((size + 256) / 8)` bytes in LSB-first bit order.
/// After construction the first 256 bits are replicated onto bit positions
/// `[size, size + 256)`; only the cipher engine mutates `current` after
/// that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rotor {
    /// Size in bits of this rotor.
    pub size: i16,
    /// Initial position of the rotor.
    pub start: i16,
    /// Step in bits the engine advances the rotor by each tick.
    pub step: i16,
    /// Current position; mirrors `start` at creation.
    pub current: i16,
    /// The rotor bit buffer, wraparound slice included.
    pub rotor: Vec<u8>,
}

/// How the rotor `step` offset is drawn. Engine versions differ on the
/// exact bound, so the policy is configurable per assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepPolicy {
    /// `step` in `[1, size)`. A zero step would leave the rotor static,
    /// so this is the reference engine's policy.
    #[default]
    NonZero,
    /// `step` in `[0, size)`, as drawn by older engine variants.
    ZeroAllowed,
}

impl StepPolicy {
    fn draw<R: RandomSource + ?Sized>(
        self,
        source: &mut R,
        size: i16,
    ) -> Result<i16, ProformaError> {
        match self {
            StepPolicy::NonZero => Ok(source.bounded_int(size as i64 - 1)? as i16 + 1),
            StepPolicy::ZeroAllowed => Ok(source.bounded_int(size as i64)? as i16),
        }
    }
}

/// Builds rotors, consuming one unused pool size per call.
///
/// The selection order is a permutation of the [`ROTOR_SIZES`] indices
/// drawn once at construction; sizes are consumed without replacement, so
/// requesting more rotors than the pool holds is a contract violation.
pub(crate) struct RotorBuilder {
    order: Vec<usize>,
    next: usize,
    step_policy: StepPolicy,
}

impl RotorBuilder {
    pub(crate) fn new<R: RandomSource + ?Sized>(
        source: &mut R,
        step_policy: StepPolicy,
    ) -> Result<Self, ProformaError> {
        Ok(RotorBuilder {
            order: source.permutation(ROTOR_SIZES.len())?,
            next: 0,
            step_policy,
        })
    }

    /// Builds the next rotor from the shared source.
    ///
    /// # Errors
    /// [`ProformaError::InvalidArgument`] once the size pool is exhausted;
    /// entropy failures propagate unchanged.
    pub(crate) fn build<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<Rotor, ProformaError> {
        let idx = *self.order.get(self.next).ok_or_else(|| {
            ProformaError::InvalidArgument(format!(
                "rotor size pool exhausted after {} rotors",
                self.order.len()
            ))
        })?;
        self.next += 1;

        let size = ROTOR_SIZES[idx];
        let start = source.bounded_int(size as i64)? as i16;
        let step = self.step_policy.draw(source, size)?;

        let mut rotor = vec![0u8; (size as usize + SLICE_BITS).div_ceil(8)];
        source.fill_bytes(&mut rotor)?;
        slice_rotor(&mut rotor, size as usize);

        Ok(Rotor {
            size,
            start,
            step,
            current: start,
            rotor,
        })
    }
}

/// Replicates the first 256 bits of the buffer onto the tail starting at
/// bit position `size`, leaving bits `[0, size)` untouched.
///
/// The copy runs at the byte level: when `size` is not byte-aligned, each
/// source byte is split across two destination bytes by shifting with
/// `size mod 8`. No new randomness is introduced.
pub(crate) fn slice_rotor(rotor: &mut [u8], size: usize) {
    let s_blk = size >> 3;
    let s_bit = size & 7;
    if s_bit == 0 {
        rotor.copy_within(0..SLICE_BITS / 8, s_blk);
        return;
    }
    let r_shift = 8 - s_bit;
    let l_shift = s_bit;
    let mut blk = s_blk;
    for i in 0..SLICE_BITS / 8 {
        let head = rotor[i];
        rotor[blk] &= 0xffu8 >> r_shift; // keep the tail bits of [0, size)
        rotor[blk] |= head << l_shift;
        blk += 1;
        rotor[blk] = head >> r_shift;
    }
}
