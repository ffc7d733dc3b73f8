//! Randomness sources for proforma machine generation.
//!
//! Every parameter of a generated machine is drawn through the
//! [`RandomSource`] trait, so the whole pipeline can run either from the
//! operating system CSPRNG ([`OsRandom`]) or from a deterministic keystream
//! seeded by a user secret ([`KeyedRandom`]). No component reads external
//! entropy directly.

pub mod keyed;
pub mod os_random;

pub(crate) mod mt64;
pub(crate) mod perm;

pub use keyed::{KeyedRandom, Keystream, SecretKeystream};
pub use os_random::OsRandom;

use crate::error::ProformaError;

/// A source of randomness for machine generation.
///
/// The trait exposes three operations: a raw byte fill, a bounded integer
/// draw, and a permutation of a range. The last two are provided methods
/// built on [`fill_bytes`](Self::fill_bytes), so every implementation
/// shares one draw discipline and a deterministic implementation yields
/// reproducible output for a fixed call sequence.
pub trait RandomSource {
    /// Fills `buf` completely with randomness.
    ///
    /// # Errors
    /// Returns [`ProformaError::Entropy`] if the underlying source cannot
    /// supply enough bytes. The failure is fatal for the generation run.
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), ProformaError>;

    /// Returns a uniformly distributed integer in `[0, n)`.
    ///
    /// Each candidate is one 8-byte block of the source interpreted as a
    /// big-endian 63-bit value. Power-of-two bounds mask the low bits of
    /// a single draw; other bounds use modulo rejection sampling.
    ///
    /// # Errors
    /// Returns [`ProformaError::InvalidArgument`] for `n <= 0`. Callers
    /// are expected to guarantee positivity; the error marks a
    /// programming-contract violation, not bad user input.
    fn bounded_int(&mut self, n: i64) -> Result<i64, ProformaError> {
        if n <= 0 {
            return Err(ProformaError::InvalidArgument(format!(
                "bounded_int requires a positive bound, got {}",
                n
            )));
        }
        let n_u = n as u64;
        if n_u & (n_u - 1) == 0 {
            return Ok((next_u63(self)? & (n_u - 1)) as i64);
        }
        loop {
            let bits = next_u63(self)? as i64;
            let val = bits % n;
            if bits.wrapping_sub(val).wrapping_add(n - 1) >= 0 {
                return Ok(val);
            }
        }
    }

    /// Returns a permutation of `[0, n)` built with the insertion
    /// Fisher-Yates of the permutation engine. `n == 0` yields an empty
    /// vector.
    fn permutation(&mut self, n: usize) -> Result<Vec<usize>, ProformaError> {
        perm::fisher_yates(self, n)
    }
}

/// Draws one 63-bit candidate from an 8-byte block of the source.
fn next_u63<R: RandomSource + ?Sized>(source: &mut R) -> Result<u64, ProformaError> {
    let mut block = [0u8; 8];
    source.fill_bytes(&mut block)?;
    Ok(u64::from_be_bytes(block) >> 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_int_range() {
        let mut source = KeyedRandom::from_secret(b"bounded range test").unwrap();
        for bound in [1i64, 2, 3, 7, 8, 10, 16, 100, 255, 256, 1789, i64::MAX] {
            for _ in 0..50 {
                let val = source.bounded_int(bound).unwrap();
                assert!(
                    (0..bound).contains(&val),
                    "bounded_int({}) returned {}",
                    bound,
                    val
                );
            }
        }
    }

    #[test]
    fn test_bounded_int_rejects_non_positive() {
        let mut source = KeyedRandom::from_secret(b"bounded contract test").unwrap();
        assert!(matches!(
            source.bounded_int(0),
            Err(ProformaError::InvalidArgument(_))
        ));
        assert!(matches!(
            source.bounded_int(-5),
            Err(ProformaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bounded_int_one_always_zero() {
        let mut source = KeyedRandom::from_secret(b"unit bound").unwrap();
        for _ in 0..20 {
            assert_eq!(source.bounded_int(1).unwrap(), 0);
        }
    }

    #[test]
    fn test_bounded_int_power_of_two_covers_range() {
        let mut source = KeyedRandom::from_secret(b"pow2 coverage").unwrap();
        let mut seen = [false; 8];
        for _ in 0..200 {
            seen[source.bounded_int(8).unwrap() as usize] = true;
        }
        assert!(
            seen.iter().all(|&hit| hit),
            "bounded_int(8) never produced some values: {:?}",
            seen
        );
    }

    #[test]
    fn test_bounded_int_deterministic_for_fixed_secret() {
        let mut a = KeyedRandom::from_secret(b"fixed secret").unwrap();
        let mut b = KeyedRandom::from_secret(b"fixed secret").unwrap();
        for bound in [5i64, 1747, 1789, 4096] {
            for _ in 0..20 {
                assert_eq!(a.bounded_int(bound).unwrap(), b.bounded_int(bound).unwrap());
            }
        }
    }

    #[test]
    fn test_permutation_is_bijection() {
        let mut source = KeyedRandom::from_secret(b"bijection test").unwrap();
        for n in [1usize, 2, 3, 10, 64, 256] {
            let mut perm = source.permutation(n).unwrap();
            perm.sort_unstable();
            let expected: Vec<usize> = (0..n).collect();
            assert_eq!(perm, expected, "permutation({}) is not a bijection", n);
        }
    }

    #[test]
    fn test_permutation_empty() {
        let mut source = KeyedRandom::from_secret(b"empty perm").unwrap();
        assert!(source.permutation(0).unwrap().is_empty());
    }
}
