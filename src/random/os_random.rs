//! CSPRNG-backed randomness source.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::ProformaError;
use crate::random::RandomSource;

/// [`RandomSource`](crate::random::RandomSource) backed by the operating
/// system's cryptographically secure generator.
///
/// Every call may block on system entropy. Failures are fatal and
/// non-retryable; they surface as [`ProformaError::Entropy`].
#[derive(Debug, Default)]
pub struct OsRandom;

impl OsRandom {
    /// Creates a new OS-backed source.
    pub fn new() -> Self {
        OsRandom
    }
}

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), ProformaError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|err| ProformaError::Entropy(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_bytes_fills() {
        let mut source = OsRandom::new();
        let mut buf = [0u8; 64];
        source.fill_bytes(&mut buf).unwrap();
        assert!(buf.iter().any(|&b| b != 0), "64 zero bytes from the OS");
    }

    #[test]
    fn test_bounded_int_range() {
        let mut source = OsRandom::new();
        for bound in [1i64, 2, 7, 256, 1789] {
            for _ in 0..20 {
                let val = source.bounded_int(bound).unwrap();
                assert!((0..bound).contains(&val));
            }
        }
    }

    #[test]
    fn test_permutation_is_bijection() {
        let mut source = OsRandom::new();
        let mut perm = source.permutation(256).unwrap();
        perm.sort_unstable();
        let expected: Vec<usize> = (0..256).collect();
        assert_eq!(perm, expected);
    }
}
