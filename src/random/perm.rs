//! Fisher-Yates permutation engine.
//!
//! Both the rotor size selection and the byte permutation tables are built
//! through this single routine, so the number and order of bounded draws
//! is identical everywhere a permutation is needed.

use crate::error::ProformaError;
use crate::random::RandomSource;

/// Produces a permutation of `[0, n)` using the insertion variant of
/// Fisher-Yates: the permutation is grown by inserting each new value at a
/// random position instead of swapping a pre-filled array.
///
/// Uses exactly `n - 1` calls to `bounded_int`, with strictly increasing
/// bounds `2..=n`. With a deterministic source the output is therefore
/// reproducible draw for draw.
///
/// # Parameters
/// - `source`: The randomness source supplying the bounded draws.
/// - `n`: Length of the permutation. `0` yields an empty vector.
pub(crate) fn fisher_yates<R: RandomSource + ?Sized>(
    source: &mut R,
    n: usize,
) -> Result<Vec<usize>, ProformaError> {
    let mut res = vec![0usize; n];
    for i in 1..n {
        let j = source.bounded_int((i + 1) as i64)? as usize;
        res[i] = res[j];
        res[j] = i;
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed script of draw results, ignoring the bound.
    struct ScriptedSource {
        draws: Vec<i64>,
        next: usize,
    }

    impl RandomSource for ScriptedSource {
        fn fill_bytes(&mut self, _buf: &mut [u8]) -> Result<(), ProformaError> {
            unreachable!("fisher_yates draws through bounded_int only")
        }

        fn bounded_int(&mut self, _n: i64) -> Result<i64, ProformaError> {
            let val = self.draws[self.next];
            self.next += 1;
            Ok(val)
        }
    }

    #[test]
    fn test_insertion_variant_known_vector() {
        // i=1, j=1 -> [0,1,_,_]; i=2, j=0 -> [2,1,0,_]; i=3, j=2 -> [2,1,3,0]
        let mut source = ScriptedSource {
            draws: vec![1, 0, 2],
            next: 0,
        };
        let perm = fisher_yates(&mut source, 4).unwrap();
        assert_eq!(perm, vec![2, 1, 3, 0]);
        assert_eq!(source.next, 3, "expected exactly n - 1 draws");
    }

    #[test]
    fn test_identity_draws_reverse_shift() {
        // Always inserting at position 0 pushes earlier values rightward.
        let mut source = ScriptedSource {
            draws: vec![0, 0, 0, 0],
            next: 0,
        };
        let perm = fisher_yates(&mut source, 5).unwrap();
        assert_eq!(perm, vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_and_singleton_need_no_draws() {
        let mut source = ScriptedSource {
            draws: vec![],
            next: 0,
        };
        assert!(fisher_yates(&mut source, 0).unwrap().is_empty());
        assert_eq!(fisher_yates(&mut source, 1).unwrap(), vec![0]);
        assert_eq!(source.next, 0);
    }
}
