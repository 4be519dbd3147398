//! Constant-time comparison and compiler barrier utilities

use subtle::{Choice, ConstantTimeEq};

/// Compare `candidate` against `expected` over the full, public length of
/// `expected`.
///
/// The loop always visits every byte of `expected`, so a short or long
/// candidate costs the same as a full-length one; any length mismatch is
/// folded into the result instead of returning early.
pub fn ct_eq_fixed(expected: &[u8], candidate: &[u8]) -> Choice {
    let mut diff = 0u8;
    for (i, &a) in expected.iter().enumerate() {
        let b = candidate.get(i).copied().unwrap_or(0);
        diff |= a ^ b;
    }
    let len_ok = (expected.len() as u64).ct_eq(&(candidate.len() as u64));
    diff.ct_eq(&0u8) & len_ok
}

/// Compiler barrier
pub mod barrier {
    use core::sync::atomic::{compiler_fence, Ordering};

    /// Insert a compiler fence to prevent reordering
    #[inline(always)]
    pub fn compiler_fence_seq_cst() {
        compiler_fence(Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_eq_fixed() {
        let expected = [0x5au8; 16];
        assert!(bool::from(ct_eq_fixed(&expected, &[0x5a; 16])));

        let mut flipped = expected;
        flipped[15] ^= 0x80;
        assert!(!bool::from(ct_eq_fixed(&expected, &flipped)));

        // Truncated and extended candidates never match, even on a shared prefix
        assert!(!bool::from(ct_eq_fixed(&expected, &expected[..8])));
        let mut long = expected.to_vec();
        long.push(0);
        assert!(!bool::from(ct_eq_fixed(&expected, &long)));
    }
}
