//! GHASH universal hash over GF(2^128) (NIST SP 800-38D section 6.4)
//!
//! Multiplication is a fixed 128-iteration shift-and-add with mask
//! selection, so timing does not depend on H or the data.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Reduction polynomial x^128 + x^7 + x^2 + x + 1 in GCM's reflected order
const R: u128 = 0xe1 << 120;

#[inline]
fn gf_mul(x: u128, y: u128) -> u128 {
    let mut z = 0u128;
    let mut v = y;
    for i in 0..128 {
        let bit = (x >> (127 - i)) & 1;
        z ^= v & 0u128.wrapping_sub(bit);
        let lsb = v & 1;
        v = (v >> 1) ^ (R & 0u128.wrapping_sub(lsb));
    }
    z
}

#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct GHash {
    h: u128,
    acc: u128,
}

impl GHash {
    pub(crate) fn new(h: &[u8; 16]) -> Self {
        Self {
            h: u128::from_be_bytes(*h),
            acc: 0,
        }
    }

    /// Absorb `data`, zero-padding the final partial block
    pub(crate) fn update_padded(&mut self, data: &[u8]) {
        for chunk in data.chunks(16) {
            let mut block = [0u8; 16];
            block[..chunk.len()].copy_from_slice(chunk);
            self.acc = gf_mul(self.acc ^ u128::from_be_bytes(block), self.h);
        }
    }

    /// Absorb the length block and return the hash
    pub(crate) fn finalize(mut self, aad_len: usize, ct_len: usize) -> [u8; 16] {
        let lengths = ((aad_len as u128 * 8) << 64) | (ct_len as u128 * 8);
        self.acc = gf_mul(self.acc ^ lengths, self.h);
        self.acc.to_be_bytes()
    }
}
