//! SHA-1 (FIPS 180-4)

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use super::BlockBuffer;
use crate::error::Result;
use crate::hash::{HashAlgorithm, HashFunction, LegacyHash};
use crate::types::sealed::Sealed;
use crate::types::Digest;
use opencrypto_common::security::EphemeralSecret;
use opencrypto_params::utils::hash::{SHA1_BLOCK_SIZE, SHA1_OUTPUT_SIZE};

const SHA1_IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Type-level constants for SHA-1
pub enum Sha1Algorithm {}

impl HashAlgorithm for Sha1Algorithm {
    const OUTPUT_SIZE: usize = SHA1_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SHA1_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SHA-1";
}

/// SHA-1 hash function state
///
/// Collision-broken. Use only to read or produce legacy formats.
#[derive(Clone, Zeroize)]
pub struct Sha1 {
    state: [u32; 5],
    block: BlockBuffer,
}

impl Drop for Sha1 {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

fn compress(state: &mut [u32; 5], block: &[u8; 64]) {
    let mut w = EphemeralSecret::new([0u32; 80]);
    for i in 0..16 {
        w[i] = BigEndian::read_u32(&block[i * 4..]);
    }
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for i in 0..80 {
        let (f, k) = match i / 20 {
            0 => ((b & c) | (!b & d), 0x5a827999),
            1 => (b ^ c ^ d, 0x6ed9eba1),
            2 => ((b & c) | (b & d) | (c & d), 0x8f1bbcdc),
            _ => (b ^ c ^ d, 0xca62c1d6),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(w[i]);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}

impl Sealed for Sha1 {}

impl HashFunction for Sha1 {
    type Algorithm = Sha1Algorithm;
    type Output = Digest<SHA1_OUTPUT_SIZE>;

    fn new() -> Self {
        Self {
            state: SHA1_IV,
            block: BlockBuffer::new(),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        let state = &mut self.state;
        self.block.absorb("SHA-1", data, |b| compress(state, b))?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let state = &mut self.state;
        self.block.pad(
            "SHA-1",
            |b| compress(state, b),
            |dst, bits| BigEndian::write_u64(dst, bits),
        )?;

        let mut out = [0u8; SHA1_OUTPUT_SIZE];
        BigEndian::write_u32_into(&self.state, &mut out);
        self.state.zeroize();
        Ok(Digest::new(out))
    }
}

impl LegacyHash for Sha1 {}

impl core::fmt::Debug for Sha1 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SHA-1 { .. }")
    }
}
