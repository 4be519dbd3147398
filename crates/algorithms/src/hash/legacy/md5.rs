//! MD5 (RFC 1321)

use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroize;

use super::BlockBuffer;
use crate::error::Result;
use crate::hash::{HashAlgorithm, HashFunction, LegacyHash};
use crate::types::sealed::Sealed;
use crate::types::Digest;
use opencrypto_common::security::EphemeralSecret;
use opencrypto_params::utils::hash::{MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};

const MD5_IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

// floor(|sin(i + 1)| * 2^32)
const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

const SHIFTS: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Type-level constants for MD5
pub enum Md5Algorithm {}

impl HashAlgorithm for Md5Algorithm {
    const OUTPUT_SIZE: usize = MD5_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = MD5_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "MD5";
}

/// MD5 hash function state
///
/// Collision-broken. Use only to read or produce legacy formats.
#[derive(Clone, Zeroize)]
pub struct Md5 {
    state: [u32; 4],
    block: BlockBuffer,
}

impl Drop for Md5 {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

fn compress(state: &mut [u32; 4], block: &[u8; 64]) {
    let mut m = EphemeralSecret::new([0u32; 16]);
    for (i, word) in m.iter_mut().enumerate() {
        *word = LittleEndian::read_u32(&block[i * 4..]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let (f, g) = match i / 16 {
            0 => ((b & c) | (!b & d), i),
            1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };
        let rotated = a
            .wrapping_add(f)
            .wrapping_add(T[i])
            .wrapping_add(m[g])
            .rotate_left(SHIFTS[i]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

impl Sealed for Md5 {}

impl HashFunction for Md5 {
    type Algorithm = Md5Algorithm;
    type Output = Digest<MD5_OUTPUT_SIZE>;

    fn new() -> Self {
        Self {
            state: MD5_IV,
            block: BlockBuffer::new(),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        let state = &mut self.state;
        self.block.absorb("MD5", data, |b| compress(state, b))?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let state = &mut self.state;
        self.block.pad(
            "MD5",
            |b| compress(state, b),
            |dst, bits| LittleEndian::write_u64(dst, bits),
        )?;

        let mut out = [0u8; MD5_OUTPUT_SIZE];
        LittleEndian::write_u32_into(&self.state, &mut out);
        self.state.zeroize();
        Ok(Digest::new(out))
    }
}

impl LegacyHash for Md5 {}

impl core::fmt::Debug for Md5 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("MD5 { .. }")
    }
}
