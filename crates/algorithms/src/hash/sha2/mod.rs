//! SHA-2 hash function implementations with enhanced memory safety
//!
//! This module implements SHA-224, SHA-256, SHA-384 and SHA-512 as specified
//! in FIPS PUB 180-4. Message schedules and working variables live in
//! zeroizing wrappers, and the running state is wiped at finalization.

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::hash::{HashAlgorithm, HashFunction, SecureHash};
use crate::types::sealed::Sealed;
use crate::types::{Digest, KeyPurpose};
use opencrypto_common::security::{barrier, EphemeralSecret};

use opencrypto_params::utils::hash::{
    SHA224_OUTPUT_SIZE, SHA256_BLOCK_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE,
    SHA512_BLOCK_SIZE, SHA512_OUTPUT_SIZE,
};

// SHA-256 round constants
const K256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

// SHA-512 round constants
const K512: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

const SHA224_IV: [u32; 8] = [
    0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const SHA384_IV: [u64; 8] = [
    0xcbbb9d5dc1059ed8, 0x629a292a367cd507, 0x9159015a3070dd17, 0x152fecd8f70e5939,
    0x67332667ffc00b31, 0x8eb44a8768581511, 0xdb0c2e0d64f98fa7, 0x47b5481dbefa4fa4,
];

const SHA512_IV: [u64; 8] = [
    0x6a09e667f3bcc908, 0xbb67ae8584caa73b, 0x3c6ef372fe94f82b, 0xa54ff53a5f1d36f1,
    0x510e527fade682d1, 0x9b05688c2b3e6c1f, 0x1f83d9abfb41bd6b, 0x5be0cd19137e2179,
];

/// Running state shared by SHA-224 and SHA-256
#[derive(Clone, Zeroize)]
struct Engine256 {
    state: [u32; 8],
    buffer: [u8; SHA256_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
    #[zeroize(skip)]
    finalized: bool,
}

impl Drop for Engine256 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Engine256 {
    fn new(iv: [u32; 8]) -> Self {
        Self {
            state: iv,
            buffer: [0u8; SHA256_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
            finalized: false,
        }
    }

    fn compress(state: &mut [u32; 8], block: &[u8]) {
        // Use EphemeralSecret for message schedule
        let mut w = EphemeralSecret::new([0u32; 64]);

        barrier::compiler_fence_seq_cst();

        for i in 0..16 {
            w[i] = BigEndian::read_u32(&block[i * 4..]);
        }

        for i in 16..64 {
            let s0 = w[i - 15].rotate_right(7) ^ w[i - 15].rotate_right(18) ^ (w[i - 15] >> 3);
            let s1 = w[i - 2].rotate_right(17) ^ w[i - 2].rotate_right(19) ^ (w[i - 2] >> 10);
            w[i] = w[i - 16]
                .wrapping_add(s0)
                .wrapping_add(w[i - 7])
                .wrapping_add(s1);
        }

        let mut v = EphemeralSecret::new(*state);

        for i in 0..64 {
            let s1 = v[4].rotate_right(6) ^ v[4].rotate_right(11) ^ v[4].rotate_right(25);
            let ch = (v[4] & v[5]) ^ ((!v[4]) & v[6]);
            let temp1 = v[7]
                .wrapping_add(s1)
                .wrapping_add(ch)
                .wrapping_add(K256[i])
                .wrapping_add(w[i]);
            let s0 = v[0].rotate_right(2) ^ v[0].rotate_right(13) ^ v[0].rotate_right(22);
            let maj = (v[0] & v[1]) ^ (v[0] & v[2]) ^ (v[1] & v[2]);
            let temp2 = s0.wrapping_add(maj);

            v[7] = v[6];
            v[6] = v[5];
            v[5] = v[4];
            v[4] = v[3].wrapping_add(temp1);
            v[3] = v[2];
            v[2] = v[1];
            v[1] = v[0];
            v[0] = temp1.wrapping_add(temp2);
        }

        for (s, x) in state.iter_mut().zip(v.iter()) {
            *s = s.wrapping_add(*x);
        }

        barrier::compiler_fence_seq_cst();
    }

    fn update(&mut self, context: &'static str, mut input: &[u8]) -> Result<()> {
        validate::not_finalized(self.finalized, context, "update after finalize")?;

        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SHA256_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SHA256_BLOCK_SIZE {
                Self::compress(&mut self.state, &self.buffer);
                self.total_bytes = self.total_bytes.wrapping_add(SHA256_BLOCK_SIZE as u64);
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    /// Pad, compress the final block(s) and write the first `out.len()`
    /// bytes of the state.
    fn finalize_into(&mut self, context: &'static str, out: &mut [u8]) -> Result<()> {
        validate::not_finalized(self.finalized, context, "finalize called twice")?;

        self.total_bytes = self.total_bytes.wrapping_add(self.buffer_idx as u64);
        let bit_len = self.total_bytes.wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        for b in &mut self.buffer[self.buffer_idx + 1..] {
            *b = 0;
        }
        if self.buffer_idx >= SHA256_BLOCK_SIZE - 8 {
            Self::compress(&mut self.state, &self.buffer);
            self.buffer = [0u8; SHA256_BLOCK_SIZE];
        }

        BigEndian::write_u64(&mut self.buffer[SHA256_BLOCK_SIZE - 8..], bit_len);
        Self::compress(&mut self.state, &self.buffer);

        for (chunk, word) in out.chunks_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes()[..chunk.len()]);
        }

        self.zeroize();
        self.finalized = true;
        Ok(())
    }
}

/// Running state shared by SHA-384 and SHA-512
#[derive(Clone, Zeroize)]
struct Engine512 {
    state: [u64; 8],
    buffer: [u8; SHA512_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u128,
    #[zeroize(skip)]
    finalized: bool,
}

impl Drop for Engine512 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Engine512 {
    fn new(iv: [u64; 8]) -> Self {
        Self {
            state: iv,
            buffer: [0u8; SHA512_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
            finalized: false,
        }
    }

    fn compress(state: &mut [u64; 8], block: &[u8]) {
        // Use EphemeralSecret for message schedule
        let mut w = EphemeralSecret::new([0u64; 80]);

        barrier::compiler_fence_seq_cst();

        for i in 0..16 {
            w[i] = BigEndian::read_u64(&block[i * 8..]);
        }

        for i in 16..80 {
            let s0 = w[i - 15].rotate_right(1) ^ w[i - 15].rotate_right(8) ^ (w[i - 15] >> 7);
            let s1 = w[i - 2].rotate_right(19) ^ w[i - 2].rotate_right(61) ^ (w[i - 2] >> 6);
            w[i] = w[i - 16]
                .wrapping_add(s0)
                .wrapping_add(w[i - 7])
                .wrapping_add(s1);
        }

        let mut v = EphemeralSecret::new(*state);

        for i in 0..80 {
            let s1 = v[4].rotate_right(14) ^ v[4].rotate_right(18) ^ v[4].rotate_right(41);
            let ch = (v[4] & v[5]) ^ ((!v[4]) & v[6]);
            let temp1 = v[7]
                .wrapping_add(s1)
                .wrapping_add(ch)
                .wrapping_add(K512[i])
                .wrapping_add(w[i]);
            let s0 = v[0].rotate_right(28) ^ v[0].rotate_right(34) ^ v[0].rotate_right(39);
            let maj = (v[0] & v[1]) ^ (v[0] & v[2]) ^ (v[1] & v[2]);
            let temp2 = s0.wrapping_add(maj);

            v[7] = v[6];
            v[6] = v[5];
            v[5] = v[4];
            v[4] = v[3].wrapping_add(temp1);
            v[3] = v[2];
            v[2] = v[1];
            v[1] = v[0];
            v[0] = temp1.wrapping_add(temp2);
        }

        for (s, x) in state.iter_mut().zip(v.iter()) {
            *s = s.wrapping_add(*x);
        }

        barrier::compiler_fence_seq_cst();
    }

    fn update(&mut self, context: &'static str, mut input: &[u8]) -> Result<()> {
        validate::not_finalized(self.finalized, context, "update after finalize")?;

        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SHA512_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SHA512_BLOCK_SIZE {
                Self::compress(&mut self.state, &self.buffer);
                self.total_bytes = self.total_bytes.wrapping_add(SHA512_BLOCK_SIZE as u128);
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    fn finalize_into(&mut self, context: &'static str, out: &mut [u8]) -> Result<()> {
        validate::not_finalized(self.finalized, context, "finalize called twice")?;

        self.total_bytes = self.total_bytes.wrapping_add(self.buffer_idx as u128);
        let bit_len = self.total_bytes.wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        for b in &mut self.buffer[self.buffer_idx + 1..] {
            *b = 0;
        }
        if self.buffer_idx >= SHA512_BLOCK_SIZE - 16 {
            Self::compress(&mut self.state, &self.buffer);
            self.buffer = [0u8; SHA512_BLOCK_SIZE];
        }

        BigEndian::write_u128(&mut self.buffer[SHA512_BLOCK_SIZE - 16..], bit_len);
        Self::compress(&mut self.state, &self.buffer);

        for (chunk, word) in out.chunks_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes()[..chunk.len()]);
        }

        self.zeroize();
        self.finalized = true;
        Ok(())
    }
}

macro_rules! sha2_impl {
    (
        $(#[$doc:meta])*
        $name:ident, $marker:ident, $engine:ident, $iv:ident,
        $out:ident, $block:ident, $id:literal, $purpose:expr
    ) => {
        /// Type-level constants for
        #[doc = $id]
        pub enum $marker {}

        impl HashAlgorithm for $marker {
            const OUTPUT_SIZE: usize = $out;
            const BLOCK_SIZE: usize = $block;
            const ALGORITHM_ID: &'static str = $id;
        }

        $(#[$doc])*
        #[derive(Clone, Zeroize)]
        pub struct $name {
            engine: $engine,
        }

        impl Sealed for $name {}

        impl HashFunction for $name {
            type Algorithm = $marker;
            type Output = Digest<$out>;

            fn new() -> Self {
                Self {
                    engine: $engine::new($iv),
                }
            }

            fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
                self.engine.update($id, data)?;
                Ok(self)
            }

            fn finalize(&mut self) -> Result<Self::Output> {
                let mut out = [0u8; $out];
                self.engine.finalize_into($id, &mut out)?;
                Ok(Digest::new(out))
            }
        }

        impl SecureHash for $name {
            const MAC_PURPOSE: KeyPurpose = $purpose;
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(concat!($id, " { .. }"))
            }
        }
    };
}

sha2_impl!(
    /// SHA-224 hash function state
    Sha224, Sha224Algorithm, Engine256, SHA224_IV,
    SHA224_OUTPUT_SIZE, SHA256_BLOCK_SIZE, "SHA-224", KeyPurpose::HmacSha224
);

sha2_impl!(
    /// SHA-256 hash function state
    Sha256, Sha256Algorithm, Engine256, SHA256_IV,
    SHA256_OUTPUT_SIZE, SHA256_BLOCK_SIZE, "SHA-256", KeyPurpose::HmacSha256
);

sha2_impl!(
    /// SHA-384 hash function state
    Sha384, Sha384Algorithm, Engine512, SHA384_IV,
    SHA384_OUTPUT_SIZE, SHA512_BLOCK_SIZE, "SHA-384", KeyPurpose::HmacSha384
);

sha2_impl!(
    /// SHA-512 hash function state
    Sha512, Sha512Algorithm, Engine512, SHA512_IV,
    SHA512_OUTPUT_SIZE, SHA512_BLOCK_SIZE, "SHA-512", KeyPurpose::HmacSha512
);
