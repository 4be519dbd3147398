//! AES block cipher implementations
//!
//! This module implements the Advanced Encryption Standard (AES) block cipher
//! as specified in FIPS 197, encryption direction only.
//!
//! ## Constant-Time Guarantees
//!
//! This implementation mitigates timing side-channel attacks by:
//! - Using branchless arithmetic for GF(2^8) operations
//! - Computing the S-box from the field inverse instead of table lookups
//! - Ensuring consistent memory access patterns

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::BlockCipher;
use crate::error::{validate, Result};
use opencrypto_common::security::{barrier, EphemeralSecret, SecretBuffer};
use opencrypto_params::utils::symmetric::{AES128_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE};

/// Round constants for AES key expansion
const RCON: [u32; 11] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000,
    0x40000000, 0x80000000, 0x1b000000, 0x36000000,
];

/// Multiply two bytes in GF(2⁸) with AES's reduction poly x⁸ + x⁴ + x³ + x + 1
#[inline(always)]
fn gf_mul(a: u8, b: u8) -> u8 {
    let mut p = 0u8;
    let mut a = a;
    let mut b = b;
    for _ in 0..8 {
        // mask = 0xFF if b&1==1 else 0x00
        let mask = (b & 1).wrapping_neg();
        p ^= a & mask;
        let hi = (a >> 7).wrapping_neg();
        a = (a << 1) ^ (hi & 0x1b);
        b >>= 1;
    }
    p
}

/// Raise to the 254th power (b⁻¹ in GF(2⁸)) in constant time; 0 maps to 0
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);
    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    gf_mul(y, x2)
}

/// AES forward S-box: inv(x) ⊕ ROTL(inv(x),1–4) ⊕ 0x63
#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let b = word.to_be_bytes();
    u32::from_be_bytes([sbox(b[0]), sbox(b[1]), sbox(b[2]), sbox(b[3])])
}

/// FIPS 197 key expansion into `out` (4 * (rounds + 1) words, as bytes)
fn expand_key(key: &[u8], out: &mut [u8]) {
    let nk = key.len() / 4;
    let total = out.len() / 4;
    let mut words = EphemeralSecret::new([0u32; 60]);

    for i in 0..nk {
        words[i] = BigEndian::read_u32(&key[i * 4..]);
    }
    for i in nk..total {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        words[i] = words[i - nk] ^ temp;
    }

    BigEndian::write_u32_into(&words[..total], out);
}

#[inline(always)]
fn mul2(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7).wrapping_neg() & 0x1b)
}

fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
    barrier::compiler_fence_seq_cst();
}

fn shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    for c in 0..4 {
        for r in 0..4 {
            state[c * 4 + r] = t[((c + r) % 4) * 4 + r];
        }
    }
}

fn mix_columns(state: &mut [u8; 16]) {
    for column in state.chunks_exact_mut(4) {
        let [s0, s1, s2, s3] = [column[0], column[1], column[2], column[3]];
        column[0] = mul2(s0) ^ mul2(s1) ^ s1 ^ s2 ^ s3;
        column[1] = s0 ^ mul2(s1) ^ mul2(s2) ^ s2 ^ s3;
        column[2] = s0 ^ s1 ^ mul2(s2) ^ mul2(s3) ^ s3;
        column[3] = mul2(s0) ^ s0 ^ s1 ^ s2 ^ mul2(s3);
    }
}

fn add_round_key(state: &mut [u8; 16], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key) {
        *s ^= k;
    }
}

/// Run the full cipher given `rounds + 1` round keys
fn encrypt_with(round_keys: &[u8], block: &mut [u8; 16]) {
    let rounds = round_keys.len() / AES_BLOCK_SIZE - 1;
    let mut state = EphemeralSecret::new(*block);

    add_round_key(&mut state, &round_keys[..16]);
    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, &round_keys[round * 16..(round + 1) * 16]);
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[rounds * 16..]);

    block.copy_from_slice(&state[..]);
}

/// AES-128 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Aes128 {
    round_keys: SecretBuffer<176>, // 11 rounds × 16 bytes
}

/// AES-256 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Aes256 {
    round_keys: SecretBuffer<240>, // 15 rounds × 16 bytes
}

impl BlockCipher for Aes128 {
    fn new(key: &[u8]) -> Result<Self> {
        validate::length("AES-128 key", key.len(), AES128_KEY_SIZE)?;
        let mut round_keys = SecretBuffer::<176>::zeroed();
        expand_key(key, round_keys.as_mut_slice());
        Ok(Self { round_keys })
    }

    fn encrypt_block(&self, block: &mut [u8; 16]) {
        encrypt_with(self.round_keys.as_slice(), block);
    }
}

impl BlockCipher for Aes256 {
    fn new(key: &[u8]) -> Result<Self> {
        validate::length("AES-256 key", key.len(), AES256_KEY_SIZE)?;
        let mut round_keys = SecretBuffer::<240>::zeroed();
        expand_key(key, round_keys.as_mut_slice());
        Ok(Self { round_keys })
    }

    fn encrypt_block(&self, block: &mut [u8; 16]) {
        encrypt_with(self.round_keys.as_slice(), block);
    }
}

#[cfg(test)]
mod tests;
