//! ChaCha20-Poly1305 authenticated encryption
//!
//! This module implements the ChaCha20-Poly1305 AEAD algorithm as specified in
//! RFC 8439.
//!
//! ## Constant-Time Guarantees
//!
//! * No variable-length early-returns after authentication is checked.
//! * Authentication is decided with a branch-free constant-time mask; the same
//!   byte-wise loop executes whatever the tag's validity.

use subtle::ConstantTimeEq;

use super::{release_or_wipe, AeadAlgorithm, AeadNonce, AeadTag};
use crate::error::{Error, Result};
use crate::mac::poly1305::Poly1305;
use crate::stream::ChaCha20;
use crate::types::sealed::Sealed;
use crate::types::{KeyMaterial, KeyPurpose, Tag};
use opencrypto_common::security::SecretBuffer;
use opencrypto_params::utils::symmetric::{
    CHACHA20_BLOCK_SIZE, CHACHA20_KEY_SIZE, POLY1305_KEY_SIZE,
};

/// Largest message the 32-bit block counter can cover, starting at block 1
const MAX_MESSAGE_SIZE: u64 = (u32::MAX as u64) * CHACHA20_BLOCK_SIZE as u64;

/// ChaCha20-Poly1305 AEAD (RFC 8439)
#[derive(Debug, Clone, Copy)]
pub enum ChaCha20Poly1305 {}

impl Sealed for ChaCha20Poly1305 {}

impl ChaCha20Poly1305 {
    fn key_array(key: &KeyMaterial) -> Result<&[u8; CHACHA20_KEY_SIZE]> {
        let bytes = key.bytes_for(KeyPurpose::ChaCha20Poly1305)?;
        bytes.try_into().map_err(|_| Error::InvalidLength {
            context: "ChaCha20-Poly1305 key",
            expected: CHACHA20_KEY_SIZE,
            actual: bytes.len(),
        })
    }

    fn check_length(len: usize) -> Result<()> {
        if len as u64 > MAX_MESSAGE_SIZE {
            return Err(Error::param("plaintext", "exceeds the ChaCha20 block counter range"));
        }
        Ok(())
    }

    /// Derive the one-time Poly1305 key (RFC 8439 §2.6)
    fn poly1305_key(key: &[u8; CHACHA20_KEY_SIZE], nonce: &AeadNonce) -> SecretBuffer<POLY1305_KEY_SIZE> {
        let mut poly_key = SecretBuffer::<POLY1305_KEY_SIZE>::zeroed();
        ChaCha20::with_counter(key, nonce, 0).keystream(poly_key.as_mut_slice());
        poly_key
    }

    /// RFC 8439 §2.8: Poly1305 over padded AAD, padded ciphertext and lengths
    fn calculate_tag(
        poly_key: &SecretBuffer<POLY1305_KEY_SIZE>,
        aad: &[u8],
        ciphertext: &[u8],
    ) -> [u8; 16] {
        let mut key = [0u8; POLY1305_KEY_SIZE];
        key.copy_from_slice(poly_key.as_slice());
        let mut poly = Poly1305::new(&key);
        zeroize::Zeroize::zeroize(&mut key);

        poly.update(aad);
        poly.pad_to_block();
        poly.update(ciphertext);
        poly.pad_to_block();

        let mut len_block = [0u8; 16];
        len_block[..8].copy_from_slice(&(aad.len() as u64).to_le_bytes());
        len_block[8..].copy_from_slice(&(ciphertext.len() as u64).to_le_bytes());
        poly.update(&len_block);

        poly.finalize()
    }
}

impl AeadAlgorithm for ChaCha20Poly1305 {
    const KEY_SIZE: usize = CHACHA20_KEY_SIZE;
    const PURPOSE: KeyPurpose = KeyPurpose::ChaCha20Poly1305;
    const NAME: &'static str = "ChaCha20-Poly1305";

    fn seal_in_place(
        key: &KeyMaterial,
        nonce: &AeadNonce,
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<AeadTag> {
        let key = Self::key_array(key)?;
        Self::check_length(buffer.len())?;

        let poly_key = Self::poly1305_key(key, nonce);
        ChaCha20::with_counter(key, nonce, 1).process(buffer);
        Ok(Tag::new(Self::calculate_tag(&poly_key, aad, buffer)))
    }

    fn open_in_place(
        key: &KeyMaterial,
        nonce: &AeadNonce,
        aad: &[u8],
        buffer: &mut [u8],
        tag: &AeadTag,
    ) -> Result<()> {
        let key = Self::key_array(key)?;
        Self::check_length(buffer.len())?;

        let poly_key = Self::poly1305_key(key, nonce);
        let expected = Self::calculate_tag(&poly_key, aad, buffer);
        let valid = expected[..].ct_eq(&tag[..]);

        ChaCha20::with_counter(key, nonce, 1).process(buffer);
        release_or_wipe(buffer, valid, Self::NAME)
    }
}
