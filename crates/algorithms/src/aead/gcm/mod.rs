//! Galois/Counter Mode (NIST SP 800-38D) over AES
//!
//! 96-bit nonces only: J0 = nonce || 0^31 || 1, the keystream starts at
//! inc32(J0), and the tag is E(K, J0) xor GHASH.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::{release_or_wipe, AeadAlgorithm, AeadNonce, AeadTag};
use crate::block::{Aes128, Aes256, BlockCipher};
use crate::error::{Error, Result};
use crate::types::sealed::Sealed;
use crate::types::{KeyMaterial, KeyPurpose, Tag};
use opencrypto_common::security::EphemeralSecret;
use opencrypto_params::utils::symmetric::{
    AES128_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE, GCM_MAX_PLAINTEXT_SIZE,
};

mod ghash;

use ghash::GHash;

/// Increment the rightmost 32 bits of a counter block
#[inline]
fn inc32(block: &mut [u8; 16]) {
    let ctr = u32::from_be_bytes([block[12], block[13], block[14], block[15]]).wrapping_add(1);
    block[12..].copy_from_slice(&ctr.to_be_bytes());
}

/// GCM state for one message: the expanded cipher, H and J0
struct Gcm<C: BlockCipher> {
    cipher: C,
    h: EphemeralSecret<[u8; 16]>,
    j0: [u8; 16],
}

impl<C: BlockCipher> Gcm<C> {
    fn new(key: &[u8], nonce: &AeadNonce) -> Result<Self> {
        let cipher = C::new(key)?;

        let mut h = EphemeralSecret::new([0u8; 16]);
        cipher.encrypt_block(&mut h);

        let mut j0 = [0u8; 16];
        j0[..12].copy_from_slice(nonce.as_ref());
        j0[15] = 1;

        Ok(Self { cipher, h, j0 })
    }

    fn check_length(len: usize) -> Result<()> {
        if len as u64 > GCM_MAX_PLAINTEXT_SIZE {
            return Err(Error::param("plaintext", "exceeds the GCM limit of 2^39 - 256 bits"));
        }
        Ok(())
    }

    /// XOR the CTR keystream starting at inc32(J0) into `data`
    fn apply_keystream(&self, data: &mut [u8]) {
        let mut counter = self.j0;
        let mut keystream = EphemeralSecret::new([0u8; AES_BLOCK_SIZE]);
        for chunk in data.chunks_mut(AES_BLOCK_SIZE) {
            inc32(&mut counter);
            *keystream = counter;
            self.cipher.encrypt_block(&mut keystream);
            for (byte, k) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= k;
            }
        }
    }

    fn compute_tag(&self, aad: &[u8], ciphertext: &[u8]) -> [u8; 16] {
        let mut ghash = GHash::new(&self.h);
        ghash.update_padded(aad);
        ghash.update_padded(ciphertext);
        let mut s = ghash.finalize(aad.len(), ciphertext.len());

        let mut mask = self.j0;
        self.cipher.encrypt_block(&mut mask);
        for (t, m) in s.iter_mut().zip(mask.iter()) {
            *t ^= m;
        }
        mask.zeroize();
        s
    }

    fn seal(&self, aad: &[u8], buffer: &mut [u8]) -> Result<AeadTag> {
        Self::check_length(buffer.len())?;
        self.apply_keystream(buffer);
        Ok(Tag::new(self.compute_tag(aad, buffer)))
    }

    fn open(&self, aad: &[u8], buffer: &mut [u8], tag: &AeadTag, name: &'static str) -> Result<()> {
        Self::check_length(buffer.len())?;
        let expected = self.compute_tag(aad, buffer);
        let valid = expected[..].ct_eq(&tag[..]);
        self.apply_keystream(buffer);
        release_or_wipe(buffer, valid, name)
    }
}

macro_rules! gcm_impl {
    ($(#[$doc:meta])* $name:ident, $cipher:ty, $key_size:expr, $purpose:expr, $id:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub enum $name {}

        impl Sealed for $name {}

        impl AeadAlgorithm for $name {
            const KEY_SIZE: usize = $key_size;
            const PURPOSE: KeyPurpose = $purpose;
            const NAME: &'static str = $id;

            fn seal_in_place(
                key: &KeyMaterial,
                nonce: &AeadNonce,
                aad: &[u8],
                buffer: &mut [u8],
            ) -> Result<AeadTag> {
                Gcm::<$cipher>::new(key.bytes_for(Self::PURPOSE)?, nonce)?.seal(aad, buffer)
            }

            fn open_in_place(
                key: &KeyMaterial,
                nonce: &AeadNonce,
                aad: &[u8],
                buffer: &mut [u8],
                tag: &AeadTag,
            ) -> Result<()> {
                Gcm::<$cipher>::new(key.bytes_for(Self::PURPOSE)?, nonce)?
                    .open(aad, buffer, tag, Self::NAME)
            }
        }
    };
}

gcm_impl!(
    /// AES-128 in Galois/Counter Mode
    Aes128Gcm, Aes128, AES128_KEY_SIZE, KeyPurpose::Aes128Gcm, "AES-128-GCM"
);

gcm_impl!(
    /// AES-256 in Galois/Counter Mode
    Aes256Gcm, Aes256, AES256_KEY_SIZE, KeyPurpose::Aes256Gcm, "AES-256-GCM"
);
