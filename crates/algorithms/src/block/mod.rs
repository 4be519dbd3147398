//! Block cipher primitives
//!
//! Only the forward direction is implemented: every mode built on top
//! (GCM's CTR keystream and GHASH key) encrypts counter blocks.

use zeroize::Zeroize;

use crate::error::Result;

pub(crate) mod aes;

pub(crate) use aes::{Aes128, Aes256};

/// Keyed block cipher, forward direction only
pub(crate) trait BlockCipher: Zeroize + Sized {
    /// Expand `key`; fails with `InvalidLength` on a wrong-size key
    fn new(key: &[u8]) -> Result<Self>;

    /// Encrypt one 16-byte block in place
    fn encrypt_block(&self, block: &mut [u8; 16]);
}
