//! Authenticated Encryption with Associated Data
//!
//! Three algorithms share one shape: 12-byte nonce, 16-byte tag, key bound to
//! the algorithm through its [`KeyPurpose`].
//!
//! | Algorithm            | Key purpose                        |
//! |----------------------|------------------------------------|
//! | [`Aes128Gcm`]        | [`KeyPurpose::Aes128Gcm`]          |
//! | [`Aes256Gcm`]        | [`KeyPurpose::Aes256Gcm`]          |
//! | [`ChaCha20Poly1305`] | [`KeyPurpose::ChaCha20Poly1305`]   |
//!
//! `open` checks the tag in constant time and never hands back plaintext for
//! a message that fails authentication: the working buffer is wiped before
//! `AuthenticationFailed` is returned, and the error does not say which input
//! was wrong.
//!
//! Nonce uniqueness per key is the caller's obligation. Every call takes the
//! nonce as an argument and nothing caches it; [`generate_nonce`] draws a
//! random one.

use core::fmt;
use core::marker::PhantomData;

use rand::{CryptoRng, RngCore};
use subtle::Choice;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{validate, Error, Result};
use crate::rng::EntropySource;
use crate::types::sealed::Sealed;
use crate::types::{KeyMaterial, KeyPurpose, Nonce, Tag};
use opencrypto_params::utils::symmetric::{GCM_NONCE_SIZE, GCM_TAG_SIZE};

pub mod chacha20poly1305;
pub mod gcm;

pub use chacha20poly1305::ChaCha20Poly1305;
pub use gcm::{Aes128Gcm, Aes256Gcm};

/// Nonce accepted by every AEAD in this crate
pub type AeadNonce = Nonce<GCM_NONCE_SIZE>;

/// Tag produced by every AEAD in this crate
pub type AeadTag = Tag<GCM_TAG_SIZE>;

/// An AEAD construction
///
/// Sealed: implemented by [`Aes128Gcm`], [`Aes256Gcm`] and
/// [`ChaCha20Poly1305`].
pub trait AeadAlgorithm: Sealed {
    /// Key size in bytes
    const KEY_SIZE: usize;
    /// Nonce size in bytes
    const NONCE_SIZE: usize = GCM_NONCE_SIZE;
    /// Tag size in bytes
    const TAG_SIZE: usize = GCM_TAG_SIZE;
    /// Purpose a key must carry
    const PURPOSE: KeyPurpose;
    /// Display name
    const NAME: &'static str;

    /// Encrypt `buffer` in place and return the tag over `aad` and the
    /// ciphertext.
    fn seal_in_place(
        key: &KeyMaterial,
        nonce: &AeadNonce,
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<AeadTag>;

    /// Verify `tag` and decrypt `buffer` in place.
    ///
    /// On `AuthenticationFailed` the buffer has been zeroized.
    fn open_in_place(
        key: &KeyMaterial,
        nonce: &AeadNonce,
        aad: &[u8],
        buffer: &mut [u8],
        tag: &AeadTag,
    ) -> Result<()>;
}

/// Wipe `buffer` unless `valid`, then report the outcome.
///
/// The buffer is masked byte by byte whatever the outcome, so the success
/// and failure paths do the same work.
pub(crate) fn release_or_wipe(
    buffer: &mut [u8],
    valid: Choice,
    algorithm: &'static str,
) -> Result<()> {
    let mask = 0u8.wrapping_sub(valid.unwrap_u8());
    for byte in buffer.iter_mut() {
        *byte &= mask;
    }
    if !bool::from(valid) {
        buffer.zeroize();
    }
    validate::authentication(valid.into(), algorithm)
}

/// Ciphertext and tag produced by a seal operation
#[derive(Clone, PartialEq, Eq)]
pub struct SealedMessage {
    ciphertext: Vec<u8>,
    tag: AeadTag,
}

impl SealedMessage {
    /// Assemble a message received from elsewhere
    pub fn new(ciphertext: Vec<u8>, tag: AeadTag) -> Self {
        Self { ciphertext, tag }
    }

    /// Encrypted bytes, same length as the plaintext
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Authentication tag
    pub fn tag(&self) -> &AeadTag {
        &self.tag
    }

    /// Split into ciphertext and tag
    pub fn into_parts(self) -> (Vec<u8>, AeadTag) {
        (self.ciphertext, self.tag)
    }
}

impl fmt::Debug for SealedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedMessage")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("tag", &self.tag)
            .finish()
    }
}

/// Whether a context encrypts or decrypts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Produces ciphertext and tag
    Seal,
    /// Verifies and recovers plaintext
    Open,
}

/// A single-message AEAD operation
///
/// Borrows the key, is fixed to one direction at construction and is
/// consumed by its one `seal` or `open` call.
pub struct AeadContext<'k, A: AeadAlgorithm> {
    key: &'k KeyMaterial,
    direction: Direction,
    _algorithm: PhantomData<A>,
}

impl<'k, A: AeadAlgorithm> AeadContext<'k, A> {
    fn with_direction(key: &'k KeyMaterial, direction: Direction) -> Result<Self> {
        key.bytes_for(A::PURPOSE)?;
        Ok(Self {
            key,
            direction,
            _algorithm: PhantomData,
        })
    }

    /// Context for encrypting one message.
    ///
    /// Fails with `KeyWrongAlgorithm` if `key` was not made for `A`.
    pub fn for_sealing(key: &'k KeyMaterial) -> Result<Self> {
        Self::with_direction(key, Direction::Seal)
    }

    /// Context for decrypting one message.
    ///
    /// Fails with `KeyWrongAlgorithm` if `key` was not made for `A`.
    pub fn for_opening(key: &'k KeyMaterial) -> Result<Self> {
        Self::with_direction(key, Direction::Open)
    }

    /// Direction fixed at construction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Encrypt `plaintext`; fails with `InvalidState` on an opening context
    pub fn seal(self, nonce: &AeadNonce, plaintext: &[u8], aad: &[u8]) -> Result<SealedMessage> {
        if self.direction != Direction::Seal {
            return Err(Error::state(A::NAME, "seal on a context created for opening"));
        }
        let mut ciphertext = plaintext.to_vec();
        let tag = A::seal_in_place(self.key, nonce, aad, &mut ciphertext)?;
        Ok(SealedMessage { ciphertext, tag })
    }

    /// Verify and decrypt; fails with `InvalidState` on a sealing context
    pub fn open(
        self,
        nonce: &AeadNonce,
        ciphertext: &[u8],
        tag: &AeadTag,
        aad: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        if self.direction != Direction::Open {
            return Err(Error::state(A::NAME, "open on a context created for sealing"));
        }
        let mut plaintext = Zeroizing::new(ciphertext.to_vec());
        A::open_in_place(self.key, nonce, aad, &mut plaintext, tag)?;
        Ok(plaintext)
    }
}

impl<A: AeadAlgorithm> fmt::Debug for AeadContext<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadContext")
            .field("algorithm", &A::NAME)
            .field("direction", &self.direction)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Encrypt `plaintext` under `key` and `nonce`, binding `aad`.
pub fn seal<A: AeadAlgorithm>(
    key: &KeyMaterial,
    nonce: &AeadNonce,
    plaintext: &[u8],
    aad: &[u8],
) -> Result<SealedMessage> {
    AeadContext::<A>::for_sealing(key)?.seal(nonce, plaintext, aad)
}

/// Verify and decrypt a message produced by [`seal`].
///
/// Any change to the ciphertext, tag, nonce or associated data yields
/// `AuthenticationFailed`.
pub fn open<A: AeadAlgorithm>(
    key: &KeyMaterial,
    nonce: &AeadNonce,
    ciphertext: &[u8],
    tag: &AeadTag,
    aad: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    AeadContext::<A>::for_opening(key)?.open(nonce, ciphertext, tag, aad)
}

/// Draw a random nonce from `source`.
///
/// With random 96-bit nonces, keep the number of messages per key well below
/// 2^32.
pub fn generate_nonce<S: EntropySource + ?Sized>(source: &S) -> Result<AeadNonce> {
    let mut bytes = [0u8; GCM_NONCE_SIZE];
    source.fill(&mut bytes)?;
    Ok(Nonce::new(bytes))
}

/// Draw a random nonce from a caller-supplied CSPRNG
pub fn generate_nonce_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<AeadNonce> {
    Nonce::random(rng)
}
