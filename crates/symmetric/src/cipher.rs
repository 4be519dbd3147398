//! Symmetric cipher traits for opencrypto-symmetric
//!
//! This module defines the core traits used by all symmetric
//! encryption algorithms in the library.

use opencrypto_algorithms::types::KeyMaterial;
use zeroize::Zeroizing;

use crate::package::CiphertextPackage;
use opencrypto_api::Result;

/// Common trait for all symmetric encryption algorithms
pub trait SymmetricCipher {
    /// Creates a new cipher instance that owns `key`.
    ///
    /// Fails with `KeyWrongAlgorithm` if the key was made for another
    /// algorithm.
    fn new(key: KeyMaterial) -> Result<Self>
    where
        Self: Sized;

    /// Returns the name of this cipher
    fn name() -> &'static str;
}

/// Trait for Authenticated Encryption with Associated Data
pub trait Aead: SymmetricCipher {
    /// The nonce/IV type used by this cipher
    type Nonce;

    /// Encrypts plaintext with associated data, returning `ciphertext || tag`
    fn encrypt(&self, nonce: &Self::Nonce, plaintext: &[u8], aad: Option<&[u8]>)
        -> Result<Vec<u8>>;

    /// Decrypts `ciphertext || tag` with associated data.
    ///
    /// Returns `AuthenticationFailed` if any input was altered.
    fn decrypt(
        &self,
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>>;

    /// Generates a random nonce from the OS CSPRNG
    fn generate_nonce() -> Result<Self::Nonce>;

    /// Encrypts under a fresh random nonce and bundles the result
    fn encrypt_to_package(&self, plaintext: &[u8], aad: Option<&[u8]>)
        -> Result<CiphertextPackage>;

    /// Decrypts a package produced by [`Aead::encrypt_to_package`]
    fn decrypt_package(
        &self,
        package: &CiphertextPackage,
        aad: Option<&[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>>;
}
