//! Key-owning AEAD ciphers
//!
//! [`AeadCipher`] pairs one [`KeyMaterial`] with one algorithm and encrypts
//! under random nonces drawn from the OS CSPRNG. Random 96-bit nonces are
//! safe for well under 2^32 messages per key; callers expecting more should
//! use [`AeadSession`](crate::AeadSession) instead.
//!
//! ```
//! use opencrypto_algorithms::rng::RandomSource;
//! use opencrypto_algorithms::types::{KeyMaterial, KeyPurpose};
//! use opencrypto_symmetric::{Aead, Aes256GcmCipher, SymmetricCipher};
//!
//! # fn main() -> opencrypto_symmetric::Result<()> {
//! let key = KeyMaterial::from_random(RandomSource::global(), KeyPurpose::Aes256Gcm)?;
//! let cipher = Aes256GcmCipher::new(key)?;
//!
//! let package = cipher.encrypt_to_package(b"Secret message", Some(b"header".as_slice()))?;
//! let decrypted = cipher.decrypt_package(&package, Some(b"header".as_slice()))?;
//! assert_eq!(&decrypted[..], b"Secret message");
//! # Ok(())
//! # }
//! ```

use core::fmt;
use core::marker::PhantomData;

use zeroize::Zeroizing;

use opencrypto_algorithms::aead::{
    self, AeadAlgorithm, AeadNonce, AeadTag, Aes128Gcm, Aes256Gcm, ChaCha20Poly1305,
};
use opencrypto_algorithms::rng::RandomSource;
use opencrypto_algorithms::types::KeyMaterial;
use opencrypto_api::{validate, Result};
use opencrypto_params::utils::symmetric::GCM_TAG_SIZE;

use crate::cipher::{Aead, SymmetricCipher};
use crate::package::CiphertextPackage;

/// An AEAD cipher that owns its key
pub struct AeadCipher<A: AeadAlgorithm> {
    key: KeyMaterial,
    _algorithm: PhantomData<A>,
}

/// AES-128-GCM with an owned key
pub type Aes128GcmCipher = AeadCipher<Aes128Gcm>;

/// AES-256-GCM with an owned key
pub type Aes256GcmCipher = AeadCipher<Aes256Gcm>;

/// ChaCha20-Poly1305 with an owned key
pub type ChaCha20Poly1305Cipher = AeadCipher<ChaCha20Poly1305>;

impl<A: AeadAlgorithm> AeadCipher<A> {
    /// Generates a new instance with a random key
    pub fn generate() -> Result<Self> {
        let key = KeyMaterial::from_random(RandomSource::global(), A::PURPOSE)?;
        Self::new(key)
    }

    /// The key this cipher seals under
    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }
}

impl<A: AeadAlgorithm> SymmetricCipher for AeadCipher<A> {
    fn new(key: KeyMaterial) -> Result<Self> {
        if key.purpose() != A::PURPOSE {
            return Err(opencrypto_api::Error::KeyWrongAlgorithm {
                expected: A::PURPOSE.label(),
                actual: key.purpose().label(),
            });
        }
        Ok(Self {
            key,
            _algorithm: PhantomData,
        })
    }

    fn name() -> &'static str {
        A::NAME
    }
}

impl<A: AeadAlgorithm> Aead for AeadCipher<A> {
    type Nonce = AeadNonce;

    fn encrypt(
        &self,
        nonce: &Self::Nonce,
        plaintext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let sealed = aead::seal::<A>(&self.key, nonce, plaintext, aad.unwrap_or(&[]))?;
        let (mut out, tag) = sealed.into_parts();
        out.extend_from_slice(tag.as_ref());
        Ok(out)
    }

    fn decrypt(
        &self,
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>> {
        validate::min_length("AEAD ciphertext", ciphertext.len(), GCM_TAG_SIZE)?;
        let (body, tag) = ciphertext.split_at(ciphertext.len() - GCM_TAG_SIZE);
        let tag = AeadTag::from_slice(tag)?;
        aead::open::<A>(&self.key, nonce, body, &tag, aad.unwrap_or(&[]))
    }

    fn generate_nonce() -> Result<Self::Nonce> {
        aead::generate_nonce(RandomSource::global())
    }

    fn encrypt_to_package(
        &self,
        plaintext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<CiphertextPackage> {
        let nonce = Self::generate_nonce()?;
        let sealed = aead::seal::<A>(&self.key, &nonce, plaintext, aad.unwrap_or(&[]))?;
        Ok(CiphertextPackage::new::<A>(nonce, sealed))
    }

    fn decrypt_package(
        &self,
        package: &CiphertextPackage,
        aad: Option<&[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>> {
        package.expect_algorithm::<A>()?;
        aead::open::<A>(
            &self.key,
            package.nonce(),
            package.ciphertext(),
            package.tag(),
            aad.unwrap_or(&[]),
        )
    }
}

impl<A: AeadAlgorithm> fmt::Debug for AeadCipher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadCipher")
            .field("algorithm", &A::NAME)
            .field("key", &self.key)
            .finish()
    }
}
