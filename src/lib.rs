//! # opencrypto
//!
//! A small, misuse-resistant cryptographic primitives library.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! opencrypto = "0.3"
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `legacy` (default): MD5 and SHA-1, for interoperability only
//! - `symmetric` (default): the high-level [`symmetric`] crate
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`api`]: the shared error type and validation helpers
//! - [`common`]: zeroizing, constant-time secret containers
//! - [`params`]: algorithm constants
//! - [`algorithms`]: digests, HMAC, AEAD, HKDF, OS randomness, typed keys
//! - [`symmetric`]: key-owning ciphers, counter-nonce sessions, ciphertext
//!   packages
//!
//! ## Example
//!
//! ```
//! use opencrypto::prelude::*;
//!
//! # fn main() -> opencrypto::prelude::Result<()> {
//! let key = KeyMaterial::from_random(RandomSource::global(), KeyPurpose::HmacSha256)?;
//! let tag = Hmac::<Sha256>::mac(&key, b"message")?;
//! assert!(Hmac::<Sha256>::verify(&key, b"message", tag.as_ref())?);
//!
//! let key = KeyMaterial::from_random(RandomSource::global(), KeyPurpose::ChaCha20Poly1305)?;
//! let nonce = generate_nonce(RandomSource::global())?;
//! let sealed = seal::<ChaCha20Poly1305>(&key, &nonce, b"plaintext", b"aad")?;
//! let opened = open::<ChaCha20Poly1305>(&key, &nonce, sealed.ciphertext(), sealed.tag(), b"aad")?;
//! assert_eq!(&opened[..], b"plaintext");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use opencrypto_algorithms as algorithms;
pub use opencrypto_api as api;
pub use opencrypto_common as common;
pub use opencrypto_params as params;

// Feature-gated re-exports
#[cfg(feature = "symmetric")]
pub use opencrypto_symmetric as symmetric;

/// Common imports for opencrypto users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, ErrorKind, Result};

    // Digests and MACs
    pub use crate::algorithms::hash::{
        DigestAlgorithm, DigestState, HashFunction, Sha224, Sha256, Sha384, Sha512,
    };
    pub use crate::algorithms::mac::{Hmac, MacAlgorithm, MacState, MacTag};

    // Authenticated encryption
    pub use crate::algorithms::aead::{
        generate_nonce, open, seal, AeadAlgorithm, AeadContext, AeadNonce, AeadTag, Aes128Gcm,
        Aes256Gcm, ChaCha20Poly1305, SealedMessage,
    };

    // Keys, derivation and randomness
    pub use crate::algorithms::kdf::Hkdf;
    pub use crate::algorithms::rng::{EntropySource, RandomSource};
    pub use crate::algorithms::types::{KeyMaterial, KeyPurpose};

    // Re-export security types
    pub use crate::common::{ConstantTimeBuffer, SecretBuffer};

    #[cfg(feature = "symmetric")]
    pub use crate::symmetric::{Aead, AeadCipher, AeadSession, CiphertextPackage, SymmetricCipher};
}
