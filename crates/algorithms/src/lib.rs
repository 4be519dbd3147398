//! Cryptographic primitives library with constant-time implementation
//!
//! This crate provides the primitives behind the `opencrypto` facade:
//!
//! - [`hash`]: SHA-224/256/384/512, plus MD5 and SHA-1 behind the `legacy`
//!   feature
//! - [`mac`]: HMAC over the SHA-2 family
//! - [`aead`]: AES-128-GCM, AES-256-GCM and ChaCha20-Poly1305
//! - [`kdf`]: HKDF
//! - [`rng`]: the OS-backed [`RandomSource`]
//! - [`types`]: purpose-tagged [`KeyMaterial`] and fixed-size value types
//!
//! # Security Features
//!
//! - Secret state is zeroized on finalize and on drop
//! - Tags are compared in constant time, and only through `verify`/`open`
//! - Keys carry their purpose and are checked at every use
//! - Nothing is logged; errors carry static context only

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, ErrorKind, Result, ResultExt};

// Internal primitives used by the AEAD constructions
pub(crate) mod block;
pub(crate) mod stream;

// Hash function implementations
pub mod hash;
pub use hash::{
    DigestAlgorithm, DigestState, HashFunction, LegacyHash, SecureHash, Sha224, Sha256, Sha384,
    Sha512,
};
#[cfg(feature = "legacy")]
pub use hash::{LegacyDigestAlgorithm, Md5, Sha1};

// MAC implementations
pub mod mac;
pub use mac::{Hmac, MacAlgorithm, MacState, MacTag};

// AEAD cipher implementations
pub mod aead;
pub use aead::{
    AeadAlgorithm, AeadContext, AeadNonce, AeadTag, Aes128Gcm, Aes256Gcm, ChaCha20Poly1305,
    Direction, SealedMessage,
};

// KDF implementations
pub mod kdf;
pub use kdf::Hkdf;

// Randomness
pub mod rng;
pub use rng::{EntropySource, RandomSource};

// Type system
pub mod types;
pub use types::{Digest, ExportedKey, KeyMaterial, KeyPurpose, Nonce, Tag};

// Re-export security types from opencrypto-common
pub use opencrypto_common::security::{barrier, ConstantTimeBuffer, EphemeralSecret, SecretBuffer};
