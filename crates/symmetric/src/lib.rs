//! Authenticated encryption for the opencrypto library
//!
//! This crate builds the everyday encryption surface on top of the AEAD
//! primitives in `opencrypto-algorithms`:
//!
//! - [`AeadCipher`]: a cipher that owns its key and seals with random nonces
//! - [`AeadSession`]: a sealer that derives every nonce from a per-session
//!   random prefix and a counter, so a nonce can never repeat under its key
//! - [`CiphertextPackage`]: nonce, ciphertext and tag in one value, with a
//!   text form for storage or transport

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod cipher;
pub mod package;
pub mod session;

// Re-export main types for convenience
pub use aead::{AeadCipher, Aes128GcmCipher, Aes256GcmCipher, ChaCha20Poly1305Cipher};
pub use cipher::{Aead, SymmetricCipher};
pub use package::CiphertextPackage;
pub use session::AeadSession;

// Re-export the API error system instead of custom error types
pub use opencrypto_api::{validate, Error, ErrorKind, Result, ResultExt};
