//! Type-safe wrappers for cryptographic values
//!
//! Digests, tags and nonces carry their size in the type, and keys carry the
//! purpose they were created for, so a hash output cannot be passed where a
//! key is expected and a GCM key cannot drive HMAC.

pub mod digest;
pub mod key;
pub mod nonce;
pub mod tag;

// Sealed trait module (not public)
pub(crate) mod sealed;

pub use digest::Digest;
pub use key::{ExportedKey, KeyMaterial, KeyPurpose};
pub use nonce::Nonce;
pub use tag::Tag;

pub use opencrypto_common::security::{EphemeralSecret, SecretBuffer};
