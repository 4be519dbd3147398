//! Stream cipher implementations
//!
//! ChaCha20 supplies the keystream for ChaCha20-Poly1305.
//!
//! # Security Considerations
//!
//! Stream ciphers require unique nonces for each encryption operation with the
//! same key. Reusing a nonce with the same key completely breaks the security
//! of the cipher.

pub(crate) mod chacha20;

pub(crate) use chacha20::ChaCha20;
