//! Shared security types for the opencrypto library
//!
//! This crate provides the containers every other crate uses to hold secret
//! bytes: zeroized on release, compared in constant time, and redacted in
//! `Debug` output.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod security;

// Re-export core security types
pub use security::{ConstantTimeBuffer, EphemeralSecret, SecretBuffer};

// Re-export memory safety traits and utilities
pub use security::memory::{barrier, ct_eq_fixed};
