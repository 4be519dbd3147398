//! Key derivation functions
//!
//! HKDF (RFC 5869) turns a shared secret handed over by a key exchange into
//! purpose-bound [`KeyMaterial`](crate::types::KeyMaterial). Password hashing
//! is out of scope for this crate.

pub mod hkdf;

pub use hkdf::Hkdf;
