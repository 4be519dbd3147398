//! Constant values for opencrypto cryptographic operations
//!
//! Sizes here are public information. Every other crate in the workspace
//! takes its key, nonce, tag and digest lengths from this crate so the
//! numbers are spelled out exactly once.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod utils;
