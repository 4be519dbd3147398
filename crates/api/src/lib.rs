//! Public error surface for the opencrypto library
//!
//! Every crate in the workspace returns [`Error`] through the [`Result`]
//! alias defined here. Errors carry static context only, so they can be
//! logged by callers without leaking key material, plaintext or tags.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;

// Re-export commonly used items at the crate level for convenience
pub use error::{validate, Error, ErrorKind, Result, ResultExt};
