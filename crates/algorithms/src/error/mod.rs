//! Error handling for cryptographic primitives
//!
//! The primitives share the workspace-wide error type from `opencrypto-api`,
//! so a failure in SHA-256 and a failure in AES-GCM can be matched the same
//! way by callers of the higher-level crates.

pub use opencrypto_api::{validate, Error, ErrorKind, Result, ResultExt};

/// Map a `getrandom` failure onto [`Error::EntropyUnavailable`]
pub(crate) fn entropy_error(context: &'static str, err: getrandom::Error) -> Error {
    Error::EntropyUnavailable {
        context,
        code: Some(err.code().get()),
    }
}

/// Map a `rand` failure onto [`Error::EntropyUnavailable`]
pub(crate) fn rng_error(context: &'static str, err: rand::Error) -> Error {
    Error::EntropyUnavailable {
        context,
        code: err.code().map(|c| c.get()),
    }
}
