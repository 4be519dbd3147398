//! Test support for the opencrypto workspace
//!
//! Statistical helpers used by the randomness tests. None of this is a
//! substitute for a full statistical test battery; the checks only catch a
//! source that is broken outright (stuck bits, repeated output, heavy bias).

pub mod randomness;
