//! Constant values for opencrypto cryptographic operations

pub mod hash;
pub mod mac;
pub mod symmetric;
