//! Constants for message authentication codes and key derivation

use super::hash::{SHA224_OUTPUT_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE, SHA512_OUTPUT_SIZE};

/// HMAC-SHA224 key size in bytes (equal to the digest size)
pub const HMAC_SHA224_KEY_SIZE: usize = SHA224_OUTPUT_SIZE;

/// HMAC-SHA256 key size in bytes (equal to the digest size)
pub const HMAC_SHA256_KEY_SIZE: usize = SHA256_OUTPUT_SIZE;

/// HMAC-SHA384 key size in bytes (equal to the digest size)
pub const HMAC_SHA384_KEY_SIZE: usize = SHA384_OUTPUT_SIZE;

/// HMAC-SHA512 key size in bytes (equal to the digest size)
pub const HMAC_SHA512_KEY_SIZE: usize = SHA512_OUTPUT_SIZE;

/// HKDF-Expand emits at most this many blocks of hash output
pub const HKDF_MAX_BLOCKS: usize = 255;
