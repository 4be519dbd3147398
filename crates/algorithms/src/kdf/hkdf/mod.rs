//! HMAC-based Key Derivation Function (HKDF)
//!
//! This module implements HKDF as defined in RFC 5869.
//! HKDF is designed to take input keying material (IKM) that is not necessarily
//! uniform and produce output keying material (OKM) suitable for use in cryptographic
//! contexts.
//!
//! Only the SHA-2 family can instantiate [`Hkdf`]; the bound on
//! [`SecureHash`] keeps the legacy digests out of key derivation.

use core::marker::PhantomData;

use zeroize::Zeroizing;

use crate::error::{validate, Error, Result};
use crate::hash::SecureHash;
use crate::mac::hmac::Hmac;
use crate::types::{KeyMaterial, KeyPurpose};
use opencrypto_params::utils::mac::HKDF_MAX_BLOCKS;

/// HKDF over a SHA-2 digest
///
/// Stateless: every operation is an associated function.
///
/// ```
/// use opencrypto_algorithms::hash::Sha256;
/// use opencrypto_algorithms::kdf::Hkdf;
///
/// let okm = Hkdf::<Sha256>::derive(Some(&b"salt"[..]), b"ikm", Some(&b"context"[..]), 42).unwrap();
/// assert_eq!(okm.len(), 42);
/// ```
///
/// SHA-1 and MD5 are rejected at compile time:
///
/// ```compile_fail
/// use opencrypto_algorithms::hash::Sha1;
/// use opencrypto_algorithms::kdf::Hkdf;
///
/// let _ = Hkdf::<Sha1>::derive(None, b"ikm", None, 32);
/// ```
pub struct Hkdf<H: SecureHash> {
    _hash: PhantomData<H>,
}

impl<H: SecureHash> Hkdf<H> {
    /// Largest output `expand` accepts, 255 times the digest size
    pub fn max_output_size() -> usize {
        HKDF_MAX_BLOCKS * H::output_size()
    }

    /// HKDF-Extract: PRK = HMAC-Hash(salt, IKM)
    ///
    /// A missing salt is replaced by a string of zero bytes as long as the
    /// digest.
    pub fn extract(salt: Option<&[u8]>, ikm: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let zero_salt = Zeroizing::new(vec![0u8; H::output_size()]);
        let salt = salt.unwrap_or(&zero_salt[..]);

        let prk = Hmac::<H>::mac_raw(salt, &[ikm])?;
        Ok(Zeroizing::new(prk.to_vec()))
    }

    /// HKDF-Expand: OKM = T(1) || T(2) || ... truncated to `length` bytes
    pub fn expand(prk: &[u8], info: Option<&[u8]>, length: usize) -> Result<Zeroizing<Vec<u8>>> {
        let hash_len = H::output_size();

        if length > Self::max_output_size() {
            return Err(Error::param("length", "exceeds 255 times the digest size"));
        }
        validate::min_length("HKDF pseudorandom key", prk.len(), hash_len)?;

        let info = info.unwrap_or(&[]);
        let mut okm = Zeroizing::new(Vec::with_capacity(length));
        let mut previous: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::new());
        let mut counter = 1u8;

        while okm.len() < length {
            let parts: [&[u8]; 3] = [&previous[..], info, &[counter]];
            let block = Hmac::<H>::mac_raw(prk, &parts)?;
            let take = core::cmp::min(hash_len, length - okm.len());
            okm.extend_from_slice(&block.as_ref()[..take]);

            previous.clear();
            previous.extend_from_slice(block.as_ref());
            // never wraps: length <= 255 * hash_len
            counter = counter.wrapping_add(1);
        }

        Ok(okm)
    }

    /// Extract then expand
    pub fn derive(
        salt: Option<&[u8]>,
        ikm: &[u8],
        info: Option<&[u8]>,
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let prk = Self::extract(salt, ikm)?;
        Self::expand(&prk, info, length)
    }

    /// Derive a key sized and tagged for `purpose`
    pub fn derive_key(
        salt: Option<&[u8]>,
        ikm: &[u8],
        info: &[u8],
        purpose: KeyPurpose,
    ) -> Result<KeyMaterial> {
        let okm = Self::derive(salt, ikm, Some(info), purpose.key_size())?;
        KeyMaterial::from_bytes(&okm, purpose)
    }
}

impl<H: SecureHash> core::fmt::Debug for Hkdf<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Hkdf<{}>", H::name())
    }
}

#[cfg(test)]
mod tests;
