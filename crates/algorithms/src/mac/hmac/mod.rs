//! HMAC (Hash-based Message Authentication Code) – constant-time & allocation-free
//!
//! • RFC 2104 / FIPS 198-1 compliant
//! • Keyed only by [`KeyMaterial`] whose purpose matches the digest
//! • Inner and outer pads are absorbed once at construction; the padded key
//!   never outlives `new`

use zeroize::Zeroize;

use super::MacTag;
use crate::error::{validate, Result};
use crate::hash::SecureHash;
use crate::types::KeyMaterial;
use opencrypto_common::security::{ct_eq_fixed, SecretBuffer};

const MAX_BLOCK: usize = 128; // SHA-384/512 block size (largest among SHA-2)

/// Constant-time HMAC over a SHA-2 digest.
///
/// Holds two hash states: the inner one has absorbed `K' ^ ipad`, the outer
/// one `K' ^ opad`.
///
/// # Example
///
/// ```
/// use opencrypto_algorithms::hash::Sha256;
/// use opencrypto_algorithms::mac::Hmac;
/// use opencrypto_algorithms::types::{KeyMaterial, KeyPurpose};
///
/// let key = KeyMaterial::from_bytes(&[0x0b; 32], KeyPurpose::HmacSha256).unwrap();
/// let tag = Hmac::<Sha256>::mac(&key, b"message").unwrap();
/// assert_eq!(tag.len(), 32);
/// assert!(Hmac::<Sha256>::verify(&key, b"message", &tag.to_vec()).unwrap());
/// ```
///
/// The legacy digests cannot key an HMAC:
///
/// ```compile_fail
/// use opencrypto_algorithms::hash::Md5;
/// use opencrypto_algorithms::mac::Hmac;
/// use opencrypto_algorithms::types::{KeyMaterial, KeyPurpose};
///
/// let key = KeyMaterial::from_bytes(&[0x0b; 32], KeyPurpose::HmacSha256).unwrap();
/// let _ = Hmac::<Md5>::new(&key);
/// ```
#[derive(Clone)]
pub struct Hmac<H: SecureHash> {
    inner: H,
    outer: H,
    is_finalized: bool,
}

impl<H: SecureHash> Hmac<H> {
    const IPAD_BYTE: u8 = 0x36;
    const OPAD_BYTE: u8 = 0x5c;

    /* ------------------------------------------------------------------ */
    /*                         Construction helpers                       */
    /* ------------------------------------------------------------------ */

    /// Create a new HMAC instance keyed by `key`.
    ///
    /// Fails with `KeyWrongAlgorithm` unless the key was created for HMAC
    /// over `H`.
    pub fn new(key: &KeyMaterial) -> Result<Self> {
        Self::from_raw_key(key.bytes_for(H::MAC_PURPOSE)?)
    }

    /// Key an instance from raw bytes of any length.
    ///
    /// Used by HKDF, whose salts and PRKs are not purpose-tagged keys.
    pub(crate) fn from_raw_key(key: &[u8]) -> Result<Self> {
        let bs = H::block_size();
        debug_assert!(bs <= MAX_BLOCK);

        /* --- Derive K′ in constant-time --- */
        // Hash the key unconditionally so the running time
        // depends only on the public key length.
        let hashed = H::digest(key)?;

        let mut k_prime = SecretBuffer::<MAX_BLOCK>::zeroed();
        let long = (key.len() > bs) as u8;
        let mask = long.wrapping_neg(); // 0xFF when long else 0x00
        for (i, slot) in k_prime.as_mut_slice().iter_mut().take(bs).enumerate() {
            let k = key.get(i).copied().unwrap_or(0);
            let hk = hashed.as_ref().get(i).copied().unwrap_or(0);
            *slot = (hk & mask) | (k & !mask);
        }

        /* --- Build inner / outer paddings --- */
        let mut ipad = SecretBuffer::<MAX_BLOCK>::zeroed();
        let mut opad = SecretBuffer::<MAX_BLOCK>::zeroed();
        for ((i, o), k) in ipad
            .as_mut_slice()
            .iter_mut()
            .zip(opad.as_mut_slice().iter_mut())
            .zip(k_prime.as_slice().iter())
            .take(bs)
        {
            *i = k ^ Self::IPAD_BYTE;
            *o = k ^ Self::OPAD_BYTE;
        }

        let mut inner = H::new();
        inner.update(&ipad.as_slice()[..bs])?;
        let mut outer = H::new();
        outer.update(&opad.as_slice()[..bs])?;

        Ok(Self {
            inner,
            outer,
            is_finalized: false,
        })
    }

    /* ------------------------------------------------------------------ */
    /*                            Streaming API                           */
    /* ------------------------------------------------------------------ */

    /// Feed additional `data` into the MAC.
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        validate::not_finalized(self.is_finalized, H::name(), "update after finalize")?;
        self.inner.update(data)?;
        Ok(self)
    }

    /// Finalise and return the tag.
    pub fn finalize(&mut self) -> Result<MacTag> {
        validate::not_finalized(self.is_finalized, H::name(), "finalize called twice")?;
        self.is_finalized = true;

        let inner_hash = self.inner.finalize()?;
        self.outer.update(inner_hash.as_ref())?;
        let tag = self.outer.finalize()?;

        Ok(MacTag::from_slice(tag.as_ref()))
    }

    /// Tag length in bytes
    pub fn tag_size() -> usize {
        H::output_size()
    }

    /* ------------------------------------------------------------------ */
    /*                        Convenience wrappers                         */
    /* ------------------------------------------------------------------ */

    /// One-shot MAC helper.
    pub fn mac(key: &KeyMaterial, data: &[u8]) -> Result<MacTag> {
        let mut h = Self::new(key)?;
        h.update(data)?;
        h.finalize()
    }

    /// Constant-time verification of `tag` against `key` / `data`.
    ///
    /// A tag of the wrong length compares unequal; it is not an error.
    pub fn verify(key: &KeyMaterial, data: &[u8], tag: &[u8]) -> Result<bool> {
        let expected = Self::mac(key, data)?;
        Ok(ct_eq_fixed(expected.as_ref(), tag).into())
    }

    pub(crate) fn mac_raw(key: &[u8], parts: &[&[u8]]) -> Result<MacTag> {
        let mut h = Self::from_raw_key(key)?;
        for part in parts {
            h.update(part)?;
        }
        h.finalize()
    }
}

impl<H: SecureHash> Zeroize for Hmac<H> {
    fn zeroize(&mut self) {
        self.inner.zeroize();
        self.outer.zeroize();
    }
}

impl<H: SecureHash> Drop for Hmac<H> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<H: SecureHash> core::fmt::Debug for Hmac<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hmac")
            .field("hash", &H::name())
            .field("is_finalized", &self.is_finalized)
            .finish_non_exhaustive()
    }
}
