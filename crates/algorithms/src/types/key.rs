//! Purpose-bound key material
//!
//! A [`KeyMaterial`] is the only way key bytes enter the MAC and AEAD
//! engines. It records the purpose it was created for, its length is checked
//! against that purpose at construction, and it offers no `AsRef<[u8]>` or
//! `Clone`. Getting the bytes back out requires the explicitly named
//! [`KeyMaterial::export_for_storage`].

use core::fmt;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{rng_error, validate, Error, Result};
use crate::rng::EntropySource;
use opencrypto_common::security::ConstantTimeBuffer;
use opencrypto_params::utils::mac::{
    HMAC_SHA224_KEY_SIZE, HMAC_SHA256_KEY_SIZE, HMAC_SHA384_KEY_SIZE, HMAC_SHA512_KEY_SIZE,
};
use opencrypto_params::utils::symmetric::{AES128_KEY_SIZE, AES256_KEY_SIZE, CHACHA20_KEY_SIZE};

/// What a key may be used for
///
/// Each purpose fixes the required key size and a stable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPurpose {
    /// HMAC with SHA-224, 28-byte key
    HmacSha224,
    /// HMAC with SHA-256, 32-byte key
    HmacSha256,
    /// HMAC with SHA-384, 48-byte key
    HmacSha384,
    /// HMAC with SHA-512, 64-byte key
    HmacSha512,
    /// AES-128-GCM, 16-byte key
    Aes128Gcm,
    /// AES-256-GCM, 32-byte key
    Aes256Gcm,
    /// ChaCha20-Poly1305, 32-byte key
    ChaCha20Poly1305,
}

impl KeyPurpose {
    /// Every purpose, in declaration order
    pub const ALL: [KeyPurpose; 7] = [
        KeyPurpose::HmacSha224,
        KeyPurpose::HmacSha256,
        KeyPurpose::HmacSha384,
        KeyPurpose::HmacSha512,
        KeyPurpose::Aes128Gcm,
        KeyPurpose::Aes256Gcm,
        KeyPurpose::ChaCha20Poly1305,
    ];

    /// Required key size in bytes
    pub const fn key_size(self) -> usize {
        match self {
            KeyPurpose::HmacSha224 => HMAC_SHA224_KEY_SIZE,
            KeyPurpose::HmacSha256 => HMAC_SHA256_KEY_SIZE,
            KeyPurpose::HmacSha384 => HMAC_SHA384_KEY_SIZE,
            KeyPurpose::HmacSha512 => HMAC_SHA512_KEY_SIZE,
            KeyPurpose::Aes128Gcm => AES128_KEY_SIZE,
            KeyPurpose::Aes256Gcm => AES256_KEY_SIZE,
            KeyPurpose::ChaCha20Poly1305 => CHACHA20_KEY_SIZE,
        }
    }

    /// Stable label, used in errors and in exported keys
    pub const fn label(self) -> &'static str {
        match self {
            KeyPurpose::HmacSha224 => "HMAC-SHA224",
            KeyPurpose::HmacSha256 => "HMAC-SHA256",
            KeyPurpose::HmacSha384 => "HMAC-SHA384",
            KeyPurpose::HmacSha512 => "HMAC-SHA512",
            KeyPurpose::Aes128Gcm => "AEAD-AES-128-GCM",
            KeyPurpose::Aes256Gcm => "AEAD-AES-256-GCM",
            KeyPurpose::ChaCha20Poly1305 => "AEAD-CHACHA20-POLY1305",
        }
    }

    /// Look a purpose up by its label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.label() == label)
    }

    /// Whether keys of this purpose drive a MAC
    pub const fn is_mac(self) -> bool {
        matches!(
            self,
            KeyPurpose::HmacSha224
                | KeyPurpose::HmacSha256
                | KeyPurpose::HmacSha384
                | KeyPurpose::HmacSha512
        )
    }

    /// Whether keys of this purpose drive an AEAD cipher
    pub const fn is_aead(self) -> bool {
        !self.is_mac()
    }
}

impl fmt::Display for KeyPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Secret key bytes bound to a single [`KeyPurpose`]
pub struct KeyMaterial {
    bytes: ConstantTimeBuffer,
    purpose: KeyPurpose,
}

impl KeyMaterial {
    /// Wrap externally provisioned key bytes.
    ///
    /// Fails with `InvalidKeyLength` unless `bytes` is exactly
    /// `purpose.key_size()` long.
    pub fn from_bytes(bytes: &[u8], purpose: KeyPurpose) -> Result<Self> {
        validate::key_length(purpose.label(), bytes.len(), purpose.key_size())?;
        Ok(Self {
            bytes: ConstantTimeBuffer::from_slice(bytes),
            purpose,
        })
    }

    /// Generate a fresh key from an entropy source (the preferred constructor)
    pub fn from_random<S: EntropySource + ?Sized>(source: &S, purpose: KeyPurpose) -> Result<Self> {
        let mut bytes = ConstantTimeBuffer::new(purpose.key_size());
        source.fill(bytes.as_mut_slice())?;
        Ok(Self { bytes, purpose })
    }

    /// Generate a fresh key from any caller-supplied CSPRNG
    pub fn from_rng<R: RngCore + CryptoRng>(rng: &mut R, purpose: KeyPurpose) -> Result<Self> {
        let mut bytes = ConstantTimeBuffer::new(purpose.key_size());
        rng.try_fill_bytes(bytes.as_mut_slice())
            .map_err(|e| rng_error("KeyMaterial::from_rng", e))?;
        Ok(Self { bytes, purpose })
    }

    /// The purpose this key is bound to
    pub fn purpose(&self) -> KeyPurpose {
        self.purpose
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: every purpose requires a non-empty key
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Constant-time equality. Keys of different purposes never compare equal.
    pub fn ct_eq(&self, other: &Self) -> bool {
        let same_bytes = self.bytes.ct_eq_slice(other.bytes.as_slice());
        same_bytes & (self.purpose == other.purpose)
    }

    /// Make an independent copy of this key.
    ///
    /// Named explicitly instead of implementing `Clone` so that copies of a
    /// secret are visible at the call site.
    pub fn duplicate(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            purpose: self.purpose,
        }
    }

    /// Copy the raw key bytes out for persistence.
    ///
    /// This is the only way to read a key's bytes outside this crate.
    pub fn export_for_storage(&self) -> ExportedKey {
        ExportedKey {
            bytes: self.bytes.clone(),
            purpose: self.purpose,
        }
    }

    /// Rebuild a key from a previously exported blob, re-checking its length
    pub fn import_from_storage(exported: ExportedKey) -> Result<Self> {
        let ExportedKey { bytes, purpose } = exported;
        validate::key_length(purpose.label(), bytes.len(), purpose.key_size())?;
        Ok(Self { bytes, purpose })
    }

    /// Borrow the key bytes after checking the purpose matches `expected`.
    pub(crate) fn bytes_for(&self, expected: KeyPurpose) -> Result<&[u8]> {
        if self.purpose != expected {
            return Err(Error::KeyWrongAlgorithm {
                expected: expected.label(),
                actual: self.purpose.label(),
            });
        }
        Ok(self.bytes.as_slice())
    }
}

impl Zeroize for KeyMaterial {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("purpose", &self.purpose.label())
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Raw key bytes plus purpose, as produced by [`KeyMaterial::export_for_storage`]
///
/// The bytes are wiped when this value is dropped.
pub struct ExportedKey {
    bytes: ConstantTimeBuffer,
    purpose: KeyPurpose,
}

impl ExportedKey {
    /// Assemble an exported key from stored parts (validated on import)
    pub fn from_parts(purpose: KeyPurpose, bytes: &[u8]) -> Self {
        Self {
            bytes: ConstantTimeBuffer::from_slice(bytes),
            purpose,
        }
    }

    /// Parse the hexadecimal form produced by [`ExportedKey::to_hex`]
    pub fn from_hex(purpose: KeyPurpose, hex_str: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            hex::decode(hex_str)
                .map_err(|_| Error::param("hex_str", "Invalid hexadecimal string"))?,
        );
        Ok(Self::from_parts(purpose, &decoded))
    }

    /// Purpose recorded alongside the bytes
    pub fn purpose(&self) -> KeyPurpose {
        self.purpose
    }

    /// The raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Lowercase hexadecimal encoding, wiped when dropped
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes.as_slice()))
    }
}

impl fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedKey")
            .field("purpose", &self.purpose.label())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
