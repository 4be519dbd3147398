//! Self-describing ciphertext packages
//!
//! A [`CiphertextPackage`] carries everything a receiver needs besides the
//! key: the algorithm name, the nonce, the ciphertext and the tag. Its text
//! form is
//!
//! ```text
//! OPENCRYPTO:{algorithm}:{nonce_b64}:{ciphertext_b64}:{tag_b64}
//! ```
//!
//! using the standard padded base64 alphabet. Parsing never touches key
//! material; authenticity is only established by decrypting.

use core::fmt;
use core::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use opencrypto_algorithms::aead::{
    AeadAlgorithm, AeadNonce, AeadTag, Aes128Gcm, Aes256Gcm, ChaCha20Poly1305, SealedMessage,
};
use opencrypto_api::{Error, Result};
use opencrypto_params::utils::symmetric::{GCM_NONCE_SIZE, GCM_TAG_SIZE};

const PREFIX: &str = "OPENCRYPTO";

/// Algorithm names a package may carry
const KNOWN_ALGORITHMS: [&str; 3] = [Aes128Gcm::NAME, Aes256Gcm::NAME, ChaCha20Poly1305::NAME];

/// Nonce, ciphertext and tag for one sealed message
#[derive(Clone, PartialEq, Eq)]
pub struct CiphertextPackage {
    algorithm: &'static str,
    nonce: AeadNonce,
    ciphertext: Vec<u8>,
    tag: AeadTag,
}

impl CiphertextPackage {
    /// Bundle the output of a seal operation under algorithm `A`
    pub fn new<A: AeadAlgorithm>(nonce: AeadNonce, sealed: SealedMessage) -> Self {
        let (ciphertext, tag) = sealed.into_parts();
        Self {
            algorithm: A::NAME,
            nonce,
            ciphertext,
            tag,
        }
    }

    /// Name of the algorithm that sealed the message
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    /// Nonce the message was sealed with
    pub fn nonce(&self) -> &AeadNonce {
        &self.nonce
    }

    /// Encrypted bytes
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Authentication tag
    pub fn tag(&self) -> &AeadTag {
        &self.tag
    }

    /// Check the package was produced by `A`
    pub(crate) fn expect_algorithm<A: AeadAlgorithm>(&self) -> Result<()> {
        if self.algorithm != A::NAME {
            return Err(Error::param("package", "sealed with a different algorithm"));
        }
        Ok(())
    }

    /// Parse the text form produced by `Display`
    pub fn from_text(s: &str) -> Result<Self> {
        let mut fields = s.split(':');
        if fields.next() != Some(PREFIX) {
            return Err(Error::param("package", "missing OPENCRYPTO prefix"));
        }

        let (Some(algorithm), Some(nonce), Some(ciphertext), Some(tag), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return Err(Error::param("package", "expected five ':'-separated fields"));
        };

        let algorithm = KNOWN_ALGORITHMS
            .iter()
            .copied()
            .find(|known| *known == algorithm)
            .ok_or_else(|| Error::param("package", "unknown algorithm"))?;

        let nonce = AeadNonce::from_slice(&decode("package nonce", nonce)?)
            .map_err(|_| length_error("package nonce", GCM_NONCE_SIZE, nonce))?;
        let ciphertext = decode("package ciphertext", ciphertext)?;
        let tag = AeadTag::from_slice(&decode("package tag", tag)?)
            .map_err(|_| length_error("package tag", GCM_TAG_SIZE, tag))?;

        Ok(Self {
            algorithm,
            nonce,
            ciphertext,
            tag,
        })
    }
}

fn decode(name: &'static str, field: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(field)
        .map_err(|_| Error::param(name, "invalid base64"))
}

fn length_error(context: &'static str, expected: usize, field: &str) -> Error {
    Error::InvalidLength {
        context,
        expected,
        actual: STANDARD.decode(field).map(|v| v.len()).unwrap_or(0),
    }
}

impl fmt::Display for CiphertextPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            PREFIX,
            self.algorithm,
            STANDARD.encode(self.nonce.as_ref()),
            STANDARD.encode(&self.ciphertext),
            STANDARD.encode(self.tag.as_ref()),
        )
    }
}

impl FromStr for CiphertextPackage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

impl fmt::Debug for CiphertextPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CiphertextPackage")
            .field("algorithm", &self.algorithm)
            .field("nonce", &self.nonce)
            .field("ciphertext_len", &self.ciphertext.len())
            .field("tag", &self.tag)
            .finish()
    }
}
