//! Message authentication codes
//!
//! HMAC over the SHA-2 family. Keys must be [`KeyMaterial`] tagged with the
//! matching HMAC purpose; tags are checked only through the constant-time
//! `verify` entry points.

use core::fmt;

use subtle::ConstantTimeEq;

use crate::error::Result;
use crate::hash::{Sha224, Sha256, Sha384, Sha512};
use crate::types::{KeyMaterial, KeyPurpose};
use opencrypto_common::security::ConstantTimeBuffer;

pub mod hmac;
pub(crate) mod poly1305;
pub use hmac::Hmac;

/// Authentication tag produced by a MAC
#[derive(Clone)]
pub struct MacTag {
    bytes: ConstantTimeBuffer,
}

impl MacTag {
    pub(crate) fn from_slice(bytes: &[u8]) -> Self {
        Self {
            bytes: ConstantTimeBuffer::from_slice(bytes),
        }
    }

    /// Tag length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the tag is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copy the tag into a vector, e.g. for transmission
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.as_slice().to_vec()
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes.as_slice())
    }
}

impl AsRef<[u8]> for MacTag {
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl PartialEq for MacTag {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for MacTag {}

impl fmt::Debug for MacTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacTag({})", self.to_hex())
    }
}

/// MAC algorithms selectable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacAlgorithm {
    /// HMAC-SHA224
    HmacSha224,
    /// HMAC-SHA256
    HmacSha256,
    /// HMAC-SHA384
    HmacSha384,
    /// HMAC-SHA512
    HmacSha512,
}

impl MacAlgorithm {
    /// Key purpose a key must carry to drive this algorithm
    pub fn key_purpose(self) -> KeyPurpose {
        match self {
            MacAlgorithm::HmacSha224 => KeyPurpose::HmacSha224,
            MacAlgorithm::HmacSha256 => KeyPurpose::HmacSha256,
            MacAlgorithm::HmacSha384 => KeyPurpose::HmacSha384,
            MacAlgorithm::HmacSha512 => KeyPurpose::HmacSha512,
        }
    }

    /// Tag length in bytes
    pub fn tag_size(self) -> usize {
        match self {
            MacAlgorithm::HmacSha224 => Hmac::<Sha224>::tag_size(),
            MacAlgorithm::HmacSha256 => Hmac::<Sha256>::tag_size(),
            MacAlgorithm::HmacSha384 => Hmac::<Sha384>::tag_size(),
            MacAlgorithm::HmacSha512 => Hmac::<Sha512>::tag_size(),
        }
    }

    /// Display name, identical to the key purpose label
    pub fn name(self) -> &'static str {
        self.key_purpose().label()
    }
}

#[derive(Clone)]
enum Engine {
    Sha224(Hmac<Sha224>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

macro_rules! dispatch {
    ($engine:expr, $m:ident => $body:expr) => {
        match $engine {
            Engine::Sha224($m) => $body,
            Engine::Sha256($m) => $body,
            Engine::Sha384($m) => $body,
            Engine::Sha512($m) => $body,
        }
    };
}

/// MAC state whose algorithm is chosen at runtime
#[derive(Clone)]
pub struct MacState {
    engine: Engine,
    algorithm: MacAlgorithm,
}

impl MacState {
    /// Key a new MAC computation.
    ///
    /// Fails with `KeyWrongAlgorithm` unless `key` was created for
    /// `algorithm`.
    pub fn new(key: &KeyMaterial, algorithm: MacAlgorithm) -> Result<Self> {
        let engine = match algorithm {
            MacAlgorithm::HmacSha224 => Engine::Sha224(Hmac::new(key)?),
            MacAlgorithm::HmacSha256 => Engine::Sha256(Hmac::new(key)?),
            MacAlgorithm::HmacSha384 => Engine::Sha384(Hmac::new(key)?),
            MacAlgorithm::HmacSha512 => Engine::Sha512(Hmac::new(key)?),
        };
        Ok(Self { engine, algorithm })
    }

    /// Absorb `data`
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        dispatch!(&mut self.engine, m => { m.update(data)?; });
        Ok(self)
    }

    /// Produce the tag; fails with `InvalidState` on a second call
    pub fn finalize(&mut self) -> Result<MacTag> {
        dispatch!(&mut self.engine, m => m.finalize())
    }

    /// Selected algorithm
    pub fn algorithm(&self) -> MacAlgorithm {
        self.algorithm
    }

    /// Compute the tag over `message` and compare it with `expected` in
    /// constant time
    pub fn verify(
        key: &KeyMaterial,
        algorithm: MacAlgorithm,
        message: &[u8],
        expected: &[u8],
    ) -> Result<bool> {
        match algorithm {
            MacAlgorithm::HmacSha224 => Hmac::<Sha224>::verify(key, message, expected),
            MacAlgorithm::HmacSha256 => Hmac::<Sha256>::verify(key, message, expected),
            MacAlgorithm::HmacSha384 => Hmac::<Sha384>::verify(key, message, expected),
            MacAlgorithm::HmacSha512 => Hmac::<Sha512>::verify(key, message, expected),
        }
    }
}

impl fmt::Debug for MacState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacState")
            .field("algorithm", &self.algorithm.name())
            .finish_non_exhaustive()
    }
}
