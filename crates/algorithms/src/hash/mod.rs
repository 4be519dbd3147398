//! Hash function implementations
//!
//! Every digest implements [`HashFunction`]: create, feed bytes any number of
//! times in any chunking, finalize exactly once. A second `finalize`, or an
//! `update` after finalization, fails with `InvalidState`.
//!
//! The SHA-2 family implements the sealed [`SecureHash`] marker and is the
//! only family accepted by HMAC and HKDF. MD5 and SHA-1 live in [`legacy`]
//! behind the `legacy` feature, implement [`LegacyHash`] instead, and can
//! never be plugged into a keyed construction.

use zeroize::Zeroize;

use crate::error::Result;
use crate::types::sealed::Sealed;
use crate::types::KeyPurpose;

pub mod sha2;
pub use sha2::{Sha224, Sha256, Sha384, Sha512};

#[cfg(feature = "legacy")]
pub mod legacy;
#[cfg(feature = "legacy")]
pub use legacy::{Md5, Sha1};

/// Type-level constants describing a hash algorithm
pub trait HashAlgorithm {
    /// Digest size in bytes
    const OUTPUT_SIZE: usize;
    /// Internal block size in bytes
    const BLOCK_SIZE: usize;
    /// Display name
    const ALGORITHM_ID: &'static str;
}

/// Incremental hash computation
pub trait HashFunction: Sized + Clone + Zeroize {
    /// Algorithm constants
    type Algorithm: HashAlgorithm;
    /// Fixed-size digest produced by `finalize`
    type Output: AsRef<[u8]> + Clone;

    /// Fresh state, ready to absorb input
    fn new() -> Self;

    /// Absorb `data`. Fails with `InvalidState` after `finalize`.
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Produce the digest and wipe the internal state.
    ///
    /// Fails with `InvalidState` if called more than once.
    fn finalize(&mut self) -> Result<Self::Output>;

    /// One-shot digest of `data`
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }

    /// Digest size in bytes
    fn output_size() -> usize {
        Self::Algorithm::OUTPUT_SIZE
    }

    /// Internal block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Display name
    fn name() -> &'static str {
        Self::Algorithm::ALGORITHM_ID
    }
}

/// Digests accepted by keyed constructions (HMAC, HKDF)
///
/// Sealed: implemented only for SHA-224, SHA-256, SHA-384 and SHA-512.
pub trait SecureHash: HashFunction + Sealed {
    /// Key purpose an HMAC over this digest requires
    const MAC_PURPOSE: KeyPurpose;
}

/// Digests kept only for interoperability with legacy formats
///
/// Sealed and deliberately disjoint from [`SecureHash`].
pub trait LegacyHash: HashFunction + Sealed {}

/// Secure digest algorithms selectable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl DigestAlgorithm {
    /// Digest size in bytes
    pub fn output_size(self) -> usize {
        match self {
            DigestAlgorithm::Sha224 => Sha224::output_size(),
            DigestAlgorithm::Sha256 => Sha256::output_size(),
            DigestAlgorithm::Sha384 => Sha384::output_size(),
            DigestAlgorithm::Sha512 => Sha512::output_size(),
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha224 => Sha224::name(),
            DigestAlgorithm::Sha256 => Sha256::name(),
            DigestAlgorithm::Sha384 => Sha384::name(),
            DigestAlgorithm::Sha512 => Sha512::name(),
        }
    }
}

/// Insecure digest algorithms, selectable only through
/// [`DigestState::new_legacy`]
#[cfg(feature = "legacy")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyDigestAlgorithm {
    /// MD5 (broken, interoperability only)
    Md5,
    /// SHA-1 (broken, interoperability only)
    Sha1,
}

#[derive(Clone)]
enum Engine {
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    #[cfg(feature = "legacy")]
    Md5(Md5),
    #[cfg(feature = "legacy")]
    Sha1(Sha1),
}

macro_rules! dispatch {
    ($engine:expr, $h:ident => $body:expr) => {
        match $engine {
            Engine::Sha224($h) => $body,
            Engine::Sha256($h) => $body,
            Engine::Sha384($h) => $body,
            Engine::Sha512($h) => $body,
            #[cfg(feature = "legacy")]
            Engine::Md5($h) => $body,
            #[cfg(feature = "legacy")]
            Engine::Sha1($h) => $body,
        }
    };
}

/// Digest state whose algorithm is chosen at runtime
///
/// Same lifecycle as the typed hashers: any number of `update` calls, then a
/// single `finalize`.
#[derive(Clone)]
pub struct DigestState {
    engine: Engine,
}

impl DigestState {
    /// Start a digest with a secure algorithm
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        let engine = match algorithm {
            DigestAlgorithm::Sha224 => Engine::Sha224(Sha224::new()),
            DigestAlgorithm::Sha256 => Engine::Sha256(Sha256::new()),
            DigestAlgorithm::Sha384 => Engine::Sha384(Sha384::new()),
            DigestAlgorithm::Sha512 => Engine::Sha512(Sha512::new()),
        };
        Self { engine }
    }

    /// Start a digest with an insecure legacy algorithm
    #[cfg(feature = "legacy")]
    pub fn new_legacy(algorithm: LegacyDigestAlgorithm) -> Self {
        let engine = match algorithm {
            LegacyDigestAlgorithm::Md5 => Engine::Md5(Md5::new()),
            LegacyDigestAlgorithm::Sha1 => Engine::Sha1(Sha1::new()),
        };
        Self { engine }
    }

    /// Absorb `data`
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        dispatch!(&mut self.engine, h => { h.update(data)?; });
        Ok(self)
    }

    /// Produce the digest bytes; fails with `InvalidState` on a second call
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        dispatch!(&mut self.engine, h => h.finalize().map(|d| d.as_ref().to_vec()))
    }

    /// Digest size in bytes
    pub fn output_size(&self) -> usize {
        match &self.engine {
            Engine::Sha224(_) => Sha224::output_size(),
            Engine::Sha256(_) => Sha256::output_size(),
            Engine::Sha384(_) => Sha384::output_size(),
            Engine::Sha512(_) => Sha512::output_size(),
            #[cfg(feature = "legacy")]
            Engine::Md5(_) => Md5::output_size(),
            #[cfg(feature = "legacy")]
            Engine::Sha1(_) => Sha1::output_size(),
        }
    }

    /// Display name of the selected algorithm
    pub fn name(&self) -> &'static str {
        match &self.engine {
            Engine::Sha224(_) => Sha224::name(),
            Engine::Sha256(_) => Sha256::name(),
            Engine::Sha384(_) => Sha384::name(),
            Engine::Sha512(_) => Sha512::name(),
            #[cfg(feature = "legacy")]
            Engine::Md5(_) => Md5::name(),
            #[cfg(feature = "legacy")]
            Engine::Sha1(_) => Sha1::name(),
        }
    }
}

impl core::fmt::Debug for DigestState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DigestState")
            .field("algorithm", &self.name())
            .finish_non_exhaustive()
    }
}
