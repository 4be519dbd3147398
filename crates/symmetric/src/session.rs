//! Counter-nonce AEAD sessions
//!
//! An [`AeadSession`] owns its key and never accepts a nonce from the
//! caller. Each nonce is
//!
//! ```text
//! prefix (4 random bytes) || counter (u64, big-endian)
//! ```
//!
//! The prefix is drawn once when the session starts and the counter only
//! moves forward, so two messages sealed by one session can never share a
//! nonce. When the counter runs out the session refuses to seal with
//! `InvalidState`; the key must then be replaced.
//!
//! Two sessions over the same key pick independent prefixes. Keys shared by
//! many long-lived sessions should still be rotated well before 2^32 sessions.

use core::fmt;
use core::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroizing;

use opencrypto_algorithms::aead::{self, AeadAlgorithm, AeadNonce};
use opencrypto_algorithms::rng::{EntropySource, RandomSource};
use opencrypto_algorithms::types::KeyMaterial;
use opencrypto_api::{Error, Result};

use crate::package::CiphertextPackage;

/// Random bytes at the front of every session nonce
pub const NONCE_PREFIX_SIZE: usize = 4;

/// A stateful sealer that derives nonces from a counter
pub struct AeadSession<A: AeadAlgorithm> {
    key: KeyMaterial,
    prefix: [u8; NONCE_PREFIX_SIZE],
    counter: u64,
    _algorithm: PhantomData<A>,
}

impl<A: AeadAlgorithm> AeadSession<A> {
    /// Start a session, drawing the nonce prefix from the OS CSPRNG.
    ///
    /// Fails with `KeyWrongAlgorithm` if `key` was not made for `A`.
    pub fn new(key: KeyMaterial) -> Result<Self> {
        Self::with_source(key, RandomSource::global())
    }

    /// Start a session, drawing the nonce prefix from `source`
    pub fn with_source<S: EntropySource + ?Sized>(key: KeyMaterial, source: &S) -> Result<Self> {
        let mut prefix = [0u8; NONCE_PREFIX_SIZE];
        source.fill(&mut prefix)?;
        Self::from_parts(key, prefix, 0)
    }

    pub(crate) fn from_parts(
        key: KeyMaterial,
        prefix: [u8; NONCE_PREFIX_SIZE],
        counter: u64,
    ) -> Result<Self> {
        if key.purpose() != A::PURPOSE {
            return Err(Error::KeyWrongAlgorithm {
                expected: A::PURPOSE.label(),
                actual: key.purpose().label(),
            });
        }
        Ok(Self {
            key,
            prefix,
            counter,
            _algorithm: PhantomData,
        })
    }

    /// Number of messages sealed so far (including any started at a
    /// restored counter)
    pub fn messages_sealed(&self) -> u64 {
        self.counter
    }

    /// Nonces left before the session is exhausted
    pub fn remaining(&self) -> u64 {
        u64::MAX - self.counter
    }

    /// Reserve the next nonce, or fail once the counter is spent
    fn next_nonce(&mut self) -> Result<AeadNonce> {
        if self.counter == u64::MAX {
            return Err(Error::state(A::NAME, "session nonce counter exhausted"));
        }
        let mut bytes = [0u8; 12];
        bytes[..NONCE_PREFIX_SIZE].copy_from_slice(&self.prefix);
        BigEndian::write_u64(&mut bytes[NONCE_PREFIX_SIZE..], self.counter);
        self.counter += 1;
        Ok(AeadNonce::new(bytes))
    }

    /// Seal `plaintext` under the next session nonce
    pub fn seal(&mut self, plaintext: &[u8], aad: &[u8]) -> Result<CiphertextPackage> {
        let nonce = self.next_nonce()?;
        let sealed = aead::seal::<A>(&self.key, &nonce, plaintext, aad)?;
        Ok(CiphertextPackage::new::<A>(nonce, sealed))
    }

    /// Verify and decrypt a package sealed under this session's key.
    ///
    /// Packages from any session over the same key are accepted; the nonce
    /// travels inside the package.
    pub fn open(&self, package: &CiphertextPackage, aad: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        package.expect_algorithm::<A>()?;
        aead::open::<A>(
            &self.key,
            package.nonce(),
            package.ciphertext(),
            package.tag(),
            aad,
        )
    }
}

impl<A: AeadAlgorithm> fmt::Debug for AeadSession<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadSession")
            .field("algorithm", &A::NAME)
            .field("messages_sealed", &self.counter)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencrypto_algorithms::aead::{Aes128Gcm, Aes256Gcm, ChaCha20Poly1305};
    use opencrypto_algorithms::types::KeyPurpose;
    use opencrypto_api::ErrorKind;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    struct FixedSource(u8);

    impl EntropySource for FixedSource {
        fn fill(&self, buf: &mut [u8]) -> Result<()> {
            buf.fill(self.0);
            Ok(())
        }
    }

    fn key(purpose: KeyPurpose) -> KeyMaterial {
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        KeyMaterial::from_rng(&mut rng, purpose).unwrap()
    }

    #[test]
    fn test_nonce_layout() {
        let mut session =
            AeadSession::<Aes256Gcm>::with_source(key(KeyPurpose::Aes256Gcm), &FixedSource(0xab))
                .unwrap();

        let first = session.seal(b"one", b"").unwrap();
        let second = session.seal(b"two", b"").unwrap();

        assert_eq!(
            first.nonce().as_ref(),
            &[0xab, 0xab, 0xab, 0xab, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            second.nonce().as_ref(),
            &[0xab, 0xab, 0xab, 0xab, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(session.messages_sealed(), 2);
    }

    #[test]
    fn test_nonces_never_repeat() {
        let mut session = AeadSession::<ChaCha20Poly1305>::new(key(KeyPurpose::ChaCha20Poly1305)).unwrap();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let package = session.seal(b"m", b"").unwrap();
            assert!(seen.insert(package.nonce().as_ref().to_vec()));
        }
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let mut session = AeadSession::<Aes128Gcm>::new(key(KeyPurpose::Aes128Gcm)).unwrap();
        let package = session.seal(b"session data", b"header").unwrap();
        assert_eq!(&session.open(&package, b"header").unwrap()[..], b"session data");

        let err = session.open(&package, b"other header").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
    }

    #[test]
    fn test_counter_exhaustion() {
        let mut session = AeadSession::<Aes256Gcm>::from_parts(
            key(KeyPurpose::Aes256Gcm),
            [1, 2, 3, 4],
            u64::MAX - 2,
        )
        .unwrap();
        assert_eq!(session.remaining(), 2);

        session.seal(b"a", b"").unwrap();
        let last = session.seal(b"b", b"").unwrap();
        assert_eq!(&last.nonce().as_ref()[4..], &(u64::MAX - 1).to_be_bytes());

        let err = session.seal(b"c", b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        // stays exhausted
        assert_eq!(session.seal(b"d", b"").unwrap_err().kind(), ErrorKind::InvalidState);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_wrong_key_purpose() {
        let err = AeadSession::<Aes256Gcm>::new(key(KeyPurpose::ChaCha20Poly1305)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyWrongAlgorithm);
    }

    #[test]
    fn test_entropy_failure_propagates() {
        struct Broken;
        impl EntropySource for Broken {
            fn fill(&self, _buf: &mut [u8]) -> Result<()> {
                Err(Error::EntropyUnavailable {
                    context: "Broken",
                    code: None,
                })
            }
        }
        let err = AeadSession::<Aes256Gcm>::with_source(key(KeyPurpose::Aes256Gcm), &Broken)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyUnavailable);
    }

    #[test]
    fn test_debug_redacts_key() {
        let session = AeadSession::<Aes256Gcm>::new(key(KeyPurpose::Aes256Gcm)).unwrap();
        let debug = format!("{:?}", session);
        assert!(debug.contains("AES-256-GCM"));
        assert!(debug.contains("[REDACTED]"));
    }
}
