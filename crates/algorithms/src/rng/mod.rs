//! Operating-system randomness
//!
//! [`RandomSource`] reads from the platform CSPRNG through `getrandom`
//! (`getrandom(2)` on Linux, `getentropy` on the BSDs and macOS,
//! `BCryptGenRandom` on Windows). The handle holds no state: there is no
//! user-space pool to reseed, nothing is duplicated across `fork`, and no
//! lock is taken, because the OS call is itself thread-safe.
//!
//! A failing OS source is reported as `EntropyUnavailable`. The error is
//! fatal and is never papered over with a weaker generator.

use crate::error::{entropy_error, Result};
use opencrypto_common::security::SecretBuffer;

/// Anything that can fill a buffer with cryptographically secure bytes
///
/// [`KeyMaterial::from_random`](crate::types::KeyMaterial::from_random) and
/// [`generate_nonce`](crate::aead::generate_nonce) accept any implementation,
/// which lets tests substitute a deterministic source.
pub trait EntropySource {
    /// Fill `buf` entirely, or fail with `EntropyUnavailable`
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// Process-wide handle to the OS CSPRNG
#[derive(Debug, Clone, Copy)]
pub struct RandomSource {
    _private: (),
}

static GLOBAL: RandomSource = RandomSource { _private: () };

impl RandomSource {
    /// The shared handle, valid for the life of the process
    pub fn global() -> &'static RandomSource {
        &GLOBAL
    }

    /// Fill a fixed-size secret buffer
    pub fn fill_secret<const N: usize>(&self) -> Result<SecretBuffer<N>> {
        let mut buf = SecretBuffer::<N>::zeroed();
        self.fill(buf.as_mut_slice())?;
        Ok(buf)
    }

    /// Fill an array of `N` random bytes
    pub fn bytes<const N: usize>(&self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.fill(&mut out)?;
        Ok(out)
    }

    /// A uniformly random `u64`
    pub fn next_u64(&self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.bytes()?))
    }
}

impl EntropySource for RandomSource {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        getrandom::getrandom(buf).map_err(|e| entropy_error("RandomSource::fill", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    struct FailingSource;

    impl EntropySource for FailingSource {
        fn fill(&self, _buf: &mut [u8]) -> Result<()> {
            Err(Error::EntropyUnavailable {
                context: "FailingSource",
                code: None,
            })
        }
    }

    #[test]
    fn test_fill_produces_distinct_outputs() {
        let rng = RandomSource::global();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill(&mut a).unwrap();
        rng.fill(&mut b).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, [0u8; 32]);
    }

    #[test]
    fn test_fill_empty_buffer() {
        let mut empty: [u8; 0] = [];
        RandomSource::global().fill(&mut empty).unwrap();
    }

    #[test]
    fn test_global_is_shared() {
        assert!(core::ptr::eq(RandomSource::global(), RandomSource::global()));
    }

    #[test]
    fn test_fixed_size_helpers() {
        let rng = RandomSource::global();
        let secret = rng.fill_secret::<48>().unwrap();
        assert_eq!(secret.len(), 48);
        let a: [u8; 16] = rng.bytes().unwrap();
        let b: [u8; 16] = rng.bytes().unwrap();
        assert_ne!(a, b);
        assert_ne!(rng.next_u64().unwrap(), rng.next_u64().unwrap());
    }

    #[test]
    fn test_concurrent_fill() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let mut buf = [0u8; 64];
                    RandomSource::global().fill(&mut buf).unwrap();
                    buf
                })
            })
            .collect();
        let outputs: Vec<[u8; 64]> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for i in 0..outputs.len() {
            for j in i + 1..outputs.len() {
                assert_ne!(outputs[i], outputs[j]);
            }
        }
    }

    #[test]
    fn test_failure_propagates_as_fatal() {
        let err = crate::types::KeyMaterial::from_random(
            &FailingSource,
            crate::types::KeyPurpose::Aes128Gcm,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyUnavailable);
        assert!(err.is_fatal());
    }
}
