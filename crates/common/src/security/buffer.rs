//! Fixed-length heap buffer with constant-time equality
//!
//! [`ConstantTimeBuffer`] is the owning container for secret bytes whose size
//! is only known at runtime (keys of several purposes, exported key blobs).
//! Its length is set once at construction; the allocation is never resized,
//! so no stale copy of the contents is left behind by a reallocation.

use core::fmt;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owned, fixed-length secret bytes
pub struct ConstantTimeBuffer {
    data: Box<[u8]>,
}

impl ConstantTimeBuffer {
    /// Allocate a zero-filled buffer of `len` bytes
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0u8; len].into_boxed_slice(),
        }
    }

    /// Copy `bytes` into a new buffer
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut buf = Self::new(bytes.len());
        buf.data.copy_from_slice(bytes);
        buf
    }

    /// Length in bytes (public information)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds zero bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the contents
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Borrow the contents mutably (length stays fixed)
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Compare against `other` in constant time.
    ///
    /// The running time depends only on the lengths, never on the position of
    /// the first differing byte. Buffers of different length compare unequal.
    pub fn ct_eq_slice(&self, other: &[u8]) -> bool {
        bool::from(self.data[..].ct_eq(other))
    }
}

impl Zeroize for ConstantTimeBuffer {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl Drop for ConstantTimeBuffer {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for ConstantTimeBuffer {}

impl Clone for ConstantTimeBuffer {
    fn clone(&self) -> Self {
        Self::from_slice(&self.data)
    }
}

impl ConstantTimeEq for ConstantTimeBuffer {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.data[..].ct_eq(&other.data[..])
    }
}

impl PartialEq for ConstantTimeBuffer {
    fn eq(&self, other: &Self) -> bool {
        bool::from(ConstantTimeEq::ct_eq(self, other))
    }
}

impl Eq for ConstantTimeBuffer {}

impl AsRef<[u8]> for ConstantTimeBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for ConstantTimeBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for ConstantTimeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstantTimeBuffer(len={}, [REDACTED])", self.data.len())
    }
}
