//! Legacy digests kept for interoperability
//!
//! MD5 and SHA-1 are collision-broken. They implement [`LegacyHash`] but not
//! [`SecureHash`](crate::hash::SecureHash), so no HMAC or HKDF instance can be
//! built over them.

use zeroize::Zeroize;

use crate::error::{validate, Result};

mod md5;
mod sha1;

pub use md5::Md5;
pub use sha1::Sha1;

/// Block buffering shared by the two 64-byte-block legacy digests
#[derive(Clone, Zeroize)]
struct BlockBuffer {
    buffer: [u8; 64],
    buffer_idx: usize,
    total_bytes: u64,
    #[zeroize(skip)]
    finalized: bool,
}

impl BlockBuffer {
    fn new() -> Self {
        Self {
            buffer: [0u8; 64],
            buffer_idx: 0,
            total_bytes: 0,
            finalized: false,
        }
    }

    fn absorb<F>(&mut self, context: &'static str, mut input: &[u8], mut compress: F) -> Result<()>
    where
        F: FnMut(&[u8; 64]),
    {
        validate::not_finalized(self.finalized, context, "update after finalize")?;

        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), 64 - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == 64 {
                compress(&self.buffer);
                self.total_bytes = self.total_bytes.wrapping_add(64);
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    /// Merkle-Damgard padding; `encode_len` writes the 64-bit bit length
    /// into the last eight bytes in the digest's byte order.
    fn pad<F, L>(&mut self, context: &'static str, mut compress: F, encode_len: L) -> Result<()>
    where
        F: FnMut(&[u8; 64]),
        L: Fn(&mut [u8], u64),
    {
        validate::not_finalized(self.finalized, context, "finalize called twice")?;

        let bit_len = self
            .total_bytes
            .wrapping_add(self.buffer_idx as u64)
            .wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        for b in &mut self.buffer[self.buffer_idx + 1..] {
            *b = 0;
        }
        if self.buffer_idx >= 56 {
            compress(&self.buffer);
            self.buffer = [0u8; 64];
        }
        encode_len(&mut self.buffer[56..], bit_len);
        compress(&self.buffer);

        self.zeroize();
        self.finalized = true;
        Ok(())
    }
}

impl Drop for BlockBuffer {
    fn drop(&mut self) {
        self.zeroize();
    }
}
