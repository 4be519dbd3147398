//! Poly1305 one-time authenticator (RFC 8439 section 2.5)
//!
//! 26-bit limb arithmetic with no secret-dependent branches. A key must
//! authenticate exactly one message; ChaCha20-Poly1305 derives a fresh one
//! per nonce.

use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, ZeroizeOnDrop};

use opencrypto_params::utils::symmetric::{POLY1305_KEY_SIZE, POLY1305_TAG_SIZE};

const LIMB_MASK: u32 = 0x3ff_ffff;

#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct Poly1305 {
    r: [u32; 5],
    h: [u32; 5],
    pad: [u32; 4],
    buffer: [u8; 16],
    buffer_len: usize,
}

impl Poly1305 {
    pub(crate) fn new(key: &[u8; POLY1305_KEY_SIZE]) -> Self {
        // r is clamped as it is loaded
        let r = [
            LittleEndian::read_u32(&key[0..4]) & 0x3ff_ffff,
            (LittleEndian::read_u32(&key[3..7]) >> 2) & 0x3ff_ff03,
            (LittleEndian::read_u32(&key[6..10]) >> 4) & 0x3ff_c0ff,
            (LittleEndian::read_u32(&key[9..13]) >> 6) & 0x3f0_3fff,
            (LittleEndian::read_u32(&key[12..16]) >> 8) & 0x00f_ffff,
        ];
        let mut pad = [0u32; 4];
        LittleEndian::read_u32_into(&key[16..32], &mut pad);

        Self {
            r,
            h: [0; 5],
            pad,
            buffer: [0; 16],
            buffer_len: 0,
        }
    }

    /// h = (h + m) * r mod 2^130 - 5
    fn block(&mut self, m: &[u8; 16], hibit: u32) {
        let [r0, r1, r2, r3, r4] = self.r.map(u64::from);
        let (s1, s2, s3, s4) = (r1 * 5, r2 * 5, r3 * 5, r4 * 5);

        let h0 = u64::from(self.h[0] + (LittleEndian::read_u32(&m[0..4]) & LIMB_MASK));
        let h1 = u64::from(self.h[1] + ((LittleEndian::read_u32(&m[3..7]) >> 2) & LIMB_MASK));
        let h2 = u64::from(self.h[2] + ((LittleEndian::read_u32(&m[6..10]) >> 4) & LIMB_MASK));
        let h3 = u64::from(self.h[3] + ((LittleEndian::read_u32(&m[9..13]) >> 6) & LIMB_MASK));
        let h4 = u64::from(self.h[4] + ((LittleEndian::read_u32(&m[12..16]) >> 8) | hibit));

        let d0 = h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1;
        let mut d1 = h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2;
        let mut d2 = h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3;
        let mut d3 = h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4;
        let mut d4 = h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0;

        let mask = u64::from(LIMB_MASK);
        let mut c = d0 >> 26;
        let mut t0 = d0 & mask;
        d1 += c;
        c = d1 >> 26;
        let mut n1 = (d1 & mask) as u32;
        d2 += c;
        c = d2 >> 26;
        let n2 = (d2 & mask) as u32;
        d3 += c;
        c = d3 >> 26;
        let n3 = (d3 & mask) as u32;
        d4 += c;
        c = d4 >> 26;
        let n4 = (d4 & mask) as u32;
        t0 += c * 5;
        n1 += (t0 >> 26) as u32;
        let n0 = (t0 & mask) as u32;

        self.h = [n0, n1, n2, n3, n4];
    }

    pub(crate) fn update(&mut self, mut data: &[u8]) {
        if self.buffer_len > 0 {
            let take = core::cmp::min(16 - self.buffer_len, data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];
            if self.buffer_len < 16 {
                return;
            }
            let block = self.buffer;
            self.block(&block, 1 << 24);
            self.buffer_len = 0;
        }

        let mut blocks = data.chunks_exact(16);
        for chunk in &mut blocks {
            let mut block = [0u8; 16];
            block.copy_from_slice(chunk);
            self.block(&block, 1 << 24);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Absorb zero bytes up to the next 16-byte boundary
    pub(crate) fn pad_to_block(&mut self) {
        if self.buffer_len > 0 {
            let zeros = [0u8; 16];
            let missing = 16 - self.buffer_len;
            self.update(&zeros[..missing]);
        }
    }

    pub(crate) fn finalize(mut self) -> [u8; POLY1305_TAG_SIZE] {
        if self.buffer_len > 0 {
            let mut block = [0u8; 16];
            block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
            block[self.buffer_len] = 1;
            self.block(&block, 0);
        }

        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.h;

        // Fully carry h
        let mut c = h1 >> 26;
        h1 &= LIMB_MASK;
        h2 += c;
        c = h2 >> 26;
        h2 &= LIMB_MASK;
        h3 += c;
        c = h3 >> 26;
        h3 &= LIMB_MASK;
        h4 += c;
        c = h4 >> 26;
        h4 &= LIMB_MASK;
        h0 += c * 5;
        c = h0 >> 26;
        h0 &= LIMB_MASK;
        h1 += c;

        // g = h + -p
        let mut g0 = h0 + 5;
        c = g0 >> 26;
        g0 &= LIMB_MASK;
        let mut g1 = h1 + c;
        c = g1 >> 26;
        g1 &= LIMB_MASK;
        let mut g2 = h2 + c;
        c = g2 >> 26;
        g2 &= LIMB_MASK;
        let mut g3 = h3 + c;
        c = g3 >> 26;
        g3 &= LIMB_MASK;
        let g4 = h4.wrapping_add(c).wrapping_sub(1 << 26);

        // Select h if h < p, else h - p, without branching
        let select_g = (g4 >> 31).wrapping_sub(1);
        let select_h = !select_g;
        h0 = (h0 & select_h) | (g0 & select_g);
        h1 = (h1 & select_h) | (g1 & select_g);
        h2 = (h2 & select_h) | (g2 & select_g);
        h3 = (h3 & select_h) | (g3 & select_g);
        h4 = (h4 & select_h) | (g4 & select_g);

        // h = h % 2^128, then add the pad
        let words = [
            h0 | (h1 << 26),
            (h1 >> 6) | (h2 << 20),
            (h2 >> 12) | (h3 << 14),
            (h3 >> 18) | (h4 << 8),
        ];

        let mut tag = [0u8; POLY1305_TAG_SIZE];
        let mut f = 0u64;
        for (i, (word, pad)) in words.iter().zip(self.pad.iter()).enumerate() {
            f = u64::from(*word) + u64::from(*pad) + (f >> 32);
            LittleEndian::write_u32(&mut tag[i * 4..], f as u32);
        }
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_from_hex(s: &str) -> [u8; 32] {
        let mut key = [0u8; 32];
        key.copy_from_slice(&hex::decode(s).unwrap());
        key
    }

    #[test]
    fn test_poly1305_rfc8439() {
        let key = key_from_hex("85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b");
        let mut mac = Poly1305::new(&key);
        mac.update(b"Cryptographic Forum Research Group");
        assert_eq!(hex::encode(mac.finalize()), "a8061dc1305136c6c22b8baf0c0127a9");
    }

    #[test]
    fn test_poly1305_chunked() {
        let key = key_from_hex("85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b");
        let mut mac = Poly1305::new(&key);
        let pieces: [&[u8]; 4] = [b"Cryptographic ", b"Forum", b" Research", b" Group"];
        for piece in pieces {
            mac.update(piece);
        }
        assert_eq!(hex::encode(mac.finalize()), "a8061dc1305136c6c22b8baf0c0127a9");
    }

    #[test]
    fn test_poly1305_zero_key() {
        // r = 0 and s = 0 authenticate everything to zero
        let mut mac = Poly1305::new(&[0u8; 32]);
        mac.update(&[0xffu8; 100]);
        assert_eq!(mac.finalize(), [0u8; 16]);
    }
}
