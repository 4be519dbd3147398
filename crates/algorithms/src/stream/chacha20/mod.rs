//! ChaCha20 stream cipher implementation
//!
//! This module implements the ChaCha20 stream cipher as defined in RFC 8439.

use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::Nonce;
use opencrypto_common::security::EphemeralSecret;
use opencrypto_params::utils::symmetric::{
    CHACHA20_BLOCK_SIZE, CHACHA20_KEY_SIZE, CHACHA20_NONCE_SIZE,
};

/// ChaCha20 stream cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct ChaCha20 {
    /// Constants, key, counter and nonce words
    state: [u32; 16],
    /// Keystream buffer
    buffer: [u8; CHACHA20_BLOCK_SIZE],
    /// Current position in the buffer
    position: usize,
    /// Current block counter
    counter: u32,
}

impl ChaCha20 {
    /// Creates a new ChaCha20 instance with the specified key, nonce, and counter
    pub(crate) fn with_counter(
        key: &[u8; CHACHA20_KEY_SIZE],
        nonce: &Nonce<CHACHA20_NONCE_SIZE>,
        counter: u32,
    ) -> Self {
        let mut state = [0u32; 16];

        // "expand 32-byte k" in little-endian
        state[0] = 0x61707865;
        state[1] = 0x3320646e;
        state[2] = 0x79622d32;
        state[3] = 0x6b206574;

        LittleEndian::read_u32_into(key, &mut state[4..12]);
        state[12] = counter;
        LittleEndian::read_u32_into(nonce.as_ref(), &mut state[13..16]);

        Self {
            state,
            buffer: [0; CHACHA20_BLOCK_SIZE],
            position: CHACHA20_BLOCK_SIZE, // Force initial keystream generation
            counter,
        }
    }

    /// The ChaCha20 quarter round function
    #[inline]
    fn quarter_round(state: &mut [u32], a: usize, b: usize, c: usize, d: usize) {
        state[a] = state[a].wrapping_add(state[b]);
        state[d] ^= state[a];
        state[d] = state[d].rotate_left(16);

        state[c] = state[c].wrapping_add(state[d]);
        state[b] ^= state[c];
        state[b] = state[b].rotate_left(12);

        state[a] = state[a].wrapping_add(state[b]);
        state[d] ^= state[a];
        state[d] = state[d].rotate_left(8);

        state[c] = state[c].wrapping_add(state[d]);
        state[b] ^= state[c];
        state[b] = state[b].rotate_left(7);
    }

    /// Generate a block of keystream
    fn generate_keystream(&mut self) {
        let mut input = EphemeralSecret::new(self.state);
        input[12] = self.counter;
        let mut working = EphemeralSecret::new(*input);

        // 20 rounds of ChaCha20: 10 column rounds, 10 diagonal rounds
        for _ in 0..10 {
            Self::quarter_round(&mut working[..], 0, 4, 8, 12);
            Self::quarter_round(&mut working[..], 1, 5, 9, 13);
            Self::quarter_round(&mut working[..], 2, 6, 10, 14);
            Self::quarter_round(&mut working[..], 3, 7, 11, 15);

            Self::quarter_round(&mut working[..], 0, 5, 10, 15);
            Self::quarter_round(&mut working[..], 1, 6, 11, 12);
            Self::quarter_round(&mut working[..], 2, 7, 8, 13);
            Self::quarter_round(&mut working[..], 3, 4, 9, 14);
        }

        for (chunk, (w, i)) in self
            .buffer
            .chunks_exact_mut(4)
            .zip(working.iter().zip(input.iter()))
        {
            LittleEndian::write_u32(chunk, w.wrapping_add(*i));
        }

        self.position = 0;
        self.counter = self.counter.wrapping_add(1);
    }

    /// Encrypt or decrypt data in place
    pub(crate) fn process(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            if self.position >= CHACHA20_BLOCK_SIZE {
                self.generate_keystream();
            }
            *byte ^= self.buffer[self.position];
            self.position += 1;
        }
    }

    /// Write raw keystream into `output`, starting at a block boundary
    pub(crate) fn keystream(&mut self, output: &mut [u8]) {
        output.zeroize();
        self.position = CHACHA20_BLOCK_SIZE;
        self.process(output);
    }
}
