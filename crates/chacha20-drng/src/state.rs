// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! View over the pinned secret state and the keyed transforms applied to it.
//!
//! Layout inside the page: `key[32] | nonce[12] | counter[4] | scratch[192]`
//! (counter is little-endian). The block function runs on the scratch blocks,
//! so key, nonce and keystream never leave the page. Scratch is cleared before
//! every method returns.

use zeroize::Zeroize;

use chacha20_drng_buffer::BufferError;
use chacha20_drng_util::{u64_to_le, xor_in_place};

use crate::chacha20::ChaCha20;
use crate::consts::{BLOCK_SIZE, COUNTER_SIZE, KEY_SIZE, NONCE_SIZE};

#[derive(Debug)]
struct StateTooShort;

/// Mutable borrow of the state bytes split into fields.
pub(crate) struct StateMut<'a> {
    key: &'a mut [u8; KEY_SIZE],
    nonce: &'a mut [u8; NONCE_SIZE],
    counter: &'a mut [u8; COUNTER_SIZE],
    cipher: ChaCha20<'a>,
}

impl<'a> StateMut<'a> {
    pub fn from_bytes(bytes: &'a mut [u8]) -> Result<Self, BufferError> {
        let short = || BufferError::callback_error(StateTooShort);

        let (key, rest) = bytes.split_first_chunk_mut::<KEY_SIZE>().ok_or_else(short)?;
        let (nonce, rest) = rest.split_first_chunk_mut::<NONCE_SIZE>().ok_or_else(short)?;
        let (counter, rest) = rest.split_first_chunk_mut::<COUNTER_SIZE>().ok_or_else(short)?;
        let (initial, rest) = rest.split_first_chunk_mut::<BLOCK_SIZE>().ok_or_else(short)?;
        let (working, rest) = rest.split_first_chunk_mut::<BLOCK_SIZE>().ok_or_else(short)?;
        let (keystream, _) = rest.split_first_chunk_mut::<BLOCK_SIZE>().ok_or_else(short)?;

        Ok(Self {
            key,
            nonce,
            counter,
            cipher: ChaCha20::new(initial, working, keystream),
        })
    }

    pub fn counter(&self) -> u32 {
        u32::from_le_bytes(*self.counter)
    }

    pub fn set_counter(&mut self, counter: u32) {
        *self.counter = counter.to_le_bytes();
    }

    /// XORs a timestamp sample into the low 8 nonce bytes.
    pub fn mix_timestamp(&mut self, mut timestamp: u64) {
        let mut le_bytes = [0u8; 8];
        u64_to_le(&mut timestamp, &mut le_bytes);
        xor_in_place(&mut self.nonce[..8], &le_bytes);
        le_bytes.zeroize();
    }

    /// Folds `material` into key and nonce, 32 bytes at a time.
    ///
    /// Each chunk is XORed into the key, then the state is put through
    /// [`StateMut::update`], so the outgoing key participates in the result.
    /// Leaves the counter at zero.
    pub fn absorb(&mut self, material: &[u8]) {
        for chunk in material.chunks(KEY_SIZE) {
            xor_in_place(self.key, chunk);
            self.update();
        }

        self.set_counter(0);
    }

    /// `key ^= ks[0..32]`, `nonce ^= ks[32..44]` with `ks` the block at the
    /// current counter.
    fn update(&mut self) {
        let counter = self.counter();
        self.cipher.generate_block(self.key, self.nonce, counter);

        let keystream = self.cipher.keystream();
        xor_in_place(self.key, &keystream[..KEY_SIZE]);
        xor_in_place(self.nonce, &keystream[KEY_SIZE..KEY_SIZE + NONCE_SIZE]);

        self.cipher.clear_keystream();
    }

    /// Replaces key and nonce with a block that is never emitted, then resets
    /// the counter.
    ///
    /// The old key is overwritten in place, so the state no longer determines
    /// any earlier output.
    pub fn rekey(&mut self) {
        let counter = self.counter();
        self.cipher.generate_block(self.key, self.nonce, counter);

        let keystream = self.cipher.keystream();
        self.key.copy_from_slice(&keystream[..KEY_SIZE]);
        self.nonce
            .copy_from_slice(&keystream[KEY_SIZE..KEY_SIZE + NONCE_SIZE]);

        self.cipher.clear_keystream();
        self.set_counter(0);
    }

    /// Fills `out` with consecutive keystream blocks.
    ///
    /// The counter never wraps: the block at `u32::MAX` is consumed by a
    /// re-key instead of being emitted.
    pub fn generate(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(BLOCK_SIZE) {
            if self.counter() == u32::MAX {
                tracing::debug!("block counter exhausted, re-keying");
                self.rekey();
            }

            let counter = self.counter();
            self.cipher.generate_block(self.key, self.nonce, counter);
            chunk.copy_from_slice(&self.cipher.keystream()[..chunk.len()]);
            self.set_counter(counter + 1);
        }

        self.cipher.clear_keystream();
    }
}

impl core::fmt::Debug for StateMut<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateMut")
            .field("key", &"[REDACTED]")
            .field("nonce", &"[REDACTED]")
            .field("counter", &self.counter())
            .finish()
    }
}
