// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ChaCha20 block function (RFC 8439 §2.3).
//!
//! [`ChaCha20`] owns no memory. It borrows three 64-byte scratch blocks from
//! the caller (the pinned state page for the generator) and keeps every state
//! word there as little-endian bytes, so the key never leaves that region.

use zeroize::Zeroize;

use crate::consts::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE, SIGMA};

const WORDS: usize = BLOCK_SIZE / 4;

const KEY_OFFSET: usize = SIGMA.len();
const COUNTER_OFFSET: usize = KEY_OFFSET + KEY_SIZE;
const NONCE_OFFSET: usize = COUNTER_OFFSET + 4;

/// Column round followed by diagonal round.
const DOUBLE_ROUND: [[usize; 4]; 8] = [
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [1, 6, 11, 12],
    [2, 7, 8, 13],
    [3, 4, 9, 14],
];

#[inline(always)]
fn load(block: &[u8; BLOCK_SIZE], word: usize) -> u32 {
    let at = word * 4;
    u32::from_le_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
}

#[inline(always)]
fn store(block: &mut [u8; BLOCK_SIZE], word: usize, value: u32) {
    let at = word * 4;
    block[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Block function running on borrowed scratch.
pub(crate) struct ChaCha20<'a> {
    initial: &'a mut [u8; BLOCK_SIZE],
    working: &'a mut [u8; BLOCK_SIZE],
    keystream: &'a mut [u8; BLOCK_SIZE],
}

impl<'a> ChaCha20<'a> {
    pub fn new(
        initial: &'a mut [u8; BLOCK_SIZE],
        working: &'a mut [u8; BLOCK_SIZE],
        keystream: &'a mut [u8; BLOCK_SIZE],
    ) -> Self {
        Self {
            initial,
            working,
            keystream,
        }
    }

    /// Serialized input block: the little-endian encoding of the state words
    /// is the byte concatenation `sigma | key | counter | nonce`.
    fn init_state(&mut self, key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32) {
        let (sigma, rest) = self.initial.split_at_mut(KEY_OFFSET);
        let (key_words, rest) = rest.split_at_mut(KEY_SIZE);
        let (counter_word, nonce_words) = rest.split_at_mut(NONCE_OFFSET - COUNTER_OFFSET);

        sigma.copy_from_slice(SIGMA);
        key_words.copy_from_slice(key);
        counter_word.copy_from_slice(&counter.to_le_bytes());
        nonce_words.copy_from_slice(nonce);
    }

    #[inline(always)]
    fn quarter_round(&mut self, [a, b, c, d]: [usize; 4]) {
        let w = &mut *self.working;
        let (mut va, mut vb, mut vc, mut vd) = (load(w, a), load(w, b), load(w, c), load(w, d));

        va = va.wrapping_add(vb);
        vd = (vd ^ va).rotate_left(16);
        vc = vc.wrapping_add(vd);
        vb = (vb ^ vc).rotate_left(12);
        va = va.wrapping_add(vb);
        vd = (vd ^ va).rotate_left(8);
        vc = vc.wrapping_add(vd);
        vb = (vb ^ vc).rotate_left(7);

        store(w, a, va);
        store(w, b, vb);
        store(w, c, vc);
        store(w, d, vd);
    }

    /// Computes one keystream block into the scratch.
    ///
    /// The result stays readable through [`ChaCha20::keystream`] until the
    /// next call or [`ChaCha20::clear_keystream`]. Input and working blocks
    /// are wiped before returning.
    pub fn generate_block(&mut self, key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32) {
        self.init_state(key, nonce, counter);
        self.working.copy_from_slice(&self.initial[..]);

        for _ in 0..10 {
            for indices in DOUBLE_ROUND {
                self.quarter_round(indices);
            }
        }

        for word in 0..WORDS {
            let sum = load(&*self.working, word).wrapping_add(load(&*self.initial, word));
            store(self.keystream, word, sum);
        }

        self.initial.zeroize();
        self.working.zeroize();
    }

    pub fn keystream(&self) -> &[u8; BLOCK_SIZE] {
        &*self.keystream
    }

    pub fn clear_keystream(&mut self) {
        self.keystream.zeroize();
    }

    #[cfg(test)]
    pub fn is_zeroized(&self) -> bool {
        [&*self.initial, &*self.working, &*self.keystream]
            .iter()
            .all(|block| block.iter().all(|&b| b == 0))
    }
}

impl core::fmt::Debug for ChaCha20<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ChaCha20 {{ [protected] }}")
    }
}
