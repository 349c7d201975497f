// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Known-answer gate for the cipher core.
//!
//! Every allocation runs [`run`] before any state is created. A single
//! mismatched byte rejects the allocation.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::chacha20::ChaCha20;
use crate::consts::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE};
use crate::error::DrngError;

/// One ChaCha20 block known-answer vector.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockVector {
    pub name: &'static str,
    pub key: [u8; KEY_SIZE],
    pub nonce: [u8; NONCE_SIZE],
    pub counter: u32,
    pub expected: [u8; BLOCK_SIZE],
}

pub(crate) const BLOCK_VECTORS: [BlockVector; 2] = [
    // RFC 8439 §2.3.2
    BlockVector {
        name: "rfc8439-2.3.2",
        key: [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
            0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17,
            0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
        ],
        nonce: [
            0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00,
        ],
        counter: 1,
        expected: [
            0x10, 0xf1, 0xe7, 0xe4, 0xd1, 0x3b, 0x59, 0x15,
            0x50, 0x0f, 0xdd, 0x1f, 0xa3, 0x20, 0x71, 0xc4,
            0xc7, 0xd1, 0xf4, 0xc7, 0x33, 0xc0, 0x68, 0x03,
            0x04, 0x22, 0xaa, 0x9a, 0xc3, 0xd4, 0x6c, 0x4e,
            0xd2, 0x82, 0x64, 0x46, 0x07, 0x9f, 0xaa, 0x09,
            0x14, 0xc2, 0xd7, 0x05, 0xd9, 0x8b, 0x02, 0xa2,
            0xb5, 0x12, 0x9c, 0xd1, 0xde, 0x16, 0x4e, 0xb9,
            0xcb, 0xd0, 0x83, 0xe8, 0xa2, 0x50, 0x3c, 0x4e,
        ],
    },
    // RFC 8439 A.1 #1
    BlockVector {
        name: "rfc8439-a.1-1",
        key: [0; KEY_SIZE],
        nonce: [0; NONCE_SIZE],
        counter: 0,
        expected: [
            0x76, 0xb8, 0xe0, 0xad, 0xa0, 0xf1, 0x3d, 0x90,
            0x40, 0x5d, 0x6a, 0xe5, 0x53, 0x86, 0xbd, 0x28,
            0xbd, 0xd2, 0x19, 0xb8, 0xa0, 0x8d, 0xed, 0x1a,
            0xa8, 0x36, 0xef, 0xcc, 0x8b, 0x77, 0x0d, 0xc7,
            0xda, 0x41, 0x59, 0x7c, 0x51, 0x57, 0x48, 0x8d,
            0x77, 0x24, 0xe0, 0x3f, 0xb8, 0xd8, 0x4a, 0x37,
            0x6a, 0x43, 0xb8, 0xf4, 0x15, 0x18, 0xa1, 0x1c,
            0xc3, 0x87, 0xb6, 0x69, 0xb2, 0xee, 0x65, 0x86,
        ],
    },
];

/// Runs the built-in vectors.
pub(crate) fn run() -> Result<(), DrngError> {
    run_vectors(&BLOCK_VECTORS)
}

/// Runs on a stack scratch that is wiped on every exit.
pub(crate) fn run_vectors(vectors: &[BlockVector]) -> Result<(), DrngError> {
    let mut scratch = [[0u8; BLOCK_SIZE]; 3];
    let [initial, working, keystream] = &mut scratch;
    let result = check_vectors(&mut ChaCha20::new(initial, working, keystream), vectors);
    scratch.zeroize();

    result
}

pub(crate) fn check_vectors(
    cipher: &mut ChaCha20<'_>,
    vectors: &[BlockVector],
) -> Result<(), DrngError> {
    for vector in vectors {
        cipher.generate_block(&vector.key, &vector.nonce, vector.counter);
        let matches: bool = cipher.keystream().ct_eq(&vector.expected).into();
        cipher.clear_keystream();

        if !matches {
            tracing::error!(vector = vector.name, "cipher self-test mismatch");
            return Err(DrngError::SelfTestFailed);
        }
    }

    tracing::debug!(vectors = vectors.len(), "cipher self-test passed");

    Ok(())
}
