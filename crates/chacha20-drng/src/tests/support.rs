// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Shared fixtures for the unit tests.

use std::sync::{Arc, Mutex};

use chacha20_drng_buffer::{Buffer, BufferError};

use crate::chacha20::ChaCha20;
use crate::consts::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE};
use crate::drng::Drng;
use crate::test_utils::{MockClock, MockEntropySource, MockMemoryLock, MockMemoryLockBehaviour};

/// Pinned (mocked) DRNG over borrowed mocks.
pub(crate) fn mock_drng<'a>(
    entropy: &'a MockEntropySource,
    clock: &'a MockClock,
) -> Drng<&'a MockEntropySource, &'a MockClock> {
    Drng::builder()
        .entropy(entropy)
        .clock(clock)
        .memory_lock(MockMemoryLock::new(
            MockMemoryLockBehaviour::SucceedWithoutLocking,
        ))
        .build()
        .expect("Failed to build()")
}

/// One keystream block computed on throwaway scratch.
pub(crate) fn block(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32) -> [u8; BLOCK_SIZE] {
    let mut scratch = [[0u8; BLOCK_SIZE]; 3];
    let [initial, working, keystream] = &mut scratch;
    let mut cipher = ChaCha20::new(initial, working, keystream);

    cipher.generate_block(key, nonce, counter);
    *cipher.keystream()
}

/// Heap buffer whose bytes stay observable after the DRNG lets go of it.
///
/// `dispose` only marks the buffer; it does NOT wipe, so any zeroes seen
/// afterwards were written by the owner.
#[derive(Debug, Clone)]
pub(crate) struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    disposed: Arc<Mutex<bool>>,
    locked: bool,
}

impl SharedBuffer {
    pub fn new(len: usize, locked: bool) -> Self {
        Self {
            bytes: Arc::new(Mutex::new(vec![0u8; len])),
            disposed: Arc::new(Mutex::new(false)),
            locked,
        }
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.bytes.lock().expect("Failed to lock bytes").clone()
    }

    pub fn is_disposed(&self) -> bool {
        *self.disposed.lock().expect("Failed to lock disposed")
    }
}

impl Buffer for SharedBuffer {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        if self.is_disposed() {
            return Err(BufferError::PageNoLongerAvailable);
        }

        f(&self.bytes.lock().expect("Failed to lock bytes"))
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        if self.is_disposed() {
            return Err(BufferError::PageNoLongerAvailable);
        }

        f(&mut self.bytes.lock().expect("Failed to lock bytes"))
    }

    fn len(&self) -> usize {
        self.bytes.lock().expect("Failed to lock bytes").len()
    }

    fn is_locked(&self) -> bool {
        self.locked && !self.is_disposed()
    }

    fn dispose(&mut self) {
        *self.disposed.lock().expect("Failed to lock disposed") = true;
    }
}
