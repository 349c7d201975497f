// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::PageError;
use crate::lock::{MemoryLock, SystemMemoryLock};

/// Configurable behavior for [`MockMemoryLock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMemoryLockBehaviour {
    /// Normal operation (delegates to [`SystemMemoryLock`]).
    None,
    /// Report success without pinning anything.
    SucceedWithoutLocking,
    /// Always refuse to pin.
    FailAlways,
}

/// Mock memory lock for testing.
///
/// Clones share their counters, so a test can keep one handle while the
/// buffer owns the other.
#[derive(Debug, Clone)]
pub struct MockMemoryLock {
    inner: SystemMemoryLock,
    behaviour: MockMemoryLockBehaviour,
    lock_count: Arc<AtomicUsize>,
    unlock_count: Arc<AtomicUsize>,
}

impl MockMemoryLock {
    /// Creates a new mock memory lock with the specified behavior.
    pub fn new(behaviour: MockMemoryLockBehaviour) -> Self {
        Self {
            inner: SystemMemoryLock,
            behaviour,
            lock_count: Arc::new(AtomicUsize::new(0)),
            unlock_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many times `lock` was called.
    pub fn lock_count(&self) -> usize {
        self.lock_count.load(Ordering::SeqCst)
    }

    /// Returns how many times `unlock` was called.
    pub fn unlock_count(&self) -> usize {
        self.unlock_count.load(Ordering::SeqCst)
    }
}

impl MemoryLock for MockMemoryLock {
    fn lock(&self, ptr: *const u8, len: usize) -> Result<(), PageError> {
        self.lock_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour {
            MockMemoryLockBehaviour::None => self.inner.lock(ptr, len),
            MockMemoryLockBehaviour::SucceedWithoutLocking => Ok(()),
            MockMemoryLockBehaviour::FailAlways => Err(PageError::Lock),
        }
    }

    fn unlock(&self, ptr: *const u8, len: usize) {
        self.unlock_count.fetch_add(1, Ordering::SeqCst);

        if self.behaviour == MockMemoryLockBehaviour::None {
            self.inner.unlock(ptr, len);
        }
    }
}
