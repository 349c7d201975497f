// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PortableBuffer - Standard heap allocation, zeroized on release.
//!
//! Works everywhere but is never pinned. Used when `PageBuffer` is not
//! available on the target.

use zeroize::Zeroize;

use crate::error::BufferError;
use crate::traits::Buffer;

/// Heap-backed buffer without pinning.
pub struct PortableBuffer {
    inner: Vec<u8>,
    disposed: bool,
}

impl PortableBuffer {
    /// Allocates a zeroed buffer of `len` bytes.
    pub fn create(len: usize) -> Self {
        Self {
            inner: vec![0u8; len],
            disposed: false,
        }
    }
}

impl core::fmt::Debug for PortableBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PortableBuffer")
            .field("len", &self.inner.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl Buffer for PortableBuffer {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        if self.disposed {
            return Err(BufferError::PageNoLongerAvailable);
        }

        f(&self.inner)
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        if self.disposed {
            return Err(BufferError::PageNoLongerAvailable);
        }

        f(&mut self.inner)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn is_locked(&self) -> bool {
        false
    }

    fn dispose(&mut self) {
        // Vec::zeroize wipes the full capacity before truncating.
        self.inner.zeroize();
        self.disposed = true;
    }
}

impl Drop for PortableBuffer {
    fn drop(&mut self) {
        self.dispose();
    }
}
