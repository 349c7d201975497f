// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::BufferError;

/// Memory protection strategy for page-backed buffers.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum ProtectionStrategy {
    /// mlock + mprotect toggling (PROT_NONE while closed)
    MemProtected,
    /// mlock only (no mprotect toggling)
    #[default]
    MemNonProtected,
}

/// Trait for buffer types that provide temporary access to their contents.
pub trait Buffer: Send + Sync + core::fmt::Debug {
    /// Opens the buffer for read-only access, executing the provided closure.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::PageNoLongerAvailable`] after [`Buffer::dispose`],
    /// a page error if protection toggling fails, or whatever the closure returns.
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError>;

    /// Opens the buffer for mutable access, executing the provided closure.
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::open`].
    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError>;

    /// Returns the length of the buffer in bytes.
    fn len(&self) -> usize;

    /// Returns true if the buffer has zero length.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true while the backing memory is pinned in RAM.
    fn is_locked(&self) -> bool;

    /// Zeroizes the contents and releases the backing memory.
    ///
    /// Idempotent and infallible: every later `open`/`open_mut` fails with
    /// [`BufferError::PageNoLongerAvailable`].
    fn dispose(&mut self);
}
