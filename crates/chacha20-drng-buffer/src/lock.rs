// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Memory pinning capability.

use crate::error::PageError;

/// Capability to pin a memory range in RAM so it is never written to swap.
///
/// Implementations never dereference `ptr`; they only hand the range to the
/// operating system.
pub trait MemoryLock: Send + Sync {
    /// Pins `len` bytes starting at `ptr`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Lock`] if the host refuses (e.g. `RLIMIT_MEMLOCK`
    /// exhausted, missing capability, or no pinning support on this target).
    fn lock(&self, ptr: *const u8, len: usize) -> Result<(), PageError>;

    /// Releases a pin previously established by [`MemoryLock::lock`].
    fn unlock(&self, ptr: *const u8, len: usize);
}

/// `mlock`/`munlock` backed pinning.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMemoryLock;

impl MemoryLock for SystemMemoryLock {
    #[cfg(unix)]
    fn lock(&self, ptr: *const u8, len: usize) -> Result<(), PageError> {
        let failed = unsafe { libc::mlock(ptr as *const libc::c_void, len) } != 0;

        if failed {
            return Err(PageError::Lock);
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn lock(&self, _ptr: *const u8, _len: usize) -> Result<(), PageError> {
        Err(PageError::Lock)
    }

    #[cfg(unix)]
    fn unlock(&self, ptr: *const u8, len: usize) {
        unsafe { libc::munlock(ptr as *const libc::c_void, len) };
    }

    #[cfg(not(unix))]
    fn unlock(&self, _ptr: *const u8, _len: usize) {}
}
