// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PageBuffer - High-level buffer over a pinned Page.
//!
//! Provides open/open_mut access with automatic protect/unprotect.
//! On protection errors the page is wiped and released, and every later
//! access reports `PageNoLongerAvailable`.

use crate::error::{BufferError, PageError};
use crate::lock::MemoryLock;
use crate::page::Page;
use crate::traits::{Buffer, ProtectionStrategy};

/// A buffer backed by an mmap'd page, pinned when the host allows it.
pub struct PageBuffer {
    page: Page,
    len: usize,
    strategy: ProtectionStrategy,
    lock: Box<dyn MemoryLock>,
    locked: bool,
}

impl PageBuffer {
    /// Maps a zeroed page for `len` bytes and tries to pin it with `lock`.
    ///
    /// A refused pin is logged and reflected by [`Buffer::is_locked`]; it is
    /// not an error here.
    ///
    /// # Errors
    ///
    /// [`PageError::Create`] if `mmap` fails, [`PageError::Protect`] if the
    /// initial `mprotect` of a [`ProtectionStrategy::MemProtected`] buffer fails.
    pub fn new(
        strategy: ProtectionStrategy,
        len: usize,
        lock: Box<dyn MemoryLock>,
    ) -> Result<Self, PageError> {
        let page = Page::new(len)?;

        let locked = match page.lock_with(lock.as_ref()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, capacity = page.capacity(), "page could not be pinned in RAM");
                false
            }
        };

        if let Err(e) = page.exclude_from_dump() {
            tracing::warn!(error = %e, "page stays eligible for core dumps");
        }

        let mut buffer = Self {
            page,
            len,
            strategy,
            lock,
            locked,
        };

        if strategy == ProtectionStrategy::MemProtected {
            if let Err(e) = buffer.page.protect() {
                buffer.dispose();
                return Err(e);
            }
        }

        Ok(buffer)
    }

    /// Returns the protection strategy chosen at creation.
    pub fn strategy(&self) -> ProtectionStrategy {
        self.strategy
    }

    fn maybe_unprotect(&mut self) -> Result<(), PageError> {
        if self.strategy == ProtectionStrategy::MemProtected {
            self.page.unprotect()?;
        }

        Ok(())
    }

    fn maybe_protect(&mut self) -> Result<(), PageError> {
        if self.strategy == ProtectionStrategy::MemProtected {
            self.page.protect()?;
        }

        Ok(())
    }

    fn try_open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        if self.page.is_disposed() {
            return Err(BufferError::PageNoLongerAvailable);
        }

        self.maybe_unprotect()?;

        let slice = unsafe { self.page.as_slice() };
        let result = f(&slice[..self.len]);

        self.maybe_protect()?;

        result
    }

    fn try_open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        if self.page.is_disposed() {
            return Err(BufferError::PageNoLongerAvailable);
        }

        self.maybe_unprotect()?;

        let len = self.len;
        let slice = unsafe { self.page.as_mut_slice() };
        let result = f(&mut slice[..len]);

        self.maybe_protect()?;

        result
    }

    fn dispose_on_page_error(&mut self, result: &Result<(), BufferError>) {
        if let Err(BufferError::Page(e)) = result {
            tracing::error!(error = %e, "page protection failed, releasing page");
            self.dispose();
        }
    }
}

// Safety: PageBuffer owns its mapping exclusively; mutation requires &mut.
unsafe impl Send for PageBuffer {}
unsafe impl Sync for PageBuffer {}

impl core::fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageBuffer")
            .field("len", &self.len)
            .field("strategy", &self.strategy)
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}

impl Buffer for PageBuffer {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        let result = self.try_open(f);
        self.dispose_on_page_error(&result);

        result
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        let result = self.try_open_mut(f);
        self.dispose_on_page_error(&result);

        result
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_locked(&self) -> bool {
        self.locked && !self.page.is_disposed()
    }

    fn dispose(&mut self) {
        if self.page.is_disposed() {
            return;
        }

        self.page.wipe();

        if self.locked {
            self.page.unlock_with(self.lock.as_ref());
            self.locked = false;
        }

        self.page.unmap();
    }
}

impl Drop for PageBuffer {
    fn drop(&mut self) {
        self.dispose();
    }
}
