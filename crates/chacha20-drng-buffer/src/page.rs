// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Page - Low-level mmap'd memory with protection primitives.
//!
//! Each syscall is exposed separately so `PageBuffer` can sequence them and
//! tests can exercise them one at a time.

use core::ptr;
use core::sync::atomic::{AtomicBool, Ordering};

use chacha20_drng_util::fast_zeroize_slice;

use crate::error::PageError;
use crate::lock::MemoryLock;

/// One or more contiguous pages obtained from `mmap`.
///
/// Tracks protection state internally via AtomicBool so disposal never has to
/// trust an `mprotect` return value.
#[derive(Debug)]
pub(crate) struct Page {
    ptr: *mut u8,
    capacity: usize,
    is_protected: AtomicBool,
}

unsafe impl Send for Page {}
unsafe impl Sync for Page {}

pub(crate) fn system_page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

    if size <= 0 { 4096 } else { size as usize }
}

impl Page {
    /// Maps enough zeroed pages to hold `len` bytes. Does NOT lock or protect.
    pub fn new(len: usize) -> Result<Self, PageError> {
        let page_size = system_page_size();
        let capacity = len.max(1).div_ceil(page_size) * page_size;

        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                capacity,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(PageError::Create);
        }

        let mut page = Self {
            capacity,
            ptr: ptr as *mut u8,
            is_protected: AtomicBool::new(false),
        };

        unsafe { page.zeroize() };

        Ok(page)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_disposed(&self) -> bool {
        self.ptr.is_null()
    }

    /// Pins the page in RAM through the given capability.
    pub fn lock_with(&self, lock: &dyn MemoryLock) -> Result<(), PageError> {
        lock.lock(self.ptr as *const u8, self.capacity)
    }

    pub fn unlock_with(&self, lock: &dyn MemoryLock) {
        lock.unlock(self.ptr as *const u8, self.capacity);
    }

    /// Keeps the page out of core dumps.
    #[cfg(target_os = "linux")]
    pub fn exclude_from_dump(&self) -> Result<(), PageError> {
        let failed = unsafe {
            libc::madvise(
                self.ptr as *mut libc::c_void,
                self.capacity,
                libc::MADV_DONTDUMP,
            )
        } != 0;

        if failed {
            return Err(PageError::Madvise);
        }

        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    pub fn exclude_from_dump(&self) -> Result<(), PageError> {
        Ok(())
    }

    /// Sets page to PROT_NONE (no read/write access).
    pub fn protect(&self) -> Result<(), PageError> {
        let failed =
            unsafe { libc::mprotect(self.ptr as *mut _, self.capacity, libc::PROT_NONE) } != 0;

        if failed {
            return Err(PageError::Protect);
        }

        self.is_protected.store(true, Ordering::Release);

        Ok(())
    }

    /// Sets page to PROT_READ | PROT_WRITE.
    pub fn unprotect(&self) -> Result<(), PageError> {
        let failed = unsafe {
            libc::mprotect(
                self.ptr as *mut _,
                self.capacity,
                libc::PROT_READ | libc::PROT_WRITE,
            )
        } != 0;

        if failed {
            return Err(PageError::Unprotect);
        }

        self.is_protected.store(false, Ordering::Release);

        Ok(())
    }

    pub fn is_protected(&self) -> bool {
        self.is_protected.load(Ordering::Acquire)
    }

    /// Returns a slice view of the page.
    ///
    /// # Safety
    /// Page must be mapped and unprotected, otherwise SIGSEGV.
    pub unsafe fn as_slice(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.ptr, self.capacity) }
    }

    /// Returns a mutable slice view of the page.
    ///
    /// # Safety
    /// Page must be mapped and unprotected, otherwise SIGSEGV.
    pub unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr, self.capacity) }
    }

    /// Zeroizes the page contents.
    ///
    /// # Safety
    /// Page must be mapped and unprotected, otherwise SIGSEGV.
    pub unsafe fn zeroize(&mut self) {
        fast_zeroize_slice(unsafe { self.as_mut_slice() });
    }

    /// Best effort wipe: unprotect if needed, then zeroize if writable.
    ///
    /// If unprotect fails the page stays PROT_NONE, which is safe as well.
    pub fn wipe(&mut self) {
        if self.is_disposed() {
            return;
        }

        if self.is_protected() {
            let _ = self.unprotect();
        }

        if !self.is_protected() {
            unsafe { self.zeroize() };
        }
    }

    /// Unmaps the page. Idempotent.
    pub fn unmap(&mut self) {
        if self.is_disposed() {
            return;
        }

        unsafe { libc::munmap(self.ptr as *mut libc::c_void, self.capacity) };
        self.ptr = ptr::null_mut();
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.wipe();
        self.unmap();
    }
}
