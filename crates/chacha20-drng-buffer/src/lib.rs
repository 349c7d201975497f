// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Pinned memory for DRNG secrets with zeroization on every release path.
//!
//! # Buffer Types
//!
//! ## PageBuffer (Unix only)
//!
//! - `mmap`'d, page-aligned allocation
//! - `mlock` through a [`MemoryLock`] capability to keep the page out of swap
//! - Optional `mprotect` toggling ([`ProtectionStrategy::MemProtected`])
//! - `MADV_DONTDUMP` on Linux so the page stays out of core dumps
//! - Zeroized, unlocked and unmapped on [`Buffer::dispose`] or drop
//!
//! ## PortableBuffer
//!
//! Heap fallback for targets without `mmap`/`mlock`. Zeroized on release but
//! never pinned, so [`Buffer::is_locked`] is always `false`.
//!
//! A failed `mlock` is not fatal: the buffer is still returned, reports
//! `is_locked() == false`, and the caller decides whether reduced assurance is
//! acceptable.
//!
//! # Example
//!
//! ```rust
//! use chacha20_drng_buffer::{Buffer, BufferError, PortableBuffer};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = PortableBuffer::create(48);
//!
//!     buffer.open_mut(&mut |slice: &mut [u8]| {
//!         slice[0] = 42;
//!         Ok(())
//!     })?;
//!
//!     buffer.open(&mut |slice: &[u8]| {
//!         assert_eq!(slice[0], 42);
//!         Ok(())
//!     })?;
//!
//!     buffer.dispose();
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

#[cfg(unix)]
mod page;
#[cfg(unix)]
mod page_buffer;

mod error;
mod lock;
mod portable_buffer;
mod support;
mod traits;

#[cfg(unix)]
pub use page_buffer::PageBuffer;

pub use error::{BufferError, PageError};
pub use lock::{MemoryLock, SystemMemoryLock};
pub use portable_buffer::PortableBuffer;
pub use traits::{Buffer, ProtectionStrategy};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
