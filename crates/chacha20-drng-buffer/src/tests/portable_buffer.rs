// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cell::Cell;

use chacha20_drng_util::{fill_bytes_with_pattern, is_slice_zeroized};

use crate::error::BufferError;
use crate::portable_buffer::PortableBuffer;
use crate::traits::Buffer;

#[test]
fn test_portable_buffer_happypath() {
    let mut portable_buffer = PortableBuffer::create(10);

    // Zero initialized
    {
        let callback_executed = Cell::new(false);
        portable_buffer
            .open(&mut |bytes| {
                callback_executed.set(true);
                assert!(is_slice_zeroized(bytes));
                Ok(())
            })
            .expect("Failed to open(..)");
        assert!(callback_executed.get());
    }

    // Fill with pattern
    portable_buffer
        .open_mut(&mut |bytes| {
            fill_bytes_with_pattern(bytes, 1);
            Ok(())
        })
        .expect("Failed to open_mut(..)");

    // Not zeroized
    portable_buffer
        .open(&mut |bytes| {
            assert!(!is_slice_zeroized(bytes));
            Ok(())
        })
        .expect("Failed to open(..)");
}

#[test]
fn test_portable_buffer_is_never_locked() {
    let portable_buffer = PortableBuffer::create(10);

    assert!(!portable_buffer.is_locked());
    assert_eq!(portable_buffer.len(), 10);
    assert!(!portable_buffer.is_empty());
}

#[test]
fn test_portable_buffer_dispose() {
    let mut portable_buffer = PortableBuffer::create(10);
    portable_buffer
        .open_mut(&mut |bytes| {
            fill_bytes_with_pattern(bytes, 0xEE);
            Ok(())
        })
        .expect("Failed to open_mut(..)");

    portable_buffer.dispose();
    portable_buffer.dispose();

    assert!(matches!(
        portable_buffer.open(&mut |_| Ok(())),
        Err(BufferError::PageNoLongerAvailable)
    ));
    assert!(format!("{:?}", portable_buffer).contains("disposed: true"));
}
