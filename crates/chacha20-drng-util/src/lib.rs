// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Byte helpers used by the ChaCha20 DRNG.
//!
//! Conversion functions zeroize their source after reading so that key words
//! and timestamps do not linger in temporaries.

#![cfg_attr(not(test), no_std)]

/// Fills a byte slice with a repeating pattern byte.
///
/// # Example
///
/// ```
/// use chacha20_drng_util::fill_bytes_with_pattern;
///
/// let mut buffer = [0u8; 8];
/// fill_bytes_with_pattern(&mut buffer, 0xAB);
/// assert!(buffer.iter().all(|&b| b == 0xAB));
/// ```
#[inline]
pub fn fill_bytes_with_pattern(slice: &mut [u8], pattern: u8) {
    for byte in slice.iter_mut() {
        *byte = pattern;
    }
}

/// XORs `src` into the front of `dst`.
///
/// Only `min(dst.len(), src.len())` bytes are touched.
///
/// # Example
///
/// ```
/// use chacha20_drng_util::xor_in_place;
///
/// let mut key = [0xF0u8; 4];
/// xor_in_place(&mut key, &[0x0F, 0xF0]);
/// assert_eq!(key, [0xFF, 0x00, 0xF0, 0xF0]);
/// ```
#[inline]
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= *s;
    }
}

/// Generates `{type}_from_le` and `{type}_to_le` functions for integer types.
macro_rules! impl_le_conversions {
    ($type:ty, $size:expr, $fn_from:ident, $fn_to:ident) => {
        #[doc = concat!("Converts ", stringify!($size), " bytes to a little-endian `", stringify!($type), "`, zeroizing the source bytes.")]
        #[inline(always)]
        pub fn $fn_from(dst: &mut $type, bytes: &mut [u8; $size]) {
            *dst = 0;
            for (i, byte) in bytes.iter_mut().enumerate() {
                *dst |= (*byte as $type) << (8 * i);
                *byte = 0;
            }
        }

        #[doc = concat!("Converts a `", stringify!($type), "` to little-endian bytes, zeroizing the source.")]
        #[inline(always)]
        pub fn $fn_to(src: &mut $type, bytes: &mut [u8; $size]) {
            for (i, byte) in bytes.iter_mut().enumerate() {
                *byte = (*src >> (8 * i)) as u8;
            }
            *src = 0;
        }
    };
}

impl_le_conversions!(u32, 4, u32_from_le, u32_to_le);
impl_le_conversions!(u64, 8, u64_from_le, u64_to_le);

/// Verifies that a slice is zeroized.
///
/// # Example
///
/// ```
/// use chacha20_drng_util::is_slice_zeroized;
///
/// assert!(is_slice_zeroized(&[0u8; 10]));
/// assert!(!is_slice_zeroized(&[0u8, 1, 0, 0]));
/// ```
#[inline(always)]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Fast bulk zeroization that can be vectorized.
///
/// Uses `write_bytes` (memset) followed by a volatile read so the optimizer
/// cannot drop the write. Meant for whole pages, where byte-by-byte volatile
/// writes are noticeably slower.
///
/// # Example
///
/// ```
/// use chacha20_drng_util::fast_zeroize_slice;
///
/// let mut words = [0xDEADBEEFu32; 10];
/// fast_zeroize_slice(&mut words);
/// assert!(words.iter().all(|&w| w == 0));
/// ```
#[inline(always)]
pub fn fast_zeroize_slice<T: Copy>(slice: &mut [T]) {
    if slice.is_empty() {
        return;
    }

    let byte_len = core::mem::size_of_val(slice);
    unsafe {
        core::ptr::write_bytes(slice.as_mut_ptr() as *mut u8, 0, byte_len);
        core::ptr::read_volatile(slice.as_ptr() as *const u8);
    }
}
