// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Library version.

/// Major version.
pub const VERSION_MAJOR: u32 = 1;
/// Minor version.
pub const VERSION_MINOR: u32 = 1;
/// Patch level.
pub const VERSION_PATCH: u32 = 0;

const VERSION_STRING: &str = "ChaCha20 DRNG 1.1.0";

/// Monotonic version number: `major * 1_000_000 + minor * 10_000 + patch * 100`.
pub const fn version() -> u32 {
    VERSION_MAJOR * 1_000_000 + VERSION_MINOR * 10_000 + VERSION_PATCH * 100
}

/// Human-readable version, e.g. `"ChaCha20 DRNG 1.1.0"`.
pub const fn version_string() -> &'static str {
    VERSION_STRING
}

/// Copies [`version_string`] into `buf` as a NUL-terminated string.
///
/// Output is truncated to fit; an empty `buf` is left untouched. Returns the
/// number of bytes written before the terminating NUL.
///
/// ```rust
/// let mut buf = [0xFFu8; 9];
/// let written = chacha20_drng::write_version_string(&mut buf);
///
/// assert_eq!(written, 8);
/// assert_eq!(&buf, b"ChaCha20\0");
/// ```
pub fn write_version_string(buf: &mut [u8]) -> usize {
    let Some(room) = buf.len().checked_sub(1) else {
        return 0;
    };

    let written = room.min(VERSION_STRING.len());
    buf[..written].copy_from_slice(&VERSION_STRING.as_bytes()[..written]);
    buf[written] = 0;

    written
}
