// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::version::{
    VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH, version, version_string, write_version_string,
};

#[test]
fn test_version_number() {
    assert_eq!(version(), 1_010_000);
    assert_eq!(
        version(),
        VERSION_MAJOR * 1_000_000 + VERSION_MINOR * 10_000 + VERSION_PATCH * 100
    );
}

#[test]
fn test_version_string_matches_components() {
    assert_eq!(version_string(), "ChaCha20 DRNG 1.1.0");
    assert!(version_string().ends_with(&format!(
        "{}.{}.{}",
        VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH
    )));
}

#[test]
fn test_write_version_string_empty_buffer() {
    let mut buf: [u8; 0] = [];

    assert_eq!(write_version_string(&mut buf), 0);
}

#[test]
fn test_write_version_string_truncates() {
    let mut buf = [0xFFu8; 1];
    assert_eq!(write_version_string(&mut buf), 0);
    assert_eq!(buf, [0]);

    let mut buf = [0xFFu8; 6];
    assert_eq!(write_version_string(&mut buf), 5);
    assert_eq!(&buf, b"ChaCh\0");
}

#[test]
fn test_write_version_string_exact_and_larger() {
    let full = version_string().as_bytes();

    let mut exact = vec![0xFFu8; full.len() + 1];
    assert_eq!(write_version_string(&mut exact), full.len());
    assert_eq!(&exact[..full.len()], full);
    assert_eq!(exact[full.len()], 0);

    // One short of room for the NUL: last character is dropped.
    let mut short = vec![0xFFu8; full.len()];
    assert_eq!(write_version_string(&mut short), full.len() - 1);
    assert_eq!(short[full.len() - 1], 0);

    let mut larger = [0xFFu8; 64];
    assert_eq!(write_version_string(&mut larger), full.len());
    assert_eq!(larger[full.len()], 0);
    assert!(larger[full.len() + 1..].iter().all(|&b| b == 0xFF));
}
