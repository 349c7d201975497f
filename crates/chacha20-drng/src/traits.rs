// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::time::Instant;

use crate::error::EntropyError;

/// Source of fresh, unpredictable bytes used to seed the generator.
pub trait EntropySource {
    /// Fills `dest` entirely or fails without partial-success semantics.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

impl<T: EntropySource + ?Sized> EntropySource for &T {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}

/// Monotonic time plus a high-resolution sample for mixing.
pub trait Clock {
    /// Monotonic instant used for the time-based reseed policy.
    fn now(&self) -> Instant;

    /// Opaque high-resolution sample. Auxiliary input only, never relied on
    /// as entropy.
    fn timestamp(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn timestamp(&self) -> u64 {
        (**self).timestamp()
    }
}
