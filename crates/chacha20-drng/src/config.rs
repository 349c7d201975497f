// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::time::Duration;

use chacha20_drng_buffer::ProtectionStrategy;

use crate::consts::{
    DEFAULT_MAX_BYTES_BETWEEN_RESEEDS, DEFAULT_RESEED_INTERVAL, MAX_SEED_LEN, MIN_SEED_LEN,
};
use crate::error::DrngError;

/// Reseed policy and memory options for a [`Drng`](crate::Drng).
///
/// | Field | Default |
/// |---|---|
/// | `reseed_interval` | 600 s |
/// | `max_bytes_between_reseeds` | 1 GiB |
/// | `seed_len` | 32 bytes |
/// | `protection` | [`ProtectionStrategy::MemNonProtected`] |
/// | `require_memory_lock` | `false` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrngConfig {
    /// Automatic reseed once more than this much time has elapsed.
    pub reseed_interval: Duration,
    /// Automatic reseed once more than this many bytes were generated.
    pub max_bytes_between_reseeds: u64,
    /// Entropy bytes pulled per reseed.
    pub seed_len: usize,
    /// Whether the state page is `PROT_NONE` between accesses.
    pub protection: ProtectionStrategy,
    /// Refuse to run when the state cannot be pinned in RAM.
    pub require_memory_lock: bool,
}

impl Default for DrngConfig {
    fn default() -> Self {
        Self {
            reseed_interval: DEFAULT_RESEED_INTERVAL,
            max_bytes_between_reseeds: DEFAULT_MAX_BYTES_BETWEEN_RESEEDS,
            seed_len: MIN_SEED_LEN,
            protection: ProtectionStrategy::default(),
            require_memory_lock: false,
        }
    }
}

impl DrngConfig {
    /// Sets [`DrngConfig::reseed_interval`].
    pub fn with_reseed_interval(mut self, interval: Duration) -> Self {
        self.reseed_interval = interval;
        self
    }

    /// Sets [`DrngConfig::max_bytes_between_reseeds`].
    pub fn with_max_bytes_between_reseeds(mut self, max_bytes: u64) -> Self {
        self.max_bytes_between_reseeds = max_bytes;
        self
    }

    /// Sets [`DrngConfig::seed_len`].
    pub fn with_seed_len(mut self, seed_len: usize) -> Self {
        self.seed_len = seed_len;
        self
    }

    /// Sets [`DrngConfig::protection`].
    pub fn with_protection(mut self, protection: ProtectionStrategy) -> Self {
        self.protection = protection;
        self
    }

    /// Sets [`DrngConfig::require_memory_lock`].
    pub fn with_require_memory_lock(mut self, require: bool) -> Self {
        self.require_memory_lock = require;
        self
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// [`DrngError::InvalidArgument`] naming the first offending field.
    pub fn validate(&self) -> Result<(), DrngError> {
        if self.reseed_interval.is_zero() {
            return Err(DrngError::InvalidArgument("reseed_interval must be non-zero"));
        }

        if self.max_bytes_between_reseeds == 0 {
            return Err(DrngError::InvalidArgument(
                "max_bytes_between_reseeds must be non-zero",
            ));
        }

        if self.seed_len < MIN_SEED_LEN {
            return Err(DrngError::InvalidArgument("seed_len below key size"));
        }

        if self.seed_len > MAX_SEED_LEN {
            return Err(DrngError::InvalidArgument("seed_len above 4096 bytes"));
        }

        Ok(())
    }
}
