// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocation path: self-test, pinned state, initial seed.

use chacha20_drng_buffer::{Buffer, MemoryLock, SystemMemoryLock};

use crate::config::DrngConfig;
use crate::consts::STATE_SIZE;
use crate::drng::Drng;
use crate::error::DrngError;
use crate::selftest;
use crate::system::{SystemClock, SystemEntropySource};
use crate::traits::{Clock, EntropySource};

pub(crate) type SelfTestFn = fn() -> Result<(), DrngError>;

/// Assembles a [`Drng`] from its collaborators.
///
/// ```rust
/// use std::time::Duration;
///
/// use chacha20_drng::{Drng, DrngConfig, SystemEntropySource};
///
/// let config = DrngConfig::default().with_reseed_interval(Duration::from_secs(60));
/// let mut drng = Drng::builder()
///     .entropy(SystemEntropySource)
///     .config(config)
///     .build()
///     .expect("Failed to build DRNG");
///
/// let mut out = [0u8; 16];
/// drng.fill(&mut out).expect("Failed to generate");
/// ```
pub struct DrngBuilder<E: EntropySource = SystemEntropySource, C: Clock = SystemClock> {
    entropy: E,
    clock: C,
    config: DrngConfig,
    memory_lock: Box<dyn MemoryLock>,
}

impl DrngBuilder {
    /// System entropy, system clock, `mlock` and [`DrngConfig::default`].
    pub fn new() -> Self {
        Self {
            entropy: SystemEntropySource,
            clock: SystemClock,
            config: DrngConfig::default(),
            memory_lock: Box::new(SystemMemoryLock),
        }
    }
}

impl Default for DrngBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource, C: Clock> DrngBuilder<E, C> {
    /// Replaces the entropy source.
    pub fn entropy<E2: EntropySource>(self, entropy: E2) -> DrngBuilder<E2, C> {
        DrngBuilder {
            entropy,
            clock: self.clock,
            config: self.config,
            memory_lock: self.memory_lock,
        }
    }

    /// Replaces the clock.
    pub fn clock<C2: Clock>(self, clock: C2) -> DrngBuilder<E, C2> {
        DrngBuilder {
            entropy: self.entropy,
            clock,
            config: self.config,
            memory_lock: self.memory_lock,
        }
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: DrngConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the pinning capability (defaults to `mlock`).
    pub fn memory_lock(mut self, memory_lock: impl MemoryLock + 'static) -> Self {
        self.memory_lock = Box::new(memory_lock);
        self
    }

    /// Runs the allocation sequence.
    ///
    /// # Errors
    ///
    /// - [`DrngError::InvalidArgument`] for an invalid [`DrngConfig`].
    /// - [`DrngError::SelfTestFailed`] if the cipher core is faulty.
    /// - [`DrngError::AllocationFailed`] if the state page cannot be mapped, or
    ///   cannot be pinned while [`DrngConfig::require_memory_lock`] is set.
    /// - [`DrngError::EntropyUnavailable`] if the initial seed fails.
    ///
    /// No instance exists on any error path; allocated memory is wiped first.
    pub fn build(self) -> Result<Drng<E, C>, DrngError> {
        self.build_with(selftest::run)
    }

    pub(crate) fn build_with(self, self_test: SelfTestFn) -> Result<Drng<E, C>, DrngError> {
        self.build_with_state(self_test, allocate_state)
    }

    pub(crate) fn build_with_state(
        self,
        self_test: SelfTestFn,
        allocate: impl FnOnce(&DrngConfig, Box<dyn MemoryLock>) -> Result<Box<dyn Buffer>, DrngError>,
    ) -> Result<Drng<E, C>, DrngError> {
        let Self {
            entropy,
            clock,
            config,
            memory_lock,
        } = self;

        config.validate()?;

        self_test()?;

        let mut state = allocate(&config, memory_lock)?;

        if !state.is_locked() {
            if config.require_memory_lock {
                tracing::error!("state page could not be pinned and pinning is required");
                state.dispose();
                return Err(DrngError::AllocationFailed);
            }

            tracing::warn!("state page is not pinned, running with reduced assurance");
        }

        let last_reseed = clock.now();
        let mut drng = Drng {
            state,
            entropy,
            clock,
            config,
            generated_bytes: 0,
            last_reseed,
        };

        // On failure `drng` is dropped here, which wipes and releases the page.
        drng.reseed_with(None)?;
        tracing::debug!(assurance = ?drng.assurance(), "drng seeded");

        Ok(drng)
    }
}

#[cfg(unix)]
fn allocate_state(
    config: &DrngConfig,
    memory_lock: Box<dyn MemoryLock>,
) -> Result<Box<dyn Buffer>, DrngError> {
    use chacha20_drng_buffer::PageBuffer;

    match PageBuffer::new(config.protection, STATE_SIZE, memory_lock) {
        Ok(buffer) => Ok(Box::new(buffer)),
        Err(e) => {
            tracing::error!(error = %e, "state page allocation failed");
            Err(DrngError::AllocationFailed)
        }
    }
}

#[cfg(not(unix))]
fn allocate_state(
    _config: &DrngConfig,
    _memory_lock: Box<dyn MemoryLock>,
) -> Result<Box<dyn Buffer>, DrngError> {
    use chacha20_drng_buffer::PortableBuffer;

    Ok(Box::new(PortableBuffer::create(STATE_SIZE)))
}

impl<E: EntropySource, C: Clock> core::fmt::Debug for DrngBuilder<E, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DrngBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
