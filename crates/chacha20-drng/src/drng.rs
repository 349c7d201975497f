// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The generator: seeding, generation with backtracking resistance and
//! secure teardown.

use std::time::Instant;

use zeroize::{Zeroize, Zeroizing};

use chacha20_drng_buffer::Buffer;
use chacha20_drng_util::{fast_zeroize_slice, u64_to_le};

use crate::builder::DrngBuilder;
use crate::config::DrngConfig;
use crate::error::DrngError;
use crate::state::StateMut;
use crate::system::{SystemClock, SystemEntropySource};
use crate::traits::{Clock, EntropySource};

/// Whether the secret state is pinned in RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assurance {
    /// State page is locked: never written to swap.
    Full,
    /// The host refused to pin the page; the state may reach swap.
    Reduced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReseedTrigger {
    Elapsed,
    Volume,
}

impl ReseedTrigger {
    fn as_str(self) -> &'static str {
        match self {
            Self::Elapsed => "elapsed",
            Self::Volume => "volume",
        }
    }
}

/// ChaCha20 deterministic random number generator.
///
/// Key, nonce, block counter and the block function scratch live in a
/// pinned page that is zeroized on every release path. Every [`Drng::get`]
/// ends with a re-key from a block that is never returned, so a later state
/// disclosure reveals nothing about output already handed out.
///
/// Instances are single-owner; shard one per thread rather than sharing.
///
/// ```rust
/// use chacha20_drng::Drng;
///
/// let mut drng = Drng::new().expect("Failed to init DRNG");
///
/// let mut key = [0u8; 32];
/// drng.fill(&mut key).expect("Failed to generate");
///
/// drng.reseed(Some(b"application context")).expect("Failed to reseed");
/// drng.destroy();
/// ```
pub struct Drng<E: EntropySource = SystemEntropySource, C: Clock = SystemClock> {
    pub(crate) state: Box<dyn Buffer>,
    pub(crate) entropy: E,
    pub(crate) clock: C,
    pub(crate) config: DrngConfig,
    pub(crate) generated_bytes: u64,
    pub(crate) last_reseed: Instant,
}

impl Drng {
    /// Self-tests, allocates pinned state and seeds from the OS.
    ///
    /// # Errors
    ///
    /// See [`DrngBuilder::build`].
    pub fn new() -> Result<Self, DrngError> {
        DrngBuilder::new().build()
    }

    /// Starts a builder with system providers and the default config.
    pub fn builder() -> DrngBuilder {
        DrngBuilder::new()
    }
}

impl<E: EntropySource, C: Clock> Drng<E, C> {
    /// Writes `len` random bytes to `out[..len]`.
    ///
    /// On error no output is valid: `out[..len]` is zeroized.
    ///
    /// # Errors
    ///
    /// - [`DrngError::InvalidArgument`] if `len > out.len()` or `len > u32::MAX`.
    /// - [`DrngError::EntropyUnavailable`] if an automatic reseed could not
    ///   obtain entropy. The previous key stays in place.
    /// - [`DrngError::Memory`] if the state page became unusable.
    pub fn get(&mut self, out: &mut [u8], len: usize) -> Result<(), DrngError> {
        if len > out.len() {
            return Err(DrngError::InvalidArgument("len exceeds output buffer"));
        }

        if u32::try_from(len).is_err() {
            return Err(DrngError::InvalidArgument("len exceeds u32::MAX"));
        }

        let out = &mut out[..len];
        let result = self.try_get(out);

        if result.is_err() {
            fast_zeroize_slice(out);
        }

        result
    }

    /// Fills all of `out`. Same as `get(out, out.len())`.
    pub fn fill(&mut self, out: &mut [u8]) -> Result<(), DrngError> {
        let len = out.len();
        self.get(out, len)
    }

    /// Refreshes key and nonce from the entropy source, then folds in `seed`.
    ///
    /// Caller data supplements system entropy and is never the only input.
    ///
    /// # Errors
    ///
    /// - [`DrngError::InvalidArgument`] if `seed` is longer than `u32::MAX`.
    /// - [`DrngError::EntropyUnavailable`] if the source fails. Nothing is
    ///   modified in that case.
    pub fn reseed(&mut self, seed: Option<&[u8]>) -> Result<(), DrngError> {
        if let Some(seed) = seed {
            if u32::try_from(seed.len()).is_err() {
                return Err(DrngError::InvalidArgument("seed exceeds u32::MAX"));
            }
        }

        self.reseed_with(seed)?;
        tracing::debug!(caller_data = seed.is_some(), "explicit reseed");

        Ok(())
    }

    /// Wipes and releases the state. Equivalent to dropping.
    pub fn destroy(self) {
        drop(self);
    }

    /// [`Assurance::Full`] while the state page is pinned.
    pub fn assurance(&self) -> Assurance {
        if self.state.is_locked() {
            Assurance::Full
        } else {
            Assurance::Reduced
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &DrngConfig {
        &self.config
    }

    /// Injected entropy source.
    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Injected clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn try_get(&mut self, out: &mut [u8]) -> Result<(), DrngError> {
        let timestamp = self.clock.timestamp();
        self.state.open_mut(&mut |bytes| {
            StateMut::from_bytes(bytes)?.mix_timestamp(timestamp);
            Ok(())
        })?;

        if let Some(trigger) = self.reseed_trigger() {
            tracing::debug!(trigger = trigger.as_str(), "automatic reseed");
            self.reseed_with(None)?;
        }

        self.state.open_mut(&mut |bytes| {
            let mut state = StateMut::from_bytes(bytes)?;
            state.generate(out);
            state.rekey();
            Ok(())
        })?;

        self.generated_bytes = self.generated_bytes.saturating_add(out.len() as u64);

        Ok(())
    }

    pub(crate) fn reseed_trigger(&self) -> Option<ReseedTrigger> {
        let elapsed = self.clock.now().saturating_duration_since(self.last_reseed);

        if elapsed > self.config.reseed_interval {
            return Some(ReseedTrigger::Elapsed);
        }

        if self.generated_bytes > self.config.max_bytes_between_reseeds {
            return Some(ReseedTrigger::Volume);
        }

        None
    }

    /// Entropy first: a failing source leaves the state untouched.
    pub(crate) fn reseed_with(&mut self, seed: Option<&[u8]>) -> Result<(), DrngError> {
        let seed_len = self.config.seed_len;
        let extra = seed.map_or(0, <[u8]>::len);

        // Capacity is reserved up front so no reallocation leaves copies behind.
        let mut material = Zeroizing::new(Vec::with_capacity(seed_len + 8 + extra));
        material.resize(seed_len, 0);

        if let Err(e) = self.entropy.fill_bytes(&mut material) {
            tracing::error!(error = %e, "entropy source failed during reseed");
            return Err(e.into());
        }

        let mut timestamp = self.clock.timestamp();
        let mut le_bytes = [0u8; 8];
        u64_to_le(&mut timestamp, &mut le_bytes);
        material.extend_from_slice(&le_bytes);
        le_bytes.zeroize();

        if let Some(seed) = seed {
            material.extend_from_slice(seed);
        }

        self.state.open_mut(&mut |bytes| {
            StateMut::from_bytes(bytes)?.absorb(&material);
            Ok(())
        })?;

        self.generated_bytes = 0;
        self.last_reseed = self.clock.now();

        Ok(())
    }

    fn wipe(&mut self) {
        let _ = self.state.open_mut(&mut |bytes| {
            fast_zeroize_slice(bytes);
            Ok(())
        });
        self.state.dispose();
        self.generated_bytes = 0;
    }
}

#[cfg(test)]
impl<E: EntropySource, C: Clock> Drng<E, C> {
    pub(crate) fn key_snapshot(&mut self) -> [u8; crate::consts::KEY_SIZE] {
        let mut key = [0u8; crate::consts::KEY_SIZE];
        self.state
            .open(&mut |bytes| {
                key.copy_from_slice(&bytes[..crate::consts::KEY_SIZE]);
                Ok(())
            })
            .expect("Failed to open(..)");
        key
    }

    pub(crate) fn nonce_snapshot(&mut self) -> [u8; crate::consts::NONCE_SIZE] {
        use crate::consts::{KEY_SIZE, NONCE_SIZE};

        let mut nonce = [0u8; NONCE_SIZE];
        self.state
            .open(&mut |bytes| {
                nonce.copy_from_slice(&bytes[KEY_SIZE..KEY_SIZE + NONCE_SIZE]);
                Ok(())
            })
            .expect("Failed to open(..)");
        nonce
    }

    pub(crate) fn scratch_snapshot(&mut self) -> [u8; crate::consts::SCRATCH_SIZE] {
        use crate::consts::{SCRATCH_OFFSET, SCRATCH_SIZE};

        let mut scratch = [0u8; SCRATCH_SIZE];
        self.state
            .open(&mut |bytes| {
                scratch.copy_from_slice(&bytes[SCRATCH_OFFSET..SCRATCH_OFFSET + SCRATCH_SIZE]);
                Ok(())
            })
            .expect("Failed to open(..)");
        scratch
    }

    pub(crate) fn counter_for_test(&mut self) -> u32 {
        let mut counter = 0;
        self.state
            .open_mut(&mut |bytes| {
                counter = StateMut::from_bytes(bytes)?.counter();
                Ok(())
            })
            .expect("Failed to open_mut(..)");
        counter
    }

    pub(crate) fn set_counter_for_test(&mut self, counter: u32) {
        self.state
            .open_mut(&mut |bytes| {
                StateMut::from_bytes(bytes)?.set_counter(counter);
                Ok(())
            })
            .expect("Failed to open_mut(..)");
    }

    pub(crate) fn set_generated_bytes_for_test(&mut self, generated_bytes: u64) {
        self.generated_bytes = generated_bytes;
    }

    pub(crate) fn generated_bytes_for_test(&self) -> u64 {
        self.generated_bytes
    }

    pub(crate) fn wipe_for_test(&mut self) {
        self.wipe();
    }
}

impl<E: EntropySource, C: Clock> core::fmt::Debug for Drng<E, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Drng")
            .field("state", &"[REDACTED]")
            .field("assurance", &self.assurance())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E: EntropySource, C: Clock> Drop for Drng<E, C> {
    fn drop(&mut self) {
        self.wipe();
        tracing::debug!("drng destroyed");
    }
}
