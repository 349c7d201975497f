// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `rand_core` integration.

use rand_core::{TryCryptoRng, TryRngCore};

use crate::drng::Drng;
use crate::error::DrngError;
use crate::traits::{Clock, EntropySource};

impl<E: EntropySource, C: Clock> TryRngCore for Drng<E, C> {
    type Error = DrngError;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;

        Ok(u32::from_le_bytes(bytes))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes)?;

        Ok(u64::from_le_bytes(bytes))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.fill(dst)
    }
}

impl<E: EntropySource, C: Clock> TryCryptoRng for Drng<E, C> {}
