// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cell::Cell;
use core::time::Duration;
use std::time::Instant;

use crate::traits::Clock;

/// Clock whose monotonic time only moves when told to.
///
/// `timestamp()` returns a settable constant so timestamp mixing is
/// reproducible.
#[derive(Debug)]
pub struct MockClock {
    base: Instant,
    offset: Cell<Duration>,
    timestamp: Cell<u64>,
}

impl MockClock {
    /// Starts at the current instant with timestamp `0`.
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            timestamp: Cell::new(0),
        }
    }

    /// Moves monotonic time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Value returned by every later `timestamp()`.
    pub fn set_timestamp(&self, timestamp: u64) {
        self.timestamp.set(timestamp);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn timestamp(&self) -> u64 {
        self.timestamp.get()
    }
}
