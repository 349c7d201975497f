// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Mock implementations with configurable behavior for testing.

mod mock_clock;
mod mock_entropy_source;

pub use mock_clock::MockClock;
pub use mock_entropy_source::{MockEntropySource, MockEntropySourceBehaviour};

pub use chacha20_drng_buffer::test_utils::{MockMemoryLock, MockMemoryLockBehaviour};
