// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Mock implementations with configurable behavior for testing.

mod mock_memory_lock;

pub use mock_memory_lock::{MockMemoryLock, MockMemoryLockBehaviour};
