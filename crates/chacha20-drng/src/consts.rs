// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::time::Duration;

/// ChaCha20 key size in bytes (256 bits).
pub const KEY_SIZE: usize = 32;
/// ChaCha20 nonce size in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;
/// Block counter size in bytes.
pub const COUNTER_SIZE: usize = 4;
/// ChaCha20 keystream block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Block function scratch: input, working and keystream blocks.
pub(crate) const SCRATCH_SIZE: usize = 3 * BLOCK_SIZE;

/// Offset of the cipher scratch inside the state.
pub(crate) const SCRATCH_OFFSET: usize = KEY_SIZE + NONCE_SIZE + COUNTER_SIZE;

/// Bytes kept in pinned memory: `key | nonce | counter | scratch`.
pub(crate) const STATE_SIZE: usize = SCRATCH_OFFSET + SCRATCH_SIZE;

/// Little-endian bytes of the four constant words.
pub(crate) const SIGMA: &[u8; 16] = b"expand 32-byte k";

pub(crate) const DEFAULT_RESEED_INTERVAL: Duration = Duration::from_secs(600);
pub(crate) const DEFAULT_MAX_BYTES_BETWEEN_RESEEDS: u64 = 1 << 30;

/// Smallest seed that refreshes the whole key.
pub const MIN_SEED_LEN: usize = KEY_SIZE;
/// Largest entropy request per reseed.
pub const MAX_SEED_LEN: usize = 4096;
