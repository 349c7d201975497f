// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for chacha20-drng.

use thiserror::Error;

use chacha20_drng_buffer::BufferError;

/// Errors reported by an [`EntropySource`](crate::EntropySource).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum EntropyError {
    /// System entropy source is unavailable or failed to generate random data.
    #[error("EntropyNotAvailable")]
    EntropyNotAvailable,
}

/// Errors returned by [`Drng`](crate::Drng) operations.
#[derive(Debug, Error)]
pub enum DrngError {
    /// The cipher core did not reproduce a known-answer vector.
    #[error("self-test failed")]
    SelfTestFailed,

    /// The entropy source could not supply seed material.
    #[error("entropy unavailable")]
    EntropyUnavailable,

    /// A length, buffer or configuration value is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Secure memory for the state could not be obtained (or pinned when pinning is required).
    #[error("allocation failed")]
    AllocationFailed,

    /// The pinned state became unusable.
    #[error("memory error: {0}")]
    Memory(#[from] BufferError),
}

impl From<EntropyError> for DrngError {
    fn from(_: EntropyError) -> Self {
        Self::EntropyUnavailable
    }
}
