// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # chacha20-drng
//!
//! Deterministic random number generator built on the ChaCha20 block
//! function, for high-volume random output without a kernel round trip per
//! call.
//!
//! ## Guarantees
//!
//! - **Self-test gate**: every allocation checks the cipher core against
//!   RFC 8439 vectors. No instance exists if a byte mismatches.
//! - **Pinned state**: key, nonce, counter and the block function scratch live
//!   in an `mlock`'d page (see [`chacha20_drng_buffer`]) that is zeroized on
//!   every release path.
//!   When the host refuses to pin, [`Drng::assurance`] reports
//!   [`Assurance::Reduced`].
//! - **Backtracking resistance**: each [`Drng::get`] finishes by overwriting
//!   key and nonce with a block that is never returned.
//! - **Periodic reseed**: after 600 s or 1 GiB (configurable through
//!   [`DrngConfig`]) the next `get` reseeds from the [`EntropySource`] first.
//! - **Fail safe**: a reseed that cannot get entropy leaves the previous key
//!   in place and reports [`DrngError::EntropyUnavailable`]. Nothing is
//!   retried internally.
//!
//! ## Example
//!
//! ```rust
//! use chacha20_drng::{Assurance, Drng};
//!
//! let mut drng = Drng::new().expect("Failed to init DRNG");
//!
//! if drng.assurance() == Assurance::Reduced {
//!     // state may be swapped out on this host
//! }
//!
//! let mut out = [0u8; 100];
//! drng.get(&mut out, 64).expect("Failed to generate");
//! ```
//!
//! ## Collaborators
//!
//! Entropy, time and memory pinning are injected through [`EntropySource`],
//! [`Clock`] and [`MemoryLock`] (see [`DrngBuilder`]). Test doubles live in
//! `test_utils` behind the `test-utils` feature.

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod builder;
mod chacha20;
mod config;
mod consts;
mod drng;
mod error;
mod rng;
mod selftest;
mod state;
mod support;
mod system;
mod traits;
mod version;

pub use builder::DrngBuilder;
pub use config::DrngConfig;
pub use consts::{BLOCK_SIZE, KEY_SIZE, MAX_SEED_LEN, MIN_SEED_LEN, NONCE_SIZE};
pub use drng::{Assurance, Drng};
pub use error::{DrngError, EntropyError};
pub use system::{SystemClock, SystemEntropySource};
pub use traits::{Clock, EntropySource};
pub use version::{
    VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH, version, version_string, write_version_string,
};

pub use chacha20_drng_buffer::{MemoryLock, ProtectionStrategy, SystemMemoryLock};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
