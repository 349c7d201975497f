// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! End-to-end use through the public API.

use std::thread;
use std::time::Duration;

use chacha20_drng::test_utils::{
    MockClock, MockEntropySource, MockEntropySourceBehaviour, MockMemoryLock,
    MockMemoryLockBehaviour,
};
use chacha20_drng::{
    Assurance, Clock, Drng, DrngConfig, DrngError, ProtectionStrategy, version, version_string,
};

#[test]
fn test_init_get_reseed_destroy() {
    let mut drng = Drng::new().expect("Failed to new()");

    let mut first = [0u8; 32];
    let mut second = [0u8; 32];
    drng.get(&mut first, 32).expect("Failed to get(..)");
    drng.get(&mut second, 32).expect("Failed to get(..)");
    assert_ne!(first, second);

    drng.reseed(Some(b"integration")).expect("Failed to reseed(..)");
    drng.reseed(None).expect("Failed to reseed(..)");

    let mut third = [0u8; 32];
    drng.fill(&mut third).expect("Failed to fill(..)");
    assert_ne!(third, first);
    assert_ne!(third, second);

    drng.destroy();
}

#[test]
fn test_reduced_assurance_is_reported_not_fatal() {
    let mut drng = Drng::builder()
        .memory_lock(MockMemoryLock::new(MockMemoryLockBehaviour::FailAlways))
        .build()
        .expect("Failed to build()");

    assert_eq!(drng.assurance(), Assurance::Reduced);

    let mut out = [0u8; 64];
    drng.fill(&mut out).expect("Failed to fill(..)");
}

#[test]
fn test_required_pin_is_enforced() {
    let result = Drng::builder()
        .memory_lock(MockMemoryLock::new(MockMemoryLockBehaviour::FailAlways))
        .config(DrngConfig::default().with_require_memory_lock(true))
        .build();

    assert!(matches!(result, Err(DrngError::AllocationFailed)));
}

#[test]
fn test_time_policy_with_mock_clock() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let clock = MockClock::new();
    let mut drng = Drng::builder()
        .entropy(&entropy)
        .clock(&clock)
        .config(
            DrngConfig::default()
                .with_reseed_interval(Duration::from_secs(10))
                .with_protection(ProtectionStrategy::MemProtected),
        )
        .build()
        .expect("Failed to build()");

    let mut out = [0u8; 16];
    for _ in 0..5 {
        clock.advance(Duration::from_secs(11));
        drng.fill(&mut out).expect("Failed to fill(..)");
    }

    assert_eq!(drng.entropy().call_count(), 6);
    assert_eq!(drng.clock().now(), clock.now());
}

#[test]
fn test_one_instance_per_thread() {
    let outputs: Vec<[u8; 32]> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let mut drng = Drng::new().expect("Failed to new()");
                let mut out = [0u8; 32];
                drng.fill(&mut out).expect("Failed to fill(..)");
                out
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().expect("Failed to join()"))
        .collect();

    for (i, a) in outputs.iter().enumerate() {
        for b in &outputs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_version_surface() {
    assert_eq!(version(), 1_010_000);
    assert_eq!(version_string(), "ChaCha20 DRNG 1.1.0");
}
