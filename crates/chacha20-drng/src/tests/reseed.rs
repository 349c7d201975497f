// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::time::Duration;

use chacha20_drng_util::is_slice_zeroized;

use crate::error::DrngError;
use crate::test_utils::{MockClock, MockEntropySource, MockEntropySourceBehaviour};
use crate::traits::Clock;

use super::support::mock_drng;

#[test]
fn test_reseed_replaces_key_and_resets_accounting() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let clock = MockClock::new();
    let mut drng = mock_drng(&entropy, &clock);

    let mut out = [0u8; 128];
    drng.fill(&mut out).expect("Failed to fill(..)");
    drng.set_counter_for_test(17);
    clock.advance(Duration::from_secs(300));
    let key_before = drng.key_snapshot();

    drng.reseed(None).expect("Failed to reseed(..)");

    assert_ne!(drng.key_snapshot(), key_before);
    assert_eq!(drng.counter_for_test(), 0);
    assert_eq!(drng.generated_bytes_for_test(), 0);
    assert_eq!(drng.last_reseed, clock.now());
    assert_eq!(entropy.call_count(), 2);
}

#[test]
fn test_reseed_runs_cipher_inside_state_region() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let clock = MockClock::new();
    let mut drng = mock_drng(&entropy, &clock);
    let key_before = drng.key_snapshot();

    drng.reseed(Some(&[0x42; 100])).expect("Failed to reseed(..)");

    assert_ne!(drng.key_snapshot(), key_before);
    assert!(is_slice_zeroized(&drng.scratch_snapshot()));
}

#[test]
fn test_reseed_failure_keeps_previous_state() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let clock = MockClock::new();
    let mut drng = mock_drng(&entropy, &clock);

    let mut out = [0u8; 100];
    drng.fill(&mut out).expect("Failed to fill(..)");
    drng.set_counter_for_test(9);
    let key_before = drng.key_snapshot();
    let nonce_before = drng.nonce_snapshot();
    let last_reseed_before = drng.last_reseed;

    entropy.change_behaviour(MockEntropySourceBehaviour::FailAlways);
    let result = drng.reseed(Some(b"caller data"));

    assert!(matches!(result, Err(DrngError::EntropyUnavailable)));
    assert_eq!(drng.key_snapshot(), key_before);
    assert_eq!(drng.nonce_snapshot(), nonce_before);
    assert_eq!(drng.counter_for_test(), 9);
    assert_eq!(drng.generated_bytes_for_test(), 100);
    assert_eq!(drng.last_reseed, last_reseed_before);

    // Still usable with the previous key.
    entropy.change_behaviour(MockEntropySourceBehaviour::None);
    drng.fill(&mut out).expect("Failed to fill(..) after failed reseed");
}

#[test]
fn test_reseed_is_reproducible_only_with_mocked_entropy() {
    let clock = MockClock::new();

    let entropy_a = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(0x42));
    let entropy_b = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(0x42));
    let mut a = mock_drng(&entropy_a, &clock);
    let mut b = mock_drng(&entropy_b, &clock);

    a.reseed(Some(b"fixed seed")).expect("Failed to reseed(..)");
    b.reseed(Some(b"fixed seed")).expect("Failed to reseed(..)");

    let mut out_a = [0u8; 64];
    let mut out_b = [0u8; 64];
    a.fill(&mut out_a).expect("Failed to fill(..)");
    b.fill(&mut out_b).expect("Failed to fill(..)");
    assert_eq!(out_a, out_b);

    // Same caller seed, real entropy: diverges.
    let entropy_c = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let entropy_d = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let mut c = mock_drng(&entropy_c, &clock);
    let mut d = mock_drng(&entropy_d, &clock);

    c.reseed(Some(b"fixed seed")).expect("Failed to reseed(..)");
    d.reseed(Some(b"fixed seed")).expect("Failed to reseed(..)");

    let mut out_c = [0u8; 64];
    let mut out_d = [0u8; 64];
    c.fill(&mut out_c).expect("Failed to fill(..)");
    d.fill(&mut out_d).expect("Failed to fill(..)");
    assert_ne!(out_c, out_d);
}

#[test]
fn test_reseed_caller_data_is_folded_in() {
    let clock = MockClock::new();
    let entropy_a = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(7));
    let entropy_b = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(7));
    let entropy_c = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(7));
    let mut a = mock_drng(&entropy_a, &clock);
    let mut b = mock_drng(&entropy_b, &clock);
    let mut c = mock_drng(&entropy_c, &clock);
    assert_eq!(a.key_snapshot(), b.key_snapshot());

    a.reseed(None).expect("Failed to reseed(..)");
    b.reseed(Some(b"x")).expect("Failed to reseed(..)");
    c.reseed(Some(b"y")).expect("Failed to reseed(..)");

    let key_a = a.key_snapshot();
    let key_b = b.key_snapshot();
    let key_c = c.key_snapshot();
    assert_ne!(key_a, key_b);
    assert_ne!(key_b, key_c);
    assert_ne!(key_a, key_c);
}

#[test]
fn test_reseed_with_empty_caller_data_still_pulls_entropy() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let clock = MockClock::new();
    let mut drng = mock_drng(&entropy, &clock);

    drng.reseed(Some(&[])).expect("Failed to reseed(..)");

    assert_eq!(entropy.call_count(), 2);
}

#[test]
fn test_reseed_output_independent_of_earlier_output() {
    let clock = MockClock::new();
    let entropy_a = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(1));
    let entropy_b = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(1));
    let mut a = mock_drng(&entropy_a, &clock);
    let mut b = mock_drng(&entropy_b, &clock);

    let mut before_a = [0u8; 64];
    let mut before_b = [0u8; 64];
    a.fill(&mut before_a).expect("Failed to fill(..)");
    b.fill(&mut before_b).expect("Failed to fill(..)");
    assert_eq!(before_a, before_b);

    entropy_a.change_behaviour(MockEntropySourceBehaviour::Fixed(2));
    entropy_b.change_behaviour(MockEntropySourceBehaviour::Fixed(3));
    a.reseed(None).expect("Failed to reseed(..)");
    b.reseed(None).expect("Failed to reseed(..)");

    let mut after_a = [0u8; 64];
    let mut after_b = [0u8; 64];
    a.fill(&mut after_a).expect("Failed to fill(..)");
    b.fill(&mut after_b).expect("Failed to fill(..)");
    assert_ne!(after_a, after_b);
}

#[test]
fn test_reseed_pulls_configured_seed_len() {
    use crate::config::DrngConfig;
    use crate::traits::EntropySource;
    use crate::error::EntropyError;
    use core::cell::Cell;

    struct LenRecorder(Cell<usize>);

    impl EntropySource for LenRecorder {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
            self.0.set(dest.len());
            dest.fill(0x11);
            Ok(())
        }
    }

    let recorder = LenRecorder(Cell::new(0));
    let mut drng = crate::Drng::builder()
        .entropy(&recorder)
        .clock(MockClock::new())
        .config(DrngConfig::default().with_seed_len(96))
        .build()
        .expect("Failed to build()");
    assert_eq!(recorder.0.get(), 96);

    recorder.0.set(0);
    drng.reseed(None).expect("Failed to reseed(..)");
    assert_eq!(recorder.0.get(), 96);
}
