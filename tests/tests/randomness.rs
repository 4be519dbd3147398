//! Statistical smoke tests for the OS-backed random source
//!
//! These are heuristics with failure probabilities far below one in a
//! billion for a working source; they exist to catch a stuck or repeating
//! generator, not to certify output quality.

use opencrypto_algorithms::rng::{EntropySource, RandomSource};
use opencrypto_tests::randomness::{byte_frequency, distinct_ratio, hamming_distance, ones_fraction};

#[test]
fn test_disjoint_fills_differ() {
    let rng = RandomSource::global();
    let mut min_distance = u32::MAX;

    for _ in 0..1000 {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill(&mut a).unwrap();
        rng.fill(&mut b).unwrap();
        assert_ne!(a, b);
        min_distance = min_distance.min(hamming_distance(&a, &b));
    }

    // Expected distance is 128 bits with a standard deviation of 8
    assert!(min_distance > 64, "minimum Hamming distance {}", min_distance);
}

#[test]
fn test_bit_balance() {
    let mut data = vec![0u8; 1 << 20];
    RandomSource::global().fill(&mut data).unwrap();
    let fraction = ones_fraction(&data);
    assert!((fraction - 0.5).abs() < 0.002, "ones fraction {}", fraction);
}

#[test]
fn test_byte_frequency() {
    let mut data = vec![0u8; 1 << 20];
    RandomSource::global().fill(&mut data).unwrap();
    let report = byte_frequency(&data);
    assert!(report.p_value > 1e-6, "chi-square {:?}", report);
}

#[test]
fn test_u64_samples_do_not_repeat() {
    let rng = RandomSource::global();
    let samples: Vec<u64> = (0..10_000).map(|_| rng.next_u64().unwrap()).collect();
    assert_eq!(distinct_ratio(&samples), 1.0);
}

#[test]
fn test_parallel_fills_differ() {
    let outputs: Vec<[u8; 32]> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                scope.spawn(|| {
                    let mut buf = [0u8; 32];
                    RandomSource::global().fill(&mut buf).unwrap();
                    buf
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(distinct_ratio(&outputs), 1.0);
}
