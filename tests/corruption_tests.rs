//! Corruption bound tests
//!
//! A soft heap built with corruption rate ε that has seen n inserts never
//! holds more than ε·n elements whose common key exceeds their own. These
//! tests insert large random workloads (seeded for reproducibility) and check
//! the bound after the inserts and repeatedly while draining, with a small
//! margin over ε.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use soft_heap::{Config, Natural, SoftHeap};

/// Inserts `n` random keys, then drains the heap, checking the number of
/// corrupted elements held every `check_every` extractions.
fn check_corruption_bound(epsilon: f64, margin: f64, n: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut heap = SoftHeap::with_config(Config::new(epsilon).unwrap());
    for id in 0..n {
        heap.insert(rng.gen_range(0..1_000_000u32), id);
    }

    let bound = ((epsilon + margin) * n as f64) as usize;
    let check_every = n / 20;

    let corrupted = heap.corrupted_count();
    assert!(
        corrupted <= bound,
        "ε = {epsilon}: {corrupted} corrupted after {n} inserts (bound {bound})"
    );

    let mut extracted = 0usize;
    let mut reported_below_true = 0usize;
    while let Ok(element) = heap.extract_min_with_key() {
        if element.common_key < element.priority {
            reported_below_true += 1;
        }
        extracted += 1;
        if extracted % check_every == 0 {
            let corrupted = heap.corrupted_count();
            assert!(
                corrupted <= bound,
                "ε = {epsilon}: {corrupted} corrupted after {extracted} extractions (bound {bound})"
            );
        }
    }

    assert_eq!(extracted, n);
    assert_eq!(reported_below_true, 0);
}

#[test]
fn test_corruption_bound_default_epsilon() {
    // ε = 1/3 with n = 100 000, allowing up to 0.34·n
    check_corruption_bound(1.0 / 3.0, 0.34 - 1.0 / 3.0, 100_000, 0x5eed);
}

#[test]
fn test_corruption_bound_small_epsilon() {
    check_corruption_bound(0.1, 0.01, 50_000, 42);
    check_corruption_bound(0.05, 0.01, 50_000, 7);
}

#[test]
fn test_corruption_grows_with_epsilon() {
    let n = 20_000;
    let mut rng = StdRng::seed_from_u64(1);
    let keys: Vec<u32> = (0..n).map(|_| rng.gen()).collect();

    let corrupted_for = |config: Config| {
        let mut heap = SoftHeap::with_config(config);
        for &key in &keys {
            heap.insert(key, ());
        }
        heap.corrupted_count()
    };

    let exactish = corrupted_for(Config::new(0.01).unwrap());
    let loose = corrupted_for(Config::new(1.0).unwrap().with_rank_slack(0));
    assert!(exactish < loose, "{exactish} >= {loose}");
}

#[test]
fn test_descending_inserts_report_true_upper_bounds() {
    let mut heap = SoftHeap::with_config(Config::new(1.0).unwrap().with_rank_slack(1));
    for key in (0..10_000u32).rev() {
        heap.insert(key, ());
    }

    let mut corrupted_returned = 0;
    while let Ok(element) = heap.extract_min_with_key() {
        assert!(element.common_key >= element.priority);
        if element.is_corrupted(&Natural) {
            corrupted_returned += 1;
        }
    }
    // With a threshold of 1 most elements travel in shared buckets
    assert!(corrupted_returned > 0);
}
