//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify the soft
//! heap's invariants: size accounting, completeness (nothing lost or
//! duplicated), rank ordering of the forest, exactness below the rank
//! threshold, and monotone reported keys while draining.

use proptest::prelude::*;
use soft_heap::{Config, SoftHeap};
use std::collections::HashMap;

/// Configurations from exact-in-practice to maximally corrupting
fn config_strategy() -> impl Strategy<Value = Config> {
    (prop_oneof![Just(1.0), Just(0.5), Just(1.0 / 3.0), Just(0.1)], 0u8..6)
        .prop_map(|(epsilon, slack)| Config::new(epsilon).unwrap().with_rank_slack(slack))
}

fn assert_forest_shape(heap: &SoftHeap<usize, i32>) -> Result<(), TestCaseError> {
    let ranks: Vec<u8> = heap.tree_ranks().collect();
    prop_assert!(
        ranks.windows(2).all(|w| w[0] < w[1]),
        "ranks not strictly increasing: {:?}",
        ranks
    );
    prop_assert_eq!(heap.rank(), ranks.last().copied().unwrap_or(0));
    Ok(())
}

/// Test len() and the forest shape after every operation
fn test_len_invariant(config: Config, ops: Vec<(bool, i32)>) -> Result<(), TestCaseError> {
    let mut heap = SoftHeap::with_config(config);
    let mut expected_len = 0usize;

    for (id, (should_pop, value)) in ops.into_iter().enumerate() {
        if should_pop {
            match heap.extract_min() {
                Ok(_) => expected_len -= 1,
                Err(_) => {
                    prop_assert_eq!(expected_len, 0);
                }
            }
        } else {
            heap.insert(value, id);
            expected_len += 1;
        }

        prop_assert_eq!(heap.len(), expected_len);
        prop_assert_eq!(heap.is_empty(), expected_len == 0);
        assert_forest_shape(&heap)?;
    }

    Ok(())
}

/// Test that every inserted element comes back exactly once with its own key
fn test_completeness(config: Config, ops: Vec<(bool, i32)>) -> Result<(), TestCaseError> {
    let mut heap = SoftHeap::with_config(config);
    let mut outstanding: HashMap<usize, i32> = HashMap::new();

    let take = |heap: &mut SoftHeap<usize, i32>,
                    outstanding: &mut HashMap<usize, i32>|
     -> Result<bool, TestCaseError> {
        match heap.extract_min_with_key() {
            Ok(extracted) => {
                let key = outstanding.remove(&extracted.item);
                prop_assert_eq!(key, Some(extracted.priority), "unknown or duplicate element");
                prop_assert!(extracted.common_key >= extracted.priority);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    };

    for (id, (should_pop, value)) in ops.into_iter().enumerate() {
        if should_pop {
            take(&mut heap, &mut outstanding)?;
        } else {
            heap.insert(value, id);
            outstanding.insert(id, value);
        }
    }
    while take(&mut heap, &mut outstanding)? {}

    prop_assert!(outstanding.is_empty());
    prop_assert!(heap.is_empty());
    Ok(())
}

/// Test that reported keys never decrease while draining without inserts
fn test_monotone_reported_keys(config: Config, values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = SoftHeap::with_config(config);
    for (id, value) in values.into_iter().enumerate() {
        heap.insert(value, id);
    }

    let mut last = i32::MIN;
    while let Ok(extracted) = heap.extract_min_with_key() {
        prop_assert!(
            extracted.common_key >= last,
            "reported key {} after {}",
            extracted.common_key,
            last
        );
        last = extracted.common_key;
    }
    Ok(())
}

/// Test that heaps whose trees stay at or below the threshold are exact
fn test_exact_below_threshold(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = SoftHeap::new();
    for (id, value) in values.iter().enumerate() {
        heap.insert(*value, id);
    }
    prop_assert_eq!(heap.corrupted_count(), 0);

    let mut sorted = values;
    sorted.sort_unstable();
    let mut drained = Vec::new();
    while let Ok((key, _)) = heap.extract_min() {
        drained.push(key);
    }
    prop_assert_eq!(drained, sorted);
    Ok(())
}

/// Test that meld preserves every element of both heaps
fn test_meld_invariant(
    config: Config,
    left: Vec<i32>,
    right: Vec<i32>,
) -> Result<(), TestCaseError> {
    let mut a = SoftHeap::with_config(config);
    let mut b = SoftHeap::with_config(config);
    for (id, value) in left.iter().enumerate() {
        a.insert(*value, id);
    }
    for (id, value) in right.iter().enumerate() {
        b.insert(*value, left.len() + id);
    }

    a.meld(b);
    prop_assert_eq!(a.len(), left.len() + right.len());
    assert_forest_shape(&a)?;

    let mut expected: Vec<i32> = left.into_iter().chain(right).collect();
    expected.sort_unstable();
    let mut drained = Vec::new();
    while let Ok((key, _)) = a.extract_min() {
        drained.push(key);
        assert_forest_shape(&a)?;
    }
    drained.sort_unstable();
    prop_assert_eq!(drained, expected);
    Ok(())
}

proptest! {
    #[test]
    fn prop_len_invariant(
        config in config_strategy(),
        ops in prop::collection::vec((prop::bool::weighted(0.4), -1000i32..1000), 0..400)
    ) {
        test_len_invariant(config, ops)?;
    }

    #[test]
    fn prop_completeness(
        config in config_strategy(),
        ops in prop::collection::vec((prop::bool::weighted(0.4), -1000i32..1000), 0..400)
    ) {
        test_completeness(config, ops)?;
    }

    #[test]
    fn prop_monotone_reported_keys(
        config in config_strategy(),
        values in prop::collection::vec(-1000i32..1000, 0..600)
    ) {
        test_monotone_reported_keys(config, values)?;
    }

    #[test]
    fn prop_exact_below_threshold(values in prop::collection::vec(any::<i32>(), 0..255)) {
        test_exact_below_threshold(values)?;
    }

    #[test]
    fn prop_meld_invariant(
        config in config_strategy(),
        left in prop::collection::vec(-100i32..100, 0..200),
        right in prop::collection::vec(-100i32..100, 0..200)
    ) {
        test_meld_invariant(config, left, right)?;
    }
}
