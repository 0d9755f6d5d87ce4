use std::collections::HashMap;

use proptest::prelude::*;
use satchel::ChainedHashMap;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates keys in a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
    ]
}

// ─── Model comparison against std HashMap ────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both ChainedHashMap and
    /// std's HashMap and asserts identical results at every step, across
    /// grows and shrinks.
    #[test]
    fn map_ops_match_hashmap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut chained: ChainedHashMap<i64, i64> = ChainedHashMap::new();
        let mut model: HashMap<i64, i64> = HashMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(chained.insert(*k, *v), model.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(chained.remove(k), model.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(chained.get(k), model.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(chained.contains_key(k), model.contains_key(k), "contains_key({})", k);
                }
            }
            prop_assert_eq!(chained.len(), model.len());
        }

        // Iteration order differs; compare contents order-independently.
        let mut chained_entries: Vec<_> = chained.iter().map(|(&k, &v)| (k, v)).collect();
        let mut model_entries: Vec<_> = model.into_iter().collect();
        chained_entries.sort_unstable();
        model_entries.sort_unstable();
        prop_assert_eq!(chained_entries, model_entries);
    }

    /// The capacity is prime after any operation sequence, and the load
    /// factor stays inside the (0.15, 0.75) band once past the floor.
    #[test]
    fn capacity_stays_prime(ops in proptest::collection::vec(map_op_strategy(), 1_000)) {
        fn is_prime(n: usize) -> bool {
            n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
        }

        let mut map: ChainedHashMap<i64, i64> = ChainedHashMap::new();
        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    map.insert(*k, *v);
                }
                MapOp::Remove(k) => {
                    map.remove(k);
                }
                _ => {}
            }
            prop_assert!(is_prime(map.capacity()), "capacity {} is not prime", map.capacity());
            prop_assert!(map.capacity() >= 17);
            prop_assert!(map.len() * 4 < map.capacity() * 3, "load factor at or above 0.75");
        }
    }
}

// ─── Resize policy ───────────────────────────────────────────────────────────

#[test]
fn thirteenth_key_grows_the_table_to_31() {
    let mut map = ChainedHashMap::new();
    for key in 0..12 {
        map.insert(key, key * 10);
    }
    assert_eq!(map.capacity(), 17);

    // The 13th distinct key reaches load factor 0.75; the next capacity is
    // the smallest prime >= 1.75 * 17 = 29.75.
    map.insert(12, 120);
    assert_eq!(map.capacity(), 31);

    // Rehashing preserved every mapping.
    for key in 0..13 {
        assert_eq!(map.get(&key), Some(&(key * 10)), "lost key {key} across the rehash");
    }
    assert_eq!(map.len(), 13);
}

#[test]
fn shrink_clamps_at_the_minimum_capacity() {
    let mut map: ChainedHashMap<i32, i32> = (0..13).map(|k| (k, k)).collect();
    assert_eq!(map.capacity(), 31);

    // Deleting down to load factor <= 0.15 (4 of 31) shrinks; the target
    // prime (11) is below the floor, so the capacity lands back on 17.
    for key in 0..9 {
        assert_eq!(map.remove(&key), Some(key));
    }
    assert_eq!(map.len(), 4);
    assert_eq!(map.capacity(), 17);
    for key in 9..13 {
        assert_eq!(map.get(&key), Some(&key));
    }
}

#[test]
fn thresholds_have_hysteresis() {
    let mut map: ChainedHashMap<i32, i32> = (0..13).map(|k| (k, k)).collect();
    assert_eq!(map.capacity(), 31);

    // Deleting just past the growth point must not bounce the capacity back:
    // 12 of 31 is nowhere near the 0.15 shrink threshold.
    map.remove(&0);
    assert_eq!(map.capacity(), 31);

    // Nor does re-inserting bounce it forward: growth needs 0.75 * 31.
    map.insert(0, 0);
    assert_eq!(map.capacity(), 31);
}

// ─── Contract tests ──────────────────────────────────────────────────────────

#[test]
fn insert_returns_the_prior_value() {
    let mut map = ChainedHashMap::new();
    assert_eq!(map.insert("k", 1), None);
    assert_eq!(map.insert("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"k"), Some(&2));
}

#[test]
fn keys_and_values_are_paired() {
    let map: ChainedHashMap<i32, i32> = (0..50).map(|k| (k, k + 100)).collect();
    for (key, value) in map.keys().zip(map.values()) {
        assert_eq!(*value, key + 100);
    }
    assert_eq!(map.keys().count(), 50);
}

#[test]
fn key_of_scans_in_iteration_order() {
    let map: ChainedHashMap<i32, &str> = [(1, "x"), (2, "y")].into_iter().collect();
    assert_eq!(map.key_of(&"y"), Some(&2));
    assert_eq!(map.key_of(&"z"), None);

    // With duplicated values the winner is the first in iteration order.
    let map: ChainedHashMap<i32, &str> = [(1, "x"), (2, "x")].into_iter().collect();
    let first_key = map.keys().find(|&&k| map.get(&k) == Some(&"x")).copied();
    assert_eq!(map.key_of(&"x").copied(), first_key);
}

#[test]
fn borrowed_key_lookups() {
    let mut map: ChainedHashMap<String, i32> = ChainedHashMap::new();
    map.insert("alpha".to_owned(), 1);
    map.insert("beta".to_owned(), 2);

    assert_eq!(map.get("alpha"), Some(&1));
    assert!(map.contains_key("beta"));
    assert_eq!(map.remove("alpha"), Some(1));
}

#[test]
fn owning_iteration_yields_every_entry() {
    let map: ChainedHashMap<i32, i32> = (0..30).map(|k| (k, k)).collect();
    let mut entries: Vec<_> = map.into_iter().collect();
    entries.sort_unstable();
    let expected: Vec<_> = (0..30).map(|k| (k, k)).collect();
    pretty_assertions::assert_eq!(entries, expected);
}
