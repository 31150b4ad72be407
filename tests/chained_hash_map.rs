// ChainedHashMap integration tests.
//
// Each test names the behavior verified. Core invariants exercised:
// - Construction validates every parameter.
// - Put/get/remove consistency, including across resizes.
// - Load factor never exceeds the threshold after an insert.
// - Iteration yields exactly the stored entries, once each.
// - clear empties the table without shrinking the chain array.
use chained_hashmap::{ChainedHashMap, InvalidArgument, TableConfig};
use std::collections::BTreeSet;

fn table(lf: f64, chains: usize, cap: usize) -> ChainedHashMap<u64, String> {
    ChainedHashMap::with_config(TableConfig::new(lf, chains, cap)).expect("valid config")
}

// Test: resize on the pre-insert check.
// Assumes: chain count 2, threshold 0.75.
// Verifies: growth to the prime 5; all values survive the rehash.
#[test]
fn three_inserts_grow_to_prime() {
    let mut m = ChainedHashMap::with_config(TableConfig::new(0.75, 2, 2)).unwrap();
    m.insert(1, "a");
    m.insert(2, "b");
    m.insert(3, "c");
    assert_eq!(m.len(), 3);
    assert_eq!(m.chain_count(), 5);
    assert_eq!(m.get(&2), Some(&"b"));
}

#[test]
fn construction_validates_parameters() {
    for (cfg, want) in [
        (TableConfig::new(0.0, 1, 1), InvalidArgument::LoadFactor(0.0)),
        (TableConfig::new(-0.5, 1, 1), InvalidArgument::LoadFactor(-0.5)),
        (TableConfig::new(1.0, 0, 1), InvalidArgument::ZeroChainCount),
        (TableConfig::new(1.0, 1, 0), InvalidArgument::ZeroChainCapacity),
    ] {
        assert_eq!(ChainedHashMap::<u8, u8>::with_config(cfg).err(), Some(want));
    }
}

// Test: put/get consistency and previous value.
// Verifies: overwriting keeps len and returns the old value.
#[test]
fn put_get_and_overwrite() {
    let mut m = table(0.75, 4, 2);
    for i in 0..100u64 {
        assert_eq!(m.insert(i, format!("v{}", i)), None);
    }
    assert_eq!(m.len(), 100);
    assert_eq!(m.insert(42, "new".to_string()), Some("v42".to_string()));
    assert_eq!(m.len(), 100);
    assert_eq!(m.get(&42u64).map(String::as_str), Some("new"));
    for i in (0..100u64).filter(|&i| i != 42) {
        assert_eq!(m.get(&i), Some(&format!("v{}", i)));
        assert!(m.contains_key(&i));
    }
}

// Test: load-factor invariant under steady growth.
#[test]
fn load_factor_bounded_after_every_insert() {
    let mut m = table(0.75, 1, 1);
    for i in 0..2_000u64 {
        m.insert(i, String::new());
        assert!(
            m.load_factor() <= 0.75,
            "after {} inserts: {} / {}",
            i + 1,
            m.len(),
            m.chain_count()
        );
    }
}

// Test: removal correctness.
// Verifies: len drops by one per present key; other keys keep their values;
// absent keys return None without changing len.
#[test]
fn remove_present_and_absent() {
    let mut m = table(2.0, 3, 1);
    for i in 0..50u64 {
        m.insert(i, i.to_string());
    }
    for i in (0..50u64).step_by(3) {
        let before = m.len();
        assert_eq!(m.remove(&i), Some(i.to_string()));
        assert_eq!(m.len(), before - 1);
        assert!(!m.contains_key(&i));
        assert_eq!(m.remove(&i), None);
        assert_eq!(m.len(), before - 1);
    }
    for i in (0..50u64).filter(|i| i % 3 != 0) {
        assert_eq!(m.get(&i), Some(&i.to_string()));
    }
    assert_eq!(m.remove(&1_000u64), None);
}

// Test: iteration completeness.
// Verifies: the iterated set equals the inserted set, with no duplicates.
#[test]
fn iteration_matches_contents() {
    let mut m = table(0.75, 7, 2);
    for i in 0..300u64 {
        m.insert(i * 7919, format!("{}", i));
    }
    let pairs: Vec<(u64, String)> = m.iter().map(|(k, v)| (*k, v.clone())).collect();
    assert_eq!(pairs.len(), m.len());
    let unique: BTreeSet<u64> = pairs.iter().map(|(k, _)| *k).collect();
    assert_eq!(unique.len(), pairs.len());
    for (k, v) in &pairs {
        assert_eq!(m.get(k), Some(v));
    }

    let mut it = m.iter();
    for _ in 0..m.len() {
        assert!(it.next().is_some());
    }
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

// Test: clear is idempotent and keeps the grown chain count.
#[test]
fn clear_resets_contents_only() {
    let mut m = table(0.75, 2, 2);
    for i in 0..40u64 {
        m.insert(i, String::new());
    }
    let chains = m.chain_count();
    m.clear();
    m.clear();
    assert_eq!(m.len(), 0);
    assert_eq!(m.chain_count(), chains);
    assert!((0..40u64).all(|i| !m.contains_key(&i)));
    assert_eq!(m.iter().count(), 0);
}

#[test]
fn borrowed_lookup_with_str() {
    let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
    m.insert("hello".to_string(), 1);
    assert!(m.contains_key("hello"));
    assert_eq!(m.get("hello"), Some(&1));
    assert!(!m.contains_key("world"));
    *m.get_mut("hello").unwrap() += 1;
    assert_eq!(m.remove("hello"), Some(2));
}

#[test]
fn equality_and_debug() {
    let a: ChainedHashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    let mut b: ChainedHashMap<&str, i32> = ChainedHashMap::new();
    b.insert("b", 2);
    b.insert("a", 1);
    assert_eq!(a, b);
    b.insert("a", 9);
    assert_ne!(a, b);

    let single: ChainedHashMap<&str, i32> = [("only", 1)].into_iter().collect();
    assert_eq!(format!("{:?}", single), r#"{"only": 1}"#);
}
