// ArrayMap integration tests.
//
// Core invariants exercised through the public API:
// - Construction: capacity 0 is rejected, anything else is accepted.
// - Put/get consistency and previous-value returns.
// - Removal: swap-with-last keeps every other key retrievable.
// - Iteration: exactly the live entries, in slot order, then `None`.
use chained_hashmap::{ArrayMap, InvalidArgument};

// Test: growth from a single slot.
// Verifies: the second insert succeeds by doubling; removal of the first
// key leaves the second intact.
#[test]
fn capacity_one_scenario() {
    let mut m = ArrayMap::with_capacity(1).expect("capacity 1 is valid");
    assert_eq!(m.insert("x".to_string(), 10), None);
    assert_eq!(m.insert("y".to_string(), 20), None);
    assert_eq!(m.capacity(), 2);
    assert_eq!(m.remove("x"), Some(10));
    assert_eq!(m.get("x"), None);
    assert_eq!(m.get("y"), Some(&20));
    assert_eq!(m.len(), 1);
}

#[test]
fn zero_capacity_is_invalid_argument() {
    let err = ArrayMap::<u8, u8>::with_capacity(0).err();
    assert_eq!(err, Some(InvalidArgument::ZeroCapacity));
}

// Test: previous value on overwrite.
// Verifies: the second put returns the first value; len is unchanged.
#[test]
fn put_returns_previous() {
    let mut m = ArrayMap::new();
    assert_eq!(m.insert(1, "v1"), None);
    assert_eq!(m.insert(1, "v2"), Some("v1"));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&1), Some(&"v2"));
    assert!(m.contains_key(&1));
}

// Test: removal order semantics.
// Verifies: the last entry fills the hole, so iteration order after a
// removal is a, e, c, d.
#[test]
fn removal_is_swap_with_last() {
    let mut m: ArrayMap<char, usize> = "abcde".chars().zip(0..).collect();
    assert_eq!(m.remove(&'b'), Some(1));
    let order: String = m.keys().collect();
    assert_eq!(order, "aecd");
    for (k, v) in [('a', 0), ('c', 2), ('d', 3), ('e', 4)] {
        assert_eq!(m.get(&k), Some(&v));
    }
}

#[test]
fn clear_then_reuse() {
    let mut m = ArrayMap::new();
    m.extend((0..25).map(|i| (i, i)));
    assert_eq!(m.len(), 25);
    m.clear();
    assert!(m.is_empty());
    assert!((0..25).all(|i| !m.contains_key(&i)));
    m.insert(7, 70);
    assert_eq!(m.values().copied().collect::<Vec<_>>(), vec![70]);
}

#[test]
fn iterator_exhaustion() {
    let m: ArrayMap<i32, i32> = [(1, 1)].into_iter().collect();
    let mut it = m.iter();
    assert_eq!(it.next(), Some((&1, &1)));
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);

    let empty: ArrayMap<i32, i32> = ArrayMap::new();
    assert_eq!(empty.iter().next(), None);
}
