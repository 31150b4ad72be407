#![cfg(test)]

// Property tests for ChainedHashMap and ArrayMap kept inside the crate so
// they can reach crate-private helpers such as the prime test.

use crate::array_map::ArrayMap;
use crate::chained_hash_map::ChainedHashMap;
use crate::config::TableConfig;
use crate::primes::is_prime;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hasher};

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            3 => idx.clone().prop_map(Op::Remove),
            2 => idx.clone().prop_map(Op::Get),
            1 => "[a-z]{0,4}".prop_map(Op::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = TableConfig> {
    (0.1f64..4.0, 1usize..12, 1usize..4)
        .prop_map(|(lf, chains, cap)| TableConfig::new(lf, chains, cap))
}

// Collision variant: every key hashes to the same chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

fn run_against_model<S: BuildHasher>(
    mut sut: ChainedHashMap<String, i32, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let threshold = sut.config().load_factor_threshold;
    let mut last_chain_count = sut.chain_count();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
                prop_assert!(sut.load_factor() <= threshold);
            }
            Op::Remove(i) => {
                prop_assert_eq!(sut.remove(&pool[i]), model.remove(&pool[i]));
            }
            Op::Get(i) => {
                prop_assert_eq!(sut.get(&pool[i]), model.get(&pool[i]));
                prop_assert_eq!(sut.contains_key(&pool[i]), model.contains_key(&pool[i]));
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            Op::Mutate(i, d) => {
                if let Some(v) = sut.get_mut(&pool[i]) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(&pool[i]) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::Clear => {
                let before = sut.chain_count();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.chain_count(), before);
            }
            Op::Iterate => {
                let it = sut.iter();
                prop_assert_eq!(it.len(), model.len());
                let seen: BTreeMap<String, i32> =
                    it.map(|(k, v)| (k.clone(), *v)).collect();
                // No duplicates: collapsing into a map lost nothing.
                prop_assert_eq!(seen.len(), model.len());
                let want: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(seen, want);
            }
        }

        if sut.chain_count() != last_chain_count {
            prop_assert!(sut.chain_count() > last_chain_count);
            prop_assert!(is_prime(sut.chain_count()));
            last_chain_count = sut.chain_count();
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences and policies:
// - insert/remove return the same previous value as the model.
// - get/contains_key parity; get_mut writes are visible.
// - load factor stays within the threshold after every insert.
// - chain count only grows, always to a prime; clear keeps it.
// - iteration yields each entry once and matches the model exactly.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(config in arb_config(), (pool, ops) in arb_scenario()) {
        let sut = ChainedHashMap::with_config(config).unwrap();
        run_against_model(sut, &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_with_collisions(config in arb_config(), (pool, ops) in arb_scenario()) {
        let sut = ChainedHashMap::with_config_and_hasher(config, ConstBuildHasher).unwrap();
        run_against_model(sut, &pool, ops)?;
    }
}

// Property: ArrayMap keeps every other key intact across removals and
// keeps its occupied prefix dense.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_array_map_remove_keeps_others(
        keys in proptest::collection::btree_set(0u16..200, 1..40),
        cap in 1usize..8,
        victim_seed in any::<usize>(),
    ) {
        let keys: Vec<u16> = keys.into_iter().collect();
        let mut m = ArrayMap::with_capacity(cap).unwrap();
        for &k in &keys {
            prop_assert_eq!(m.insert(k, u32::from(k) * 3), None);
        }
        prop_assert!(m.capacity() >= keys.len());

        let victim = keys[victim_seed % keys.len()];
        prop_assert_eq!(m.remove(&victim), Some(u32::from(victim) * 3));
        prop_assert!(!m.contains_key(&victim));
        prop_assert_eq!(m.len(), keys.len() - 1);
        for &k in keys.iter().filter(|&&k| k != victim) {
            prop_assert_eq!(m.get(&k), Some(&(u32::from(k) * 3)));
        }
        prop_assert_eq!(m.iter().count(), keys.len() - 1);
    }
}
