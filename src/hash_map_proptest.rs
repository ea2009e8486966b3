#![cfg(all(test, feature = "std"))]

// Model-based property tests for HashMap, run against std's map. Kept inside
// the crate so they can reach `insert_or_replace`.

use std::collections::BTreeSet;
use std::collections::HashMap as ModelMap;

use proptest::prelude::*;

use crate::Error;
use crate::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, i32),
    InsertOrReplace(u16, i32),
    Erase(u16),
    At(u16),
    GetOrInsertDefault(u16),
    Clear,
    ShrinkToFit,
    Iterate,
}

// Small key space so duplicates, collisions and both resize directions all
// show up within one run.
fn arb_op() -> impl Strategy<Value = Op> {
    let key = 0u16..96;
    prop_oneof![
        4 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::InsertOrReplace(k, v)),
        4 => key.clone().prop_map(Op::Erase),
        2 => key.clone().prop_map(Op::At),
        1 => key.prop_map(Op::GetOrInsertDefault),
        1 => Just(Op::Clear),
        1 => Just(Op::ShrinkToFit),
        1 => Just(Op::Iterate),
    ]
}

fn check_structure(
    sut: &HashMap<u16, i32>,
    model: &ModelMap<u16, i32>,
) -> Result<(), TestCaseError> {
    prop_assert!(sut.capacity().is_power_of_two());
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.iter().count(), model.len());
    Ok(())
}

// Property: a random operation sequence leaves the map observably equal to
// the model after every step.
// - `insert` never overwrites; `insert_or_replace` always does.
// - `erase` reports presence and is followed by the shrink check, so the
//   load factor ends at or above 1/4 (or the map collapses to one bucket).
// - Iteration yields every live key once, in non-decreasing bucket order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in proptest::collection::vec(arb_op(), 1..300)) {
        let mut sut: HashMap<u16, i32> = HashMap::new();
        let mut model: ModelMap<u16, i32> = ModelMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let already = model.contains_key(&k);
                    prop_assert_eq!(sut.insert(k, v), !already);
                    model.entry(k).or_insert(v);
                }
                Op::InsertOrReplace(k, v) => {
                    prop_assert_eq!(sut.insert_or_replace(k, v), model.insert(k, v));
                }
                Op::Erase(k) => {
                    let present = model.remove(&k).is_some();
                    prop_assert_eq!(sut.erase(&k), present);
                    if present {
                        let len = sut.len();
                        let capacity = sut.capacity();
                        prop_assert!(
                            4 * len >= capacity || (len == 0 && capacity == 1),
                            "len {} left capacity {} below 1/4", len, capacity
                        );
                    }
                }
                Op::At(k) => match model.get(&k) {
                    Some(v) => {
                        prop_assert_eq!(sut.at(&k), Ok(v));
                    }
                    None => {
                        prop_assert_eq!(sut.at(&k), Err(Error::KeyNotFound));
                    }
                },
                Op::GetOrInsertDefault(k) => {
                    let expected = *model.entry(k).or_default();
                    prop_assert_eq!(*sut.get_or_insert_default(k), expected);
                }
                Op::Clear => {
                    let capacity = sut.capacity();
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), capacity);
                }
                Op::ShrinkToFit => {
                    sut.shrink_to_fit();
                }
                Op::Iterate => {
                    let keys: BTreeSet<u16> = sut.keys().copied().collect();
                    let expected: BTreeSet<u16> = model.keys().copied().collect();
                    prop_assert_eq!(keys, expected);

                    let indexes: Vec<usize> = sut
                        .keys()
                        .map(|k| sut.bucket_index(k).unwrap_or(usize::MAX))
                        .collect();
                    prop_assert!(indexes.windows(2).all(|w| w[0] <= w[1]));
                    for (k, v) in sut.iter() {
                        prop_assert_eq!(model.get(k), Some(v));
                    }
                }
            }
            check_structure(&sut, &model)?;
            prop_assert!(4 * sut.len() <= 3 * sut.capacity(), "load factor above 3/4");
        }
    }
}

// Property: building from parallel sequences matches last-wins loading into
// the model, runs a single grow check, and compares equal to the same pairs
// inserted one at a time.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_from_keys_values_last_wins(
        pairs in proptest::collection::vec((0u16..512, any::<i32>()), 0..400)
    ) {
        let (keys, values): (Vec<u16>, Vec<i32>) = pairs.iter().copied().unzip();
        let built: HashMap<u16, i32> = match HashMap::from_keys_values(keys, values) {
            Ok(map) => map,
            Err(err) => return Err(TestCaseError::fail(format!("{err}"))),
        };

        let mut model = ModelMap::new();
        let mut incremental: HashMap<u16, i32> = HashMap::new();
        for (k, v) in pairs {
            model.insert(k, v);
            incremental.insert_or_replace(k, v);
        }

        check_structure(&built, &model)?;
        // One grow check after loading: at most a single doubling from 16.
        let expected_capacity = if 4 * model.len() > 3 * 16 { 32 } else { 16 };
        prop_assert_eq!(built.capacity(), expected_capacity);
        for (k, v) in &model {
            prop_assert_eq!(built.at(k), Ok(v));
        }
        prop_assert!(built == incremental);
        prop_assert!(incremental == built);
    }
}

// Property: equality does not depend on insertion order or on the resize
// history that produced each side.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_equality_ignores_history(
        keys in proptest::collection::btree_set(0u16..1000, 0..200),
        extra in proptest::collection::btree_set(1000u16..2000, 0..200),
    ) {
        let mut forward: HashMap<u16, u16> = HashMap::new();
        for &k in &keys {
            forward.insert(k, k);
        }

        let mut churned: HashMap<u16, u16> = HashMap::new();
        for &k in extra.iter().chain(keys.iter().rev()) {
            churned.insert(k, k);
        }
        for k in &extra {
            prop_assert!(churned.erase(k));
        }

        prop_assert!(forward == churned);

        if let Some(&k) = keys.iter().next() {
            if let Ok(v) = churned.at_mut(&k) {
                *v = v.wrapping_add(1);
            }
            prop_assert!(forward != churned);
            prop_assert!(churned != forward);
        }
    }
}
