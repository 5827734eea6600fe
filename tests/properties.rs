//! Property tests, using `BTreeMap` as the reference sorted map.

use std::collections::BTreeMap;

use proptest::prelude::*;
use towers::SkipMap;

#[derive(Clone, Debug)]
enum MapOp {
    Insert(i16, u32),
    Remove(i16),
    Get(i16),
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = MapOp> {
    // Narrow keys so removes and overwrites actually hit.
    prop_oneof![
        10 => (-64i16..64, any::<u32>()).prop_map(|(key, value)| MapOp::Insert(key, value)),
        5 => (-64i16..64).prop_map(MapOp::Remove),
        5 => (-64i16..64).prop_map(MapOp::Get),
        1 => Just(MapOp::Clear),
    ]
}

/// Checks every forward link against the bottom lane using the public
/// layout: each link must land on the next column tall enough to have that
/// level, and the walk backwards must mirror the walk forwards.
fn assert_well_formed(map: &SkipMap<i16, u32>) {
    let heights: Vec<usize> = map.towers().map(|tower| tower.height()).collect();
    let tail = heights.len();

    for (position, tower) in map.towers().enumerate() {
        for (level, &span) in tower.spans().iter().enumerate() {
            let target = position + span;
            assert!(target <= tail);
            let target_height = if target == tail { map.height() } else { heights[target] };
            assert!(target_height > level);
            for skipped in position + 1..target {
                assert!(heights[skipped] <= level, "link at level {} skips a tall tower", level);
            }
        }
    }

    let forward: Vec<i16> = map.keys().copied().collect();
    let mut backward: Vec<i16> = map.keys().rev().copied().collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn behaves_like_btreemap(ops in prop::collection::vec(arbitrary_op(), 1..300), seed in any::<u64>()) {
        let mut map = SkipMap::seeded(seed);
        let mut model = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                }
                MapOp::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                MapOp::Get(key) => {
                    prop_assert_eq!(map.get(&key), model.get(&key));
                    prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
                }
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert!(map.iter().eq(model.iter()));
        prop_assert_eq!(map.first_key().ok(), model.keys().next());
        prop_assert_eq!(map.last_key().ok(), model.keys().next_back());
        assert_well_formed(&map);
    }

    #[test]
    fn links_hold_after_every_mutation(ops in prop::collection::vec(arbitrary_op(), 1..100)) {
        let mut map = SkipMap::new();
        for op in ops {
            match op {
                MapOp::Insert(key, value) => { map.insert(key, value); }
                MapOp::Remove(key) => { map.remove(&key); }
                MapOp::Get(key) => { map.get_traced(&key); }
                MapOp::Clear => map.clear(),
            }
            assert_well_formed(&map);
        }
    }

    #[test]
    fn keys_strictly_ascend(keys in prop::collection::vec(any::<i64>(), 0..200)) {
        let map: SkipMap<i64, ()> = keys.iter().map(|&key| (key, ())).collect();
        let collected: Vec<i64> = map.keys().copied().collect();
        prop_assert!(collected.windows(2).all(|pair| pair[0] < pair[1]));

        let mut distinct = keys.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(map.len(), distinct.len());
        prop_assert_eq!(collected, distinct);
    }

    #[test]
    fn last_write_wins(entries in prop::collection::vec((0u8..32, any::<u16>()), 0..100)) {
        let mut map = SkipMap::new();
        let mut expected = BTreeMap::new();
        map.extend(entries.iter().copied());
        expected.extend(entries.iter().copied());

        for (key, value) in &expected {
            prop_assert_eq!(map.get(key), Some(value));
        }
        let pairs: Vec<(u8, u16)> = map.into_iter().collect();
        prop_assert_eq!(pairs, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn removed_keys_stay_gone(keys in prop::collection::btree_set(any::<u16>(), 1..100)) {
        let mut map: SkipMap<u16, u16> = keys.iter().map(|&key| (key, key)).collect();
        let removed: Vec<u16> = keys.iter().copied().step_by(2).collect();
        for key in &removed {
            prop_assert_eq!(map.remove(key), Some(*key));
        }
        let len = map.len();
        for key in &removed {
            prop_assert!(!map.contains_key(key));
            prop_assert_eq!(map.remove(key), None);
        }
        prop_assert_eq!(map.len(), len);
        prop_assert_eq!(len, keys.len() - removed.len());
    }

    #[test]
    fn same_seed_same_layout(keys in prop::collection::vec(any::<u32>(), 0..100), seed in any::<u64>()) {
        let mut a = SkipMap::seeded(seed);
        let mut b = SkipMap::seeded(seed);
        for &key in &keys {
            a.insert(key, ());
            b.insert(key, ());
        }
        prop_assert!(a.towers().eq(b.towers()));
    }
}
