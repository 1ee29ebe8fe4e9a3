use avl_collections::avl_tree::{AvlMap, AvlSet};
use avl_collections::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

fn height_bound(len: usize) -> f64 {
    1.44 * ((len + 2) as f64).log2() - 0.328
}

#[test]
fn int_test_avl_map() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut map = AvlMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..100_000 {
        let key = rng.gen::<u16>();
        let val = rng.gen::<u32>();

        if rng.gen_bool(0.6) {
            assert_eq!(map.put(key, val), expected.insert(key, val));
        } else {
            match expected.remove(&key) {
                Some(value) => assert_eq!(map.remove(&key), Ok((key, value))),
                None => assert_eq!(map.remove(&key), Err(Error::KeyNotFound)),
            }
        }
        assert_eq!(map.len(), expected.len());
    }

    assert!(map.is_valid_avl());
    assert!(f64::from(map.height()) <= height_bound(map.len()));
    assert!(map.iter().eq(expected.iter()));
    assert_eq!(map.min_key().ok(), expected.keys().next());
    assert_eq!(map.max_key().ok(), expected.keys().next_back());
}

#[test]
fn int_test_avl_map_valid_after_every_operation() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut map = AvlMap::new();

    for _ in 0..5_000 {
        let key = rng.gen_range(0..256u32);
        if rng.gen_bool(0.5) {
            map.put(key, ());
        } else {
            let _ = map.remove(&key);
        }
        assert!(map.is_valid_avl());
        assert!(map
            .balance_factor_distribution()
            .iter()
            .all(|factor| (-1..=1).contains(factor)));
    }
}

#[test]
fn int_test_sequential_height() {
    let mut map = AvlMap::new();
    for key in 0..1000u32 {
        map.put(key, key);
    }
    assert!(map.height() <= 14);
    assert!(f64::from(map.height()) <= height_bound(1000));

    let mut map = AvlMap::new();
    for key in (0..1000u32).rev() {
        map.put(key, key);
    }
    assert!(map.height() <= 14);
    assert!(map.is_valid_avl());
}

#[test]
fn int_test_rotation_example() {
    let mut map = AvlMap::new();
    map.put(5, ());
    map.put(7, ());
    map.put(9, ());

    assert_eq!(map.rotations().left, 1);
    assert_eq!(map.rotations().right, 0);
    assert_eq!(map.height(), 1);
    assert_eq!(map.visualize(), "└── 7(h=1,bf=0)\n    ├── 9(h=0,bf=0)\n    └── 5(h=0,bf=0)");
}

#[test]
fn int_test_remove_with_two_children() {
    let mut map: AvlMap<u32, u32> = vec![5, 3, 7, 2, 4, 6, 8].into_iter().map(|key| (key, key)).collect();
    assert_eq!(map.remove(&5), Ok((5, 5)));
    assert!(map.visualize().starts_with("└── 6(h=2,bf=0)"));
    assert!(map.is_valid_avl());
    assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![2, 3, 4, 6, 7, 8]);
}

#[test]
fn int_test_string_keys() {
    let mut map = AvlMap::new();
    assert_eq!(map.get("missing"), Err(Error::KeyNotFound));
    for word in "the quick brown fox jumps over the lazy dog".split(' ') {
        let count = map.get(word).map(|count| count + 1).unwrap_or(1);
        map.put(word.to_string(), count);
    }
    assert_eq!(map.get("the"), Ok(&2));
    assert_eq!(map.len(), 8);
    assert_eq!(map.min_key().map(|key| key.as_str()), Ok("brown"));
    assert!(map.is_valid_avl());
}

#[test]
fn int_test_avl_set() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut set = AvlSet::new();
    let mut expected = Vec::new();

    for _ in 0..10_000 {
        let key = rng.gen::<u32>();
        if set.insert(key) {
            expected.push(key);
        }
    }

    expected.sort();
    assert!(set.is_valid_avl());
    assert_eq!(set.len(), expected.len());
    assert_eq!(set.into_iter().collect::<Vec<u32>>(), expected);
}
