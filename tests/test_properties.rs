use avl_collections::avl_tree::AvlMap;
use avl_collections::Error;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Put(u16, u16),
    Remove(u16),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        3 => (0u16..512, any::<u16>()).prop_map(|(key, value)| Op::Put(key, value)),
        2 => (0u16..512).prop_map(Op::Remove),
    ];
    prop::collection::vec(op, 0..400)
}

proptest! {
    #[test]
    fn prop_valid_after_every_operation(ops in ops()) {
        let mut map = AvlMap::new();
        for op in ops {
            match op {
                Op::Put(key, value) => {
                    map.put(key, value);
                },
                Op::Remove(key) => {
                    let _ = map.remove(&key);
                },
            }
            prop_assert!(map.is_valid_avl());
        }
    }

    #[test]
    fn prop_traversal_matches_live_keys(ops in ops()) {
        let mut map = AvlMap::new();
        let mut live = BTreeSet::new();
        for op in ops {
            match op {
                Op::Put(key, value) => {
                    map.put(key, value);
                    live.insert(key);
                },
                Op::Remove(key) => {
                    let _ = map.remove(&key);
                    live.remove(&key);
                },
            }
        }

        let keys: Vec<u16> = map.inorder_traversal().map(|(key, _)| *key).collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(keys, live.into_iter().collect::<Vec<u16>>());
    }

    #[test]
    fn prop_height_bound(keys in prop::collection::vec(any::<u32>(), 0..2000)) {
        let mut map = AvlMap::new();
        for key in keys {
            map.put(key, ());
        }
        let bound = 1.44 * ((map.len() + 2) as f64).log2() - 0.328;
        prop_assert!(f64::from(map.height()) <= bound);
    }

    #[test]
    fn prop_overwrite(
        keys in prop::collection::vec(0u16..512, 1..200),
        first in any::<u16>(),
        second in any::<u16>()
    ) {
        let mut map = AvlMap::new();
        for key in keys.iter() {
            map.put(*key, first);
        }
        let len = map.len();
        let key = keys[0];

        prop_assert_eq!(map.put(key, second), Some(first));
        prop_assert_eq!(map.len(), len);
        prop_assert_eq!(map.get(&key), Ok(&second));
    }

    #[test]
    fn prop_failed_remove_leaves_tree_unchanged(
        keys in prop::collection::vec(0u16..512, 0..200),
        missing in 512u16..1024
    ) {
        let mut map = AvlMap::new();
        for key in keys {
            map.put(key, ());
        }
        let len = map.len();
        let drawing = map.visualize();
        let rotations = map.rotations();

        prop_assert_eq!(map.remove(&missing), Err(Error::KeyNotFound));
        prop_assert_eq!(map.len(), len);
        prop_assert_eq!(map.visualize(), drawing);
        prop_assert_eq!(map.rotations(), rotations);
    }
}
