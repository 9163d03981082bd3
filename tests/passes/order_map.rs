//! Property coverage for `OrderedMap`'s insertion-order guarantee and for
//! fingerprint determinism (SPEC_FULL.md §8, "Round-trip / idempotence").

use proptest::prelude::*;

use langforge::model::language_model::OrderedMap;

proptest! {
    #[test]
    fn ordered_map_iterates_in_first_insertion_order(keys in prop::collection::vec("[a-zA-Z][a-zA-Z0-9]{0,6}", 0..20)) {
        let mut map: OrderedMap<usize> = OrderedMap::new();
        let mut first_seen = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            if !map.contains(key) {
                first_seen.push(key.clone());
            }
            map.insert(key.clone(), i);
        }
        let iterated: Vec<String> = map.keys().map(|k| k.to_string()).collect();
        prop_assert_eq!(iterated, first_seen);
    }

    #[test]
    fn ordered_map_insert_overwrites_value_without_moving_position(
        a in "[a-zA-Z][a-zA-Z0-9]{0,6}",
        b in "[a-zA-Z][a-zA-Z0-9]{0,6}",
    ) {
        prop_assume!(a != b);
        let mut map: OrderedMap<usize> = OrderedMap::new();
        map.insert(a.clone(), 1);
        map.insert(b.clone(), 2);
        map.insert(a.clone(), 99);

        let order: Vec<String> = map.keys().map(|k| k.to_string()).collect();
        prop_assert_eq!(order, vec![a.clone(), b]);
        prop_assert_eq!(*map.get(&a).unwrap(), 99);
    }
}
