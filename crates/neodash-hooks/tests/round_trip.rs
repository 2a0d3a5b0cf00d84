use std::collections::BTreeMap;

use neodash_hooks::{KeyValueStore, MemoryStore, PersistedValue};
use proptest::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

fn reopen<T>(value: &T, fallback: T) -> T
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    let store = MemoryStore::durable();
    PersistedValue::open(store.clone(), "value", fallback.clone()).set(value.clone());
    PersistedValue::open(store, "value", fallback).get()
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |value| value.is_finite())
}

fn nested() -> impl Strategy<Value = BTreeMap<String, Vec<Option<f64>>>> {
    proptest::collection::btree_map(
        any::<String>(),
        proptest::collection::vec(proptest::option::of(finite_f64()), 0..6),
        0..6,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn finite_floats_reload_bit_for_bit(value in finite_f64()) {
        prop_assert_eq!(reopen(&value, 1.5).to_bits(), value.to_bits());
    }

    #[test]
    fn unicode_strings_reload_unchanged(value in any::<String>()) {
        prop_assert_eq!(reopen(&value, "fallback".to_string()), value);
    }

    #[test]
    fn nested_maps_reload_unchanged(value in nested()) {
        prop_assert_eq!(reopen(&value, BTreeMap::new()), value);
    }

    #[test]
    fn sequences_of_records_reload_unchanged(
        value in proptest::collection::vec((any::<i64>(), any::<bool>(), any::<String>()), 0..8)
    ) {
        prop_assert_eq!(reopen(&value, Vec::new()), value);
    }

    #[test]
    fn non_finite_floats_leave_the_store_untouched(
        previous in finite_f64(),
        rejected in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)]
    ) {
        let store = MemoryStore::durable();
        let value = PersistedValue::open(store.clone(), "value", 0.0_f64);
        value.set(previous);
        let stored = store.get("value").ok().flatten();

        value.set(rejected);
        prop_assert_eq!(value.get().to_bits(), rejected.to_bits());
        prop_assert_eq!(store.get("value").ok().flatten(), stored);
        prop_assert_eq!(PersistedValue::open(store, "value", 0.0_f64).get().to_bits(), previous.to_bits());
    }
}
