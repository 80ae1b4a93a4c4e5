//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store behaviour over generated operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::cache::{CacheStore, Ttl};

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Vec<u8> },
    Delete { key: String },
    Flush,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Flush),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The store agrees with a plain HashMap for non-expiring entries.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let store = CacheStore::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), &value).unwrap();
                    model.insert(key, value);
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Flush => {
                    store.flush();
                    model.clear();
                }
            }
        }

        prop_assert_eq!(store.count(), model.len());
        for (key, value) in &model {
            let stored = store.get_raw(key);
            prop_assert_eq!(stored.as_ref(), Some(value));
            prop_assert_eq!(store.ttl(key).ok(), Some(Ttl::Infinite));
        }
    }

    // Purging at an instant removes exactly the entries due by then.
    #[test]
    fn prop_delete_expired_is_exact(
        entries in prop::collection::hash_map(key_strategy(), 0u64..4, 1..30)
    ) {
        let store = CacheStore::new();
        // 0 = never expires, otherwise expires after n minutes
        for (key, minutes) in &entries {
            store
                .set_with_expiration(key.clone(), "v", Duration::from_secs(minutes * 60))
                .unwrap();
        }

        let cutoff = Instant::now() + Duration::from_secs(150);
        let removed = store.delete_expired_at(cutoff);

        let expected_removed = entries.values().filter(|m| **m == 1 || **m == 2).count();
        prop_assert_eq!(removed, expected_removed);
        prop_assert_eq!(store.count(), entries.len() - expected_removed);

        for (key, minutes) in &entries {
            let kept = *minutes == 0 || *minutes == 3;
            prop_assert_eq!(store.exists(key), kept);
        }
    }

    // Replacing a key never leaves more than one entry for it.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        first in value_strategy(),
        second in value_strategy()
    ) {
        let store = CacheStore::new();

        store.set_with_expiration(key.clone(), &first, Duration::from_secs(60)).unwrap();
        store.set(key.clone(), &second).unwrap();

        prop_assert_eq!(store.get_raw(&key), Some(second));
        prop_assert_eq!(store.ttl(&key).ok(), Some(Ttl::Infinite));
        prop_assert_eq!(store.count(), 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Threads working on disjoint keys never lose updates or see torn entries.
    #[test]
    fn prop_concurrent_disjoint_keys(values in prop::collection::vec(value_strategy(), 1..8)) {
        let store = Arc::new(CacheStore::new());

        let handles: Vec<_> = values
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, value)| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for round in 0..50 {
                        let key = format!("t{}:{}", i, round % 5);
                        store
                            .set_with_expiration(key.clone(), &value, Duration::from_secs(60))
                            .unwrap();
                        let stored = store.get_raw(&key);
                        assert_eq!(stored.as_ref(), Some(&value));
                        assert!(matches!(store.ttl(&key), Ok(Ttl::Remaining(_))));
                        if round % 2 == 0 {
                            store.delete(&key);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            prop_assert!(handle.join().is_ok(), "Worker thread panicked");
        }

        // The last rounds (45..50) leave slots 0, 2 and 4 set for every thread
        prop_assert_eq!(store.count(), values.len() * 3);
        for (i, value) in values.iter().enumerate() {
            for slot in [0, 2, 4] {
                let stored = store.get_raw(&format!("t{}:{}", i, slot));
                prop_assert_eq!(stored.as_ref(), Some(value));
            }
            let deleted = !store.exists(&format!("t{}:1", i));
            prop_assert!(deleted, "Slot 1 of thread {} should be deleted", i);
        }
    }
}
