//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the lifetime normalization rules of cache items.

use std::sync::Arc;

use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

use crate::cache::{CacheItem, Expiration, FixedClock, ItemFactory, EXPIRED_LIFETIME};

// == Test Configuration ==
const TEST_NOW: i64 = 1_700_000_000;

fn factory(default_lifetime: i64) -> ItemFactory {
    ItemFactory::new(default_lifetime).with_clock(Arc::new(FixedClock::new(TEST_NOW)))
}

// == Strategies ==
/// Generates cache keys, including characters a backend might reject
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:.{}]{1,64}"
}

/// Generates a relative or default expiration
#[derive(Debug, Clone)]
enum Relative {
    Default,
    Seconds(i64),
    Delta(i64),
}

fn relative_strategy() -> impl Strategy<Value = Relative> {
    prop_oneof![
        Just(Relative::Default),
        (-1_000_000i64..1_000_000).prop_map(Relative::Seconds),
        (-1_000_000i64..1_000_000).prop_map(Relative::Delta),
    ]
}

fn apply(item: &mut CacheItem<i64>, op: &Relative) {
    let result = match op {
        Relative::Default => item.expires_after(Expiration::Default),
        Relative::Seconds(n) => item.expires_after(*n),
        Relative::Delta(n) => item.expires_after(TimeDelta::seconds(*n)),
    };
    result.unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* key and sequence of operations, the item keeps its key.
    #[test]
    fn prop_key_is_stable(
        key in key_strategy(),
        ops in prop::collection::vec(relative_strategy(), 0..20)
    ) {
        let mut item: CacheItem<i64> = factory(30).miss(key.clone());

        for op in &ops {
            apply(&mut item, op);
            item.set(1);
        }

        prop_assert_eq!(item.key(), key.as_str());
    }

    // *For any* value, set followed by get returns it.
    #[test]
    fn prop_set_then_get(value in any::<i64>(), other in any::<i64>()) {
        let mut item = factory(30).hit("k", other);
        item.set(value);

        prop_assert_eq!(item.get(), Some(&value));
        prop_assert!(item.is_hit());
    }

    // *For any* sequence of expirations, the stored lifetime is never zero.
    #[test]
    fn prop_lifetime_never_zero(
        default_lifetime in 1i64..100_000,
        ops in prop::collection::vec(relative_strategy(), 1..20)
    ) {
        let mut item: CacheItem<i64> = factory(default_lifetime).miss("k");

        for op in &ops {
            apply(&mut item, op);
            prop_assert_ne!(item.lifetime(), Some(0));
        }
    }

    // *For any* prior state, resetting to default yields the default lifetime.
    #[test]
    fn prop_default_reset_is_idempotent(
        default_lifetime in -10i64..100_000,
        ops in prop::collection::vec(relative_strategy(), 0..10)
    ) {
        let mut item: CacheItem<i64> = factory(default_lifetime).miss("k");
        for op in &ops {
            apply(&mut item, op);
        }

        item.expires_at(Expiration::Default).unwrap();
        prop_assert_eq!(item.lifetime(), Some(default_lifetime));
        item.expires_after(Expiration::Default).unwrap();
        prop_assert_eq!(item.lifetime(), Some(default_lifetime));
    }

    // *For any* instant N seconds from now, the lifetime is N, or -1 when N is 0.
    #[test]
    fn prop_expires_at_offset(offset in -1_000_000i64..1_000_000) {
        let mut item: CacheItem<i64> = factory(30).miss("k");
        let instant = Utc.timestamp_opt(TEST_NOW + offset, 0).unwrap();

        item.expires_at(instant).unwrap();

        let expected = if offset == 0 { EXPIRED_LIFETIME } else { offset };
        prop_assert_eq!(item.lifetime(), Some(expected));
    }

    // *For any* exact delta, the interval and raw seconds forms agree.
    #[test]
    fn prop_delta_matches_seconds(seconds in -1_000_000i64..1_000_000) {
        let mut by_delta: CacheItem<i64> = factory(30).miss("a");
        let mut by_seconds: CacheItem<i64> = factory(30).miss("b");

        by_delta.expires_after(TimeDelta::seconds(seconds)).unwrap();
        by_seconds.expires_after(seconds).unwrap();

        prop_assert_eq!(by_delta.lifetime(), by_seconds.lifetime());
    }

    // *For any* prior lifetime, rejected input leaves it unchanged.
    #[test]
    fn prop_rejected_input_keeps_lifetime(
        ops in prop::collection::vec(relative_strategy(), 0..5),
        raw in "[a-z ]{0,16}"
    ) {
        let mut item: CacheItem<i64> = factory(30).miss("k");
        for op in &ops {
            apply(&mut item, op);
        }
        let before = item.lifetime();

        prop_assert!(item.expires_at(serde_json::Value::String(raw.clone())).is_err());
        prop_assert!(item.expires_after(serde_json::Value::String(raw)).is_err());
        prop_assert!(item.expires_at(7).is_err());
        prop_assert_eq!(item.lifetime(), before);
    }
}
