//! Contract Tests for the Cache Store
//!
//! Exercises the public cache API the way a retrieval layer uses it.

use std::sync::Arc;
use std::time::Duration;

use lookup_cache::cache::{CacheKey, ManualClock};
use lookup_cache::{CacheError, CacheStore};

fn store(capacity: usize, ttl: Option<Duration>) -> (CacheStore<u32>, ManualClock) {
    let clock = ManualClock::new(1_000);
    let store = CacheStore::with_clock(capacity, ttl, Arc::new(clock.clone())).unwrap();
    (store, clock)
}

#[test]
fn test_two_slot_scenario() {
    let (mut cache, _) = store(2, None);

    cache.set("x", 10);
    cache.set("y", 20);
    assert_eq!(cache.get("x"), Some(&10));
    cache.set("z", 30);

    assert_eq!(cache.peek("x"), Some(&10));
    assert_eq!(cache.peek("z"), Some(&30));
    assert_eq!(cache.get("y"), None);

    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[test]
fn test_recency_promotion_on_read() {
    let (mut cache, _) = store(2, None);

    cache.set("a", 1);
    cache.set("b", 2);
    cache.get("a");
    cache.set("c", 3);

    assert_eq!(cache.keys(), vec!["a", "c"]);
}

#[test]
fn test_ttl_either_side_of_boundary() {
    let ttl = Duration::from_secs(30);
    let epsilon = Duration::from_millis(1);

    let (mut cache, clock) = store(4, Some(ttl));
    cache.set("a", 1);
    clock.advance(ttl - epsilon);
    assert_eq!(cache.get("a"), Some(&1));

    let (mut cache, clock) = store(4, Some(ttl));
    cache.set("a", 1);
    clock.advance(ttl + epsilon);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.stats().misses, 1);
}

#[test]
fn test_memoization_pattern_with_namespaced_keys() {
    let (mut cache, _) = store(16, None);
    let mut upstream_calls = 0;

    let mut search = |cache: &mut CacheStore<u32>, source: &str, query: &str, limit: u32| {
        let key = CacheKey::new(source).part(query).part(limit);
        if let Some(hit) = cache.get(key.as_str()) {
            return *hit;
        }
        upstream_calls += 1;
        let result = query.len() as u32 * limit;
        cache.set(key, result);
        result
    };

    assert_eq!(search(&mut cache, "eurlex", "ai", 10), 20);
    assert_eq!(search(&mut cache, "eurlex", "ai", 10), 20);
    assert_eq!(search(&mut cache, "fedregister", "ai", 10), 20);
    assert_eq!(search(&mut cache, "eurlex", "ai", 5), 10);

    assert_eq!(upstream_calls, 3);
}

#[test]
fn test_bad_construction_is_rejected() {
    assert!(matches!(
        CacheStore::<u32>::new(0, None),
        Err(CacheError::InvalidConfig(_))
    ));
    assert!(matches!(
        CacheStore::<u32>::new(1, Some(Duration::ZERO)),
        Err(CacheError::InvalidConfig(_))
    ));
    assert!(CacheStore::<u32>::new(1, Some(Duration::from_millis(1))).is_ok());
}
