use super::*;

#[test]
fn test_buffer_is_trimmed_and_shared() {
    let cache = ExpressionCache::new(4);
    let first = cache.buffer("a + 1   \n");
    assert_eq!(&*first, "a + 1");

    let second = cache.buffer("a + 1   \n");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            len: 1,
        }
    );
}

#[test]
fn test_keys_are_untrimmed_text() {
    let cache = ExpressionCache::new(4);
    let a = cache.buffer("x");
    let b = cache.buffer("x ");
    assert_eq!(a, b);
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(cache.stats().len, 2);
}

#[test]
fn test_least_recently_used_is_evicted() {
    let cache = ExpressionCache::new(2);
    let one = cache.buffer("1");
    cache.buffer("2");
    cache.buffer("1");
    cache.buffer("3");
    assert_eq!(cache.stats().len, 2);

    // "1" was used after "2", so "2" went first.
    assert!(Arc::ptr_eq(&one, &cache.buffer("1")));
    let misses = cache.stats().misses;
    cache.buffer("2");
    assert_eq!(cache.stats().misses, misses + 1);
}

#[test]
fn test_zero_capacity_holds_one_entry() {
    let cache = ExpressionCache::new(0);
    cache.buffer("a");
    cache.buffer("b");
    assert_eq!(cache.stats().len, 1);
}

#[test]
fn test_clear_keeps_counters() {
    let cache = ExpressionCache::new(8);
    cache.buffer("a");
    cache.buffer("a");
    cache.clear();
    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.len), (1, 1, 0));
}

#[test]
fn test_shared_cache_is_one_instance() {
    assert!(std::ptr::eq(shared(), shared()));
}
