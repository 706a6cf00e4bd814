/*!
 * Tests for translation cache functionality
 */

use postmill::translation::cache::TranslationCache;

#[test]
fn test_cache_new_withDisabled_shouldNeverReturnEntries() {
    let cache = TranslationCache::new(false);
    cache.store("你好", Some("zh"), "en", "Hello");

    assert!(cache.get("你好", Some("zh"), "en").is_none());
    assert!(cache.is_empty());
    assert!(!cache.is_enabled());
}

#[test]
fn test_cache_store_withEnabledCache_shouldStoreTranslation() {
    let cache = TranslationCache::new(true);
    cache.store("你好", Some("zh"), "en", "Hello");

    assert_eq!(cache.get("你好", Some("zh"), "en"), Some("Hello".to_string()));
}

#[test]
fn test_cache_get_withSurroundingWhitespace_shouldUseTrimmedKey() {
    let cache = TranslationCache::new(true);
    cache.store("  你好 ", None, "en", "Hello");

    assert_eq!(cache.get("你好", None, "en"), Some("Hello".to_string()));
    assert_eq!(cache.get("你好", Some("auto"), "en"), Some("Hello".to_string()));
}

#[test]
fn test_cache_get_withDifferentLanguages_shouldReturnNone() {
    let cache = TranslationCache::new(true);
    cache.store("你好", Some("zh"), "en", "Hello");

    assert!(cache.get("你好", Some("ja"), "en").is_none());
    assert!(cache.get("你好", Some("zh"), "fr").is_none());
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::new(true);
    cache.store("一", None, "en", "One");

    cache.get("一", None, "en");
    cache.get("一", None, "en");
    cache.get("二", None, "en");

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
    assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_cache_clear_shouldResetEntriesAndCounters() {
    let cache = TranslationCache::new(true);
    cache.store("一", None, "en", "One");
    cache.get("一", None, "en");

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats().hits, 0);
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache = TranslationCache::new(true);
    let cloned = cache.clone();
    cloned.store("一", None, "en", "One");

    assert_eq!(cache.len(), 1);
}
