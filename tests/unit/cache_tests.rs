/*!
 * Unit tests for the translation cache
 */

use simplyread::session::DifficultyLevel;
use simplyread::translation::TranslationCache;

#[test]
fn test_get_withEmptyCache_shouldMiss() {
    let cache = TranslationCache::new();
    assert_eq!(cache.get(DifficultyLevel::new(5), "Hello"), None);

    let (hits, misses, _) = cache.stats();
    assert_eq!((hits, misses), (0, 1));
}

#[test]
fn test_get_afterStore_shouldHit() {
    let cache = TranslationCache::new();
    cache.store(DifficultyLevel::new(5), "Hello", "Hola");

    assert_eq!(
        cache.get(DifficultyLevel::new(5), "Hello"),
        Some("Hola".to_string())
    );
    let (hits, _, rate) = cache.stats();
    assert_eq!(hits, 1);
    assert!(rate > 0.0);
}

#[test]
fn test_get_withDifferentDifficulty_shouldMiss() {
    let cache = TranslationCache::new();
    cache.store(DifficultyLevel::new(3), "Hello", "Hola simple");

    assert_eq!(cache.get(DifficultyLevel::new(7), "Hello"), None);
    assert_eq!(
        cache.get(DifficultyLevel::new(3), "Hello"),
        Some("Hola simple".to_string())
    );
}

#[test]
fn test_get_shouldKeyOnExactText() {
    let cache = TranslationCache::new();
    cache.store(DifficultyLevel::new(5), "Hello", "Hola");

    // No normalization: whitespace and case variants are distinct entries
    assert_eq!(cache.get(DifficultyLevel::new(5), "Hello "), None);
    assert_eq!(cache.get(DifficultyLevel::new(5), "hello"), None);
}

#[test]
fn test_store_withSameKey_shouldOverwrite() {
    let cache = TranslationCache::new();
    cache.store(DifficultyLevel::new(5), "Hello", "Hola");
    cache.store(DifficultyLevel::new(5), "Hello", "Buenas");

    assert_eq!(cache.len(), 1);
    assert_eq!(
        cache.get(DifficultyLevel::new(5), "Hello"),
        Some("Buenas".to_string())
    );
}

#[test]
fn test_clear_shouldDropAllEntries() {
    let cache = TranslationCache::new();
    cache.store(DifficultyLevel::new(5), "Hello", "Hola");
    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.get(DifficultyLevel::new(5), "Hello"), None);
}

#[test]
fn test_clone_shouldShareUnderlyingStore() {
    let cache = TranslationCache::new();
    let handle = cache.clone();
    handle.store(DifficultyLevel::new(5), "Hello", "Hola");

    assert_eq!(
        cache.get(DifficultyLevel::new(5), "Hello"),
        Some("Hola".to_string())
    );
}
