/*!
 * Translation caching functionality.
 *
 * This module provides a session-scoped memoization layer mapping
 * (difficulty, source text) to previously obtained translations, avoiding
 * redundant API calls. The cache is not a correctness boundary: a miss must
 * produce the same result as if caching were absent.
 */

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::session::DifficultyLevel;

/// Cache key combining difficulty level and source text.
///
/// The key is the exact text: case- and whitespace-sensitive, no
/// normalization. Two texts differing only by trailing whitespace are
/// distinct entries, an accepted imprecision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Difficulty the translation was requested at
    difficulty: u8,

    /// Source text to translate
    source_text: String,
}

impl CacheKey {
    fn new(difficulty: DifficultyLevel, source_text: &str) -> Self {
        Self {
            difficulty: difficulty.value(),
            source_text: source_text.to_string(),
        }
    }
}

/// Translation cache for storing and retrieving translations
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, difficulty: DifficultyLevel, source_text: &str) -> Option<String> {
        let key = CacheKey::new(difficulty, source_text);
        let cache = self.cache.read();

        match cache.get(&key) {
            Some(translation) => {
                let mut hits = self.hits.write();
                *hits += 1;

                debug!(
                    "Cache hit for '{}' (difficulty {})",
                    truncate_text(source_text, 30),
                    difficulty.value()
                );

                Some(translation.clone())
            }
            None => {
                let mut misses = self.misses.write();
                *misses += 1;

                debug!(
                    "Cache miss for '{}' (difficulty {})",
                    truncate_text(source_text, 30),
                    difficulty.value()
                );

                None
            }
        }
    }

    /// Store a translation in the cache.
    ///
    /// Only successful translations are ever stored; failure results never
    /// reach this method, so there is no negative caching.
    pub fn store(&self, difficulty: DifficultyLevel, source_text: &str, translation: &str) {
        let key = CacheKey::new(difficulty, source_text);
        let mut cache = self.cache.write();

        cache.insert(key, translation.to_string());

        debug!(
            "Cached translation for '{}' (difficulty {})",
            truncate_text(source_text, 30),
            difficulty.value()
        );
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Translation cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_length).collect::<String>())
    }
}
