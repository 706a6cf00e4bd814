/*!
 * Translation caching functionality.
 *
 * Identical strings show up over and over across posts (headings, list
 * items, repeated titles), so successful translations are kept for the
 * lifetime of one run to avoid redundant provider calls.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Language used in cache keys when the source is not specified
pub const AUTO_LANGUAGE: &str = "auto";

/// Cache key combining the normalized text with the language pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source_language: String,
    target_language: String,
    /// Trimmed source text
    text: String,
}

impl CacheKey {
    fn new(text: &str, source_language: Option<&str>, target_language: &str) -> Self {
        let source_language = match source_language {
            Some(lang) if !lang.trim().is_empty() => lang.trim(),
            _ => AUTO_LANGUAGE,
        };
        Self {
            source_language: source_language.to_string(),
            target_language: target_language.trim().to_string(),
            text: text.trim().to_string(),
        }
    }
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Translation cache for storing and retrieving translations
#[derive(Debug, Clone)]
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, text: &str, source_language: Option<&str>, target_language: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(text, source_language, target_language);
        let found = self.cache.read().get(&key).cloned();

        match found {
            Some(translation) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Cache hit for '{}' ({} -> {})",
                    truncate_text(&key.text, 30),
                    key.source_language,
                    key.target_language
                );
                Some(translation)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, text: &str, source_language: Option<&str>, target_language: &str, translation: &str) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(text, source_language, target_language);
        debug!(
            "Cached translation for '{}' ({} -> {})",
            truncate_text(&key.text, 30),
            key.source_language,
            key.target_language
        );
        self.cache.write().insert(key, translation.to_string());
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.cache.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Translation cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
