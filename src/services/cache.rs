//! Translation cache
//!
//! Process-wide memo of resolved translations keyed by the exact
//! (target language, text) pair. Entries are never evicted automatically;
//! only `clear` empties the cache. The cache is constructed once by the
//! service factory and shared through `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use crate::models::{CacheKey, CachedTranslation, ResolutionSource};

/// Shared translation cache
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: RwLock<HashMap<CacheKey, CachedTranslation>>,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    clears: AtomicU64,
}

impl TranslationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a translation
    pub async fn get(&self, key: &CacheKey) -> Option<CachedTranslation> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a translation unless the key is already present.
    ///
    /// Two requests for the same key may race through the backend; the first
    /// value written wins and is returned to both, so a key never maps to two
    /// different values between clears.
    pub async fn insert(&self, key: CacheKey, text: String, source: ResolutionSource) -> CachedTranslation {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key).or_insert_with(|| {
            self.inserts.fetch_add(1, Ordering::Relaxed);
            CachedTranslation {
                text,
                source,
                cached_at: Utc::now(),
            }
        });
        entry.clone()
    }

    /// Check whether a key is cached, without touching the counters
    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Number of cached translations
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remove every entry
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        self.clears.fetch_add(1, Ordering::Relaxed);
        info!(removed_entries = removed, "Cleared translation cache");
        removed
    }

    /// Get cache statistics
    pub async fn get_stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let mut by_source: HashMap<ResolutionSource, u64> = HashMap::new();
        for entry in entries.values() {
            *by_source.entry(entry.source).or_default() += 1;
        }

        CacheStats {
            total_entries: entries.len() as u64,
            backend_entries: by_source.get(&ResolutionSource::Backend).copied().unwrap_or(0),
            fallback_entries: entries.len() as u64
                - by_source.get(&ResolutionSource::Backend).copied().unwrap_or(0),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: u64,
    pub backend_entries: u64,
    pub fallback_entries: u64,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub clears: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_after_insert() {
        let cache = TranslationCache::new();
        let key = CacheKey::new("About", "hi");

        assert!(cache.get(&key).await.is_none());
        cache.insert(key.clone(), "परिचय".to_string(), ResolutionSource::Backend).await;

        let entry = cache.get(&key).await.unwrap();
        assert_eq!(entry.text, "परिचय");
        assert_eq!(entry.source, ResolutionSource::Backend);
    }

    #[tokio::test]
    async fn test_first_write_wins() {
        let cache = TranslationCache::new();
        let key = CacheKey::new("About", "hi");

        cache.insert(key.clone(), "first".to_string(), ResolutionSource::Backend).await;
        let stored = cache.insert(key.clone(), "second".to_string(), ResolutionSource::Annotated).await;

        assert_eq!(stored.text, "first");
        assert_eq!(cache.get(&key).await.unwrap().text, "first");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_keys_distinguish_language_and_text() {
        let cache = TranslationCache::new();
        cache.insert(CacheKey::new("About", "hi"), "a".to_string(), ResolutionSource::Backend).await;

        assert!(!cache.contains(&CacheKey::new("About", "kn")).await);
        assert!(!cache.contains(&CacheKey::new("About ", "hi")).await);
        assert!(cache.contains(&CacheKey::new("About", "hi")).await);
    }

    #[tokio::test]
    async fn test_clear_and_stats() {
        let cache = TranslationCache::new();
        let key = CacheKey::new("Soil", "ta");
        cache.insert(key.clone(), "மண்".to_string(), ResolutionSource::DictionaryExact).await;
        cache.insert(CacheKey::new("Soil", "hi"), "मिट्टी".to_string(), ResolutionSource::Backend).await;
        cache.get(&key).await;
        cache.get(&CacheKey::new("missing", "ta")).await;

        let stats = cache.get_stats().await;
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.backend_entries, 1);
        assert_eq!(stats.fallback_entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);

        assert_eq!(cache.clear().await, 2);
        assert!(cache.is_empty().await);
        assert_eq!(cache.get_stats().await.clears, 1);
    }
}
