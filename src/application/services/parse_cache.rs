use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::application::ports::document_parser::ExtractedPage;
use crate::config::ParseCacheConfig;

struct CacheEntry {
    content_hash: String,
    pages: Arc<Vec<ExtractedPage>>,
    inserted_at: Instant,
}

/// Bounded, content-addressed cache of parsed pages.
///
/// Keyed by document id; an entry only answers lookups for the byte-content
/// hash it was written with, so a document holds at most one entry and a new
/// content hash evicts the prior one. Entries expire after the configured TTL
/// and the cache evicts its oldest entry once full.
pub struct ParseCache {
    config: ParseCacheConfig,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ParseCache {
    pub fn new(config: ParseCacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, document_id: &str, content_hash: &str) -> Option<Arc<Vec<ExtractedPage>>> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(document_id)?;

        if entry.content_hash != content_hash {
            return None;
        }
        if entry.inserted_at.elapsed() > self.config.ttl {
            return None;
        }

        Some(Arc::clone(&entry.pages))
    }

    pub fn insert(&self, document_id: &str, content_hash: &str, pages: Vec<ExtractedPage>) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };

        if !entries.contains_key(document_id) && entries.len() >= self.config.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                entries.remove(&key);
            }
        }

        entries.insert(
            document_id.to_string(),
            CacheEntry {
                content_hash: content_hash.to_string(),
                pages: Arc::new(pages),
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pages(text: &str) -> Vec<ExtractedPage> {
        vec![ExtractedPage {
            page_number: 1,
            text: text.to_string(),
        }]
    }

    fn cache(max_entries: usize) -> ParseCache {
        ParseCache::new(ParseCacheConfig {
            max_entries,
            ttl: Duration::from_secs(3600),
        })
    }

    #[test]
    fn hit_requires_matching_content_hash() {
        let cache = cache(8);
        cache.insert("doc-1", "hash-a", pages("first revision"));

        assert!(cache.get("doc-1", "hash-a").is_some());
        assert!(cache.get("doc-1", "hash-b").is_none());
        assert!(cache.get("doc-2", "hash-a").is_none());
    }

    #[test]
    fn new_content_hash_evicts_prior_entry() {
        let cache = cache(8);
        cache.insert("doc-1", "hash-a", pages("first revision"));
        cache.insert("doc-1", "hash-b", pages("second revision"));

        assert!(cache.get("doc-1", "hash-a").is_none());
        let hit = cache.get("doc-1", "hash-b").unwrap();
        assert_eq!(hit[0].text, "second revision");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_is_bounded() {
        let cache = cache(2);
        cache.insert("doc-1", "h1", pages("one"));
        cache.insert("doc-2", "h2", pages("two"));
        cache.insert("doc-3", "h3", pages("three"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("doc-3", "h3").is_some());
    }

    #[test]
    fn expired_entries_miss() {
        let cache = ParseCache::new(ParseCacheConfig {
            max_entries: 8,
            ttl: Duration::from_millis(0),
        });
        cache.insert("doc-1", "hash-a", pages("stale"));

        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("doc-1", "hash-a").is_none());
    }
}
