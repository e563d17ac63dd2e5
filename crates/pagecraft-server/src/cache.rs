//! Rendered public pages.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live HTML keyed by site and slug.
///
/// Every save or delete starts a new generation. A render that began before
/// the change is stored under the old generation and never served, so it
/// cannot mask the newer page.
#[derive(Debug, Default)]
pub struct LiveCache {
    generation: AtomicU64,
    pages: DashMap<(String, String), Entry>,
}

#[derive(Debug)]
struct Entry {
    generation: u64,
    html: String,
}

fn key(site_id: &str, slug: &str) -> (String, String) {
    (site_id.to_string(), slug.to_string())
}

impl LiveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation to hand back to [`LiveCache::insert`]. Read it before
    /// loading the page.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn get(&self, site_id: &str, slug: &str) -> Option<String> {
        let current = self.generation();
        self.pages
            .get(&key(site_id, slug))
            .filter(|entry| entry.generation == current)
            .map(|entry| entry.html.clone())
    }

    pub fn insert(&self, site_id: &str, slug: &str, generation: u64, html: String) {
        if generation != self.generation() {
            tracing::debug!("not caching {}/{}: pages changed while rendering", site_id, slug);
            return;
        }
        self.pages.insert(key(site_id, slug), Entry { generation, html });
    }

    /// Drop everything. Called after any page is written or deleted, since a
    /// save may move a page to another slug.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.pages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_invalidate() {
        let cache = LiveCache::new();
        let generation = cache.generation();
        cache.insert("s1", "home", generation, "<p>hi</p>".to_string());
        assert_eq!(cache.get("s1", "home").as_deref(), Some("<p>hi</p>"));
        assert_eq!(cache.get("s2", "home"), None);

        cache.invalidate();
        assert_eq!(cache.get("s1", "home"), None);
    }

    #[test]
    fn test_render_from_before_invalidation_is_dropped() {
        let cache = LiveCache::new();
        let started = cache.generation();
        cache.invalidate();
        cache.insert("s1", "home", started, "<p>old</p>".to_string());
        assert_eq!(cache.get("s1", "home"), None);
    }
}
