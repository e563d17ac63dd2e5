//! In-memory storage, for tests and throwaway sessions.

use super::{slug_owner, sort_summaries, BoxFuture, PageSummary, Storage, StorageError, StorageResult};
use crate::page::Page;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    pages: RwLock<HashMap<String, Page>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-filled with pages, keyed by their ids.
    pub fn with_pages(pages: impl IntoIterator<Item = Page>) -> Self {
        let pages = pages.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            pages: RwLock::new(pages),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StorageError {
    StorageError::Other("page map lock poisoned".to_string())
}

impl Storage for MemoryStorage {
    fn save(&self, page: &Page) -> BoxFuture<'_, StorageResult<()>> {
        let page = page.clone();
        Box::pin(async move {
            let mut pages = self.pages.write().map_err(poisoned)?;
            let summaries: Vec<PageSummary> = pages.values().map(PageSummary::from).collect();
            if let Some(owner) = slug_owner(summaries.iter(), &page) {
                return Err(StorageError::SlugTaken {
                    slug: page.slug,
                    existing: owner.id.clone(),
                });
            }
            pages.insert(page.id.clone(), page);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Page>> {
        let id = id.to_string();
        Box::pin(async move {
            let pages = self.pages.read().map_err(poisoned)?;
            pages.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.pages.write().map_err(poisoned)?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<PageSummary>>> {
        Box::pin(async move {
            let pages = self.pages.read().map_err(poisoned)?;
            let mut summaries: Vec<PageSummary> = pages.values().map(PageSummary::from).collect();
            sort_summaries(&mut summaries);
            Ok(summaries)
        })
    }

    fn find_by_slug(&self, site_id: &str, slug: &str) -> BoxFuture<'_, StorageResult<Page>> {
        let site_id = site_id.to_string();
        let slug = slug.to_string();
        Box::pin(async move {
            let pages = self.pages.read().map_err(poisoned)?;
            pages
                .values()
                .find(|p| p.site_id == site_id && p.slug == slug)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(format!("{site_id}/{slug}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind};
    use pollster::block_on;

    fn page(site: &str, title: &str, slug: &str) -> Page {
        let mut page = Page::new(title, slug);
        page.site_id = site.to_string();
        page
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let mut page = page("s1", "Home", "home");
        page.content.elements.push(Element::new(ElementKind::Section));

        block_on(storage.save(&page)).unwrap();
        assert_eq!(block_on(storage.load(&page.id)).unwrap(), page);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let page = page("s1", "Home", "home");
        let storage = MemoryStorage::with_pages([page.clone()]);

        block_on(storage.delete(&page.id)).unwrap();
        block_on(storage.delete(&page.id)).unwrap();
        assert!(block_on(storage.list()).unwrap().is_empty());
    }

    #[test]
    fn test_list_orders_by_site_and_slug() {
        let storage = MemoryStorage::with_pages([
            page("s2", "Home", "home"),
            page("s1", "Pricing", "pricing"),
            page("s1", "About", "about"),
        ]);
        let listed: Vec<(String, String)> = block_on(storage.list())
            .unwrap()
            .into_iter()
            .map(|p| (p.site_id, p.slug))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("s1".to_string(), "about".to_string()),
                ("s1".to_string(), "pricing".to_string()),
                ("s2".to_string(), "home".to_string()),
            ]
        );
    }

    #[test]
    fn test_find_by_slug_is_scoped_to_site() {
        let ours = page("s1", "Home", "home");
        let theirs = page("s2", "Home", "home");
        let storage = MemoryStorage::with_pages([ours.clone(), theirs.clone()]);

        assert_eq!(block_on(storage.find_by_slug("s1", "home")).unwrap().id, ours.id);
        assert_eq!(block_on(storage.find_by_slug("s2", "home")).unwrap().id, theirs.id);
        assert!(matches!(
            block_on(storage.find_by_slug("s3", "home")),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let home = page("s1", "Home", "home");
        let storage = MemoryStorage::with_pages([home.clone()]);

        let clash = page("s1", "Other Home", "home");
        let err = block_on(storage.save(&clash)).unwrap_err();
        assert!(matches!(err, StorageError::SlugTaken { ref existing, .. } if *existing == home.id));
        assert!(matches!(block_on(storage.load(&clash.id)), Err(StorageError::NotFound(_))));

        // Resaving the owner under its own slug is fine
        block_on(storage.save(&home)).unwrap();
    }
}
