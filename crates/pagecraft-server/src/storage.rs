//! File storage for the async server.

use pagecraft_core::{FileStorage, Page, PageSummary, Storage, StorageError, StorageResult};
use pagecraft_core::storage::BoxFuture;
use std::path::Path;

/// [`FileStorage`] whose disk I/O runs on tokio's blocking pool, keeping
/// request workers free.
#[derive(Debug, Clone)]
pub struct PooledFileStorage {
    inner: FileStorage,
}

impl PooledFileStorage {
    pub fn new(inner: FileStorage) -> Self {
        Self { inner }
    }

    pub fn base_path(&self) -> &Path {
        self.inner.base_path()
    }

    async fn offload<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&FileStorage) -> StorageResult<T> + Send + 'static,
    {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || op(&inner))
            .await
            .map_err(|e| StorageError::Other(format!("storage task failed: {e}")))?
    }
}

impl Storage for PooledFileStorage {
    fn save(&self, page: &Page) -> BoxFuture<'_, StorageResult<()>> {
        let page = page.clone();
        Box::pin(self.offload(move |files| files.write_page(&page)))
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Page>> {
        let id = id.to_string();
        Box::pin(self.offload(move |files| files.read_page(&id)))
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(self.offload(move |files| files.remove_page(&id)))
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<PageSummary>>> {
        Box::pin(self.offload(|files| files.summaries()))
    }

    fn find_by_slug(&self, site_id: &str, slug: &str) -> BoxFuture<'_, StorageResult<Page>> {
        let site_id = site_id.to_string();
        let slug = slug.to_string();
        Box::pin(self.offload(move |files| files.find_page(&site_id, &slug)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_round_trip_on_blocking_pool() {
        let dir = tempdir().unwrap();
        let storage = PooledFileStorage::new(FileStorage::new(dir.path()).unwrap());
        let mut page = Page::new("Home", "home");
        page.site_id = "s1".to_string();

        storage.save(&page).await.unwrap();
        assert_eq!(storage.load(&page.id).await.unwrap(), page);
        assert_eq!(storage.find_by_slug("s1", "home").await.unwrap().id, page.id);
        assert_eq!(storage.list().await.unwrap(), vec![PageSummary::from(&page)]);

        storage.delete(&page.id).await.unwrap();
        assert!(matches!(storage.load(&page.id).await, Err(StorageError::NotFound(_))));
    }
}
