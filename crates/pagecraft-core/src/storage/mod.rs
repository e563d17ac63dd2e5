//! Page persistence.
//!
//! A backend stores whole [`Page`]s keyed by id. Within one site a slug
//! names at most one page, which is what the public routes resolve.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::page::{Page, PageStatus};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Page not found: {0}")]
    NotFound(String),
    #[error("Slug {slug:?} is already used by page {existing} in this site")]
    SlugTaken { slug: String, existing: String },
    #[error("Malformed page data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Storage error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future returned by the async storage and generator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a page listing shows without loading the element tree into the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub id: String,
    pub site_id: String,
    pub title: String,
    pub slug: String,
    pub status: PageStatus,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            site_id: page.site_id.clone(),
            title: page.title.clone(),
            slug: page.slug.clone(),
            status: page.status,
        }
    }
}

impl PageSummary {
    fn sort_key(&self) -> (&str, &str, &str) {
        (&self.site_id, &self.slug, &self.id)
    }
}

/// Order listings by site, then slug.
pub(crate) fn sort_summaries(summaries: &mut [PageSummary]) {
    summaries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// The page other than `page` already holding its site and slug, if any.
pub(crate) fn slug_owner<'a>(
    mut pages: impl Iterator<Item = &'a PageSummary>,
    page: &Page,
) -> Option<&'a PageSummary> {
    pages.find(|p| p.id != page.id && p.site_id == page.site_id && p.slug == page.slug)
}

/// Trait for page storage backends.
pub trait Storage: Send + Sync {
    /// Store a page under its own id, replacing any previous version.
    ///
    /// Fails with [`StorageError::SlugTaken`] when another page of the same
    /// site already uses the slug. A failed save leaves the stored version
    /// untouched.
    fn save(&self, page: &Page) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Page>>;

    /// Delete a page. Deleting a missing page is not an error.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Summaries of all stored pages, ordered by site, then slug.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<PageSummary>>>;

    /// The page of `site_id` whose slug is `slug`.
    fn find_by_slug(&self, site_id: &str, slug: &str) -> BoxFuture<'_, StorageResult<Page>> {
        let site_id = site_id.to_string();
        let slug = slug.to_string();
        Box::pin(async move {
            let summary = self
                .list()
                .await?
                .into_iter()
                .find(|p| p.site_id == site_id && p.slug == slug)
                .ok_or_else(|| StorageError::NotFound(format!("{site_id}/{slug}")))?;
            self.load(&summary.id).await
        })
    }
}
