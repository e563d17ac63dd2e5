//! Pages: a document plus the metadata the builder edits alongside it.

use crate::document::{null_as_default, Document};
use crate::seo::SeoMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
}

/// A page of a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub site_id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(flatten)]
    pub seo: SeoMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Document,
}

impl Page {
    /// Create a new draft page with an empty document.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            site_id: String::new(),
            title: title.into(),
            slug: slug.into(),
            status: PageStatus::Draft,
            seo: SeoMetadata::default(),
            content: Document::new(),
        }
    }

    /// Replace the page's SEO metadata. The element tree is left alone.
    pub fn apply_seo(&mut self, seo: SeoMetadata) {
        self.seo = seo;
    }

    pub fn is_published(&self) -> bool {
        self.status == PageStatus::Published
    }

    /// Serialize the page to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a page from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
