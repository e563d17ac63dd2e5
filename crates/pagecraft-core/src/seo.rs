//! SEO metadata and the generator interface behind "Generate with AI".

use crate::storage::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// SEO fields of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoMetadata {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keywords: Vec<String>,
    pub ai_seo_score: u8,
}

impl SeoMetadata {
    /// Parse a comma-separated keyword list as typed in the SEO panel.
    pub fn parse_keywords(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Input to a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoRequest {
    pub page_title: String,
    pub site_name: String,
}

#[derive(Debug, Error)]
pub enum SeoError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Generator failed: {0}")]
    Backend(String),
}

/// Produces SEO metadata for a page.
pub trait SeoGenerator: Send + Sync {
    fn generate(&self, request: &SeoRequest) -> BoxFuture<'_, Result<SeoMetadata, SeoError>>;
}

/// Built-in generator filling fixed templates.
///
/// Output depends only on the request, so the same title and site always
/// produce the same metadata and score.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSeoGenerator;

impl TemplateSeoGenerator {
    pub const MIN_SCORE: u8 = 85;
    pub const MAX_SCORE: u8 = 99;

    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`SeoGenerator::generate`].
    pub fn build(&self, request: &SeoRequest) -> Result<SeoMetadata, SeoError> {
        let title = request.page_title.trim();
        let site = request.site_name.trim();
        if title.is_empty() {
            return Err(SeoError::MissingField("pageTitle"));
        }
        if site.is_empty() {
            return Err(SeoError::MissingField("siteName"));
        }

        Ok(SeoMetadata {
            meta_title: Some(format!("{title} | {site} - Premium Solutions")),
            meta_description: Some(format!(
                "Discover high-quality services and solutions on our {title} page. \
                 {site} provides industry-leading expertise tailored for your business \
                 success and digital growth."
            )),
            focus_keywords: vec![
                title.to_lowercase(),
                site.to_lowercase(),
                "premium solutions".to_string(),
                "industry leaders".to_string(),
                "digital growth".to_string(),
            ],
            ai_seo_score: score(title, site),
        })
    }
}

impl SeoGenerator for TemplateSeoGenerator {
    fn generate(&self, request: &SeoRequest) -> BoxFuture<'_, Result<SeoMetadata, SeoError>> {
        let result = self.build(request);
        Box::pin(async move { result })
    }
}

// FNV-1a, stable across runs and platforms.
fn score(title: &str, site: &str) -> u8 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in title.bytes().chain([0]).chain(site.bytes()) {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    let span = u32::from(TemplateSeoGenerator::MAX_SCORE - TemplateSeoGenerator::MIN_SCORE) + 1;
    TemplateSeoGenerator::MIN_SCORE + (hash % span) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, site: &str) -> SeoRequest {
        SeoRequest {
            page_title: title.to_string(),
            site_name: site.to_string(),
        }
    }

    #[test]
    fn test_template_output() {
        let meta = TemplateSeoGenerator::new().build(&request("About Us", "Acme")).unwrap();
        assert_eq!(meta.meta_title.as_deref(), Some("About Us | Acme - Premium Solutions"));
        assert!(meta.meta_description.unwrap().starts_with(
            "Discover high-quality services and solutions on our About Us page. Acme provides"
        ));
        assert_eq!(meta.focus_keywords[0], "about us");
        assert_eq!(meta.focus_keywords[1], "acme");
        assert_eq!(meta.focus_keywords.len(), 5);
    }

    #[test]
    fn test_score_is_deterministic_and_in_range() {
        let generator = TemplateSeoGenerator::new();
        for (title, site) in [("Home", "Acme"), ("Pricing", "Globex"), ("A", "B")] {
            let first = generator.build(&request(title, site)).unwrap().ai_seo_score;
            let second = generator.build(&request(title, site)).unwrap().ai_seo_score;
            assert_eq!(first, second);
            assert!((85..=99).contains(&first));
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        let generator = TemplateSeoGenerator::new();
        assert!(matches!(
            generator.build(&request("  ", "Acme")),
            Err(SeoError::MissingField("pageTitle"))
        ));
        assert!(matches!(
            generator.build(&request("Home", "")),
            Err(SeoError::MissingField("siteName"))
        ));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            SeoMetadata::parse_keywords(" web design, agency ,, seo"),
            vec!["web design", "agency", "seo"]
        );
    }

    #[test]
    fn test_request_wire_names() {
        let parsed: SeoRequest =
            serde_json::from_str(r#"{"pageTitle":"Home","siteName":"Acme"}"#).unwrap();
        assert_eq!(parsed, request("Home", "Acme"));
    }
}
