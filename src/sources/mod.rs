//! Content providers the navigator reads articles from.
//!
//! This module defines the [`ContentProvider`] trait: ranked title search plus
//! summary and full-text fetches for a single article. The language variant is
//! part of every request, so a provider carries no per-session state.
//!
//! - [`WikipediaSource`]: the MediaWiki Action API (`{lang}.wikipedia.org`)
//! - [`MockSource`]: scripted in-memory provider for tests
//!
//! # Implementing a New Provider
//!
//! 1. Create a struct that implements `ContentProvider`
//! 2. Implement `id`, `name`, the three fetch operations and `supported_languages`
//! 3. Map "no such article" to [`ProviderError::NotFound`]; the navigator
//!    reports it to the user and carries on

mod wikipedia;

pub mod mock;

pub use mock::MockSource;
pub use wikipedia::{WikipediaSource, DEFAULT_API_URL};

use crate::models::{ArticleRequest, SearchQuery, SearchResults};
use async_trait::async_trait;

/// The interface the navigator consumes to search and read articles.
#[async_trait]
pub trait ContentProvider: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this provider (e.g. "wikipedia")
    fn id(&self) -> &str;

    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Ranked article titles for a query, possibly empty
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ProviderError>;

    /// Short lead summary of an article
    async fn fetch_summary(&self, article: &ArticleRequest) -> Result<String, ProviderError>;

    /// Full plain text of an article, headers marked as `== Title ==`
    async fn fetch_full_text(&self, article: &ArticleRequest) -> Result<String, ProviderError>;

    /// Language codes this provider can serve
    async fn supported_languages(&self) -> Result<Vec<String>, ProviderError>;

    /// Whether a language code is served by this provider
    async fn is_supported_language(&self, code: &str) -> Result<bool, ProviderError> {
        Ok(self
            .supported_languages()
            .await?
            .iter()
            .any(|supported| supported == code))
    }
}

/// Errors that can occur when talking to a content provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Article or query yielded nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// API error reported by the provider
    #[error("API error: {0}")]
    Api(String),

    /// Response could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(format!("JSON: {}", err))
    }
}
