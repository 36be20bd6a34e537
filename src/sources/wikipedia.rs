//! Wikipedia content provider.
//!
//! Talks to the MediaWiki Action API of the requested language edition. Plain
//! text extracts (`explaintext`) render section headers as `== Title ==`, which
//! is what [`crate::models::SectionMap`] splits on.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::models::{ArticleRequest, SearchQuery, SearchResults};
use crate::sources::{ContentProvider, ProviderError};
use crate::utils::{HttpClient, DEFAULT_USER_AGENT};

/// API endpoint template; `{lang}` is replaced with the language code.
pub const DEFAULT_API_URL: &str = "https://{lang}.wikipedia.org/w/api.php";

/// Language edition queried for the list of supported languages.
const LANGUAGE_LIST_EDITION: &str = "en";

/// Wikipedia content provider
#[derive(Debug, Clone)]
pub struct WikipediaSource {
    http: HttpClient,
    api_url: String,
}

impl WikipediaSource {
    /// Create a provider with default settings
    pub fn new() -> Result<Self, ProviderError> {
        Self::from_config(&ProviderConfig::default())
    }

    /// Create a provider from configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let http =
            HttpClient::with_settings(user_agent, Duration::from_secs(config.timeout_seconds))?;
        Ok(Self::with_client(http, config.api_url.clone()))
    }

    /// Create a provider against a specific endpoint (template or fixed URL)
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(Self::with_client(HttpClient::new()?, api_url))
    }

    pub fn with_client(http: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Endpoint for one language edition
    fn endpoint(&self, language: &str) -> String {
        self.api_url.replace("{lang}", language)
    }

    /// Run an `action=query` request and return its `query` object.
    async fn query<Q: DeserializeOwned>(
        &self,
        language: &str,
        params: &[(&str, &str)],
    ) -> Result<Q, ProviderError> {
        let url = self.endpoint(language);
        tracing::debug!(%url, ?params, "MediaWiki query");

        let response = self
            .http
            .client()
            .get(&url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to reach {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Api(format!(
                "Wikipedia API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to read response: {}", e)))?;
        let envelope: Envelope<Q> = serde_json::from_str(&body)?;

        if let Some(error) = envelope.error {
            return Err(ProviderError::Api(format!("{}: {}", error.code, error.info)));
        }

        envelope
            .query
            .ok_or_else(|| ProviderError::Parse("response has no query object".to_string()))
    }

    /// Plain-text extract of an article; `intro_only` limits it to the lead.
    async fn extract(
        &self,
        article: &ArticleRequest,
        intro_only: bool,
    ) -> Result<String, ProviderError> {
        let mut params = vec![
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", article.title.as_str()),
        ];
        if intro_only {
            params.push(("exintro", "1"));
        }

        let data: PagesQuery = self.query(&article.language, &params).await?;

        data.pages
            .into_iter()
            .find(|page| !page.missing && !page.invalid)
            .and_then(|page| page.extract)
            .ok_or_else(|| ProviderError::NotFound(article.title.clone()))
    }
}

#[async_trait]
impl ContentProvider for WikipediaSource {
    fn id(&self) -> &str {
        "wikipedia"
    }

    fn name(&self) -> &str {
        "Wikipedia"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ProviderError> {
        let limit = query.max_results.to_string();
        let data: SearchQueryResult = self
            .query(
                &query.language,
                &[
                    ("list", "search"),
                    ("srsearch", query.query.as_str()),
                    ("srlimit", limit.as_str()),
                    ("srprop", ""),
                ],
            )
            .await?;

        let titles = data.search.into_iter().map(|hit| hit.title).collect();
        Ok(SearchResults::new(titles, &query.query))
    }

    async fn fetch_summary(&self, article: &ArticleRequest) -> Result<String, ProviderError> {
        self.extract(article, true).await
    }

    async fn fetch_full_text(&self, article: &ArticleRequest) -> Result<String, ProviderError> {
        self.extract(article, false).await
    }

    async fn supported_languages(&self) -> Result<Vec<String>, ProviderError> {
        let data: SiteInfoQuery = self
            .query(
                LANGUAGE_LIST_EDITION,
                &[("meta", "siteinfo"), ("siprop", "languages")],
            )
            .await?;

        Ok(data.languages.into_iter().map(|l| l.code).collect())
    }
}

// ===== MediaWiki API Types =====

#[derive(Debug, Deserialize)]
struct Envelope<Q> {
    error: Option<ApiErrorBody>,
    query: Option<Q>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct SearchQueryResult {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SiteInfoQuery {
    #[serde(default)]
    languages: Vec<LanguageInfo>,
}

#[derive(Debug, Deserialize)]
struct LanguageInfo {
    code: String,
}
