//! Mock provider for testing purposes.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{ArticleRequest, SearchQuery, SearchResults};
use crate::sources::{ContentProvider, ProviderError};

/// A mock provider that returns predefined responses.
///
/// Queued search responses are served in order; once the queue is drained the
/// default titles are returned for every further search.
#[derive(Debug, Default)]
pub struct MockSource {
    search_queue: Mutex<VecDeque<Result<Vec<String>, ProviderError>>>,
    default_titles: Vec<String>,
    summaries: HashMap<String, String>,
    full_texts: HashMap<String, String>,
    languages: Vec<String>,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    last_query: Mutex<Option<SearchQuery>>,
}

impl MockSource {
    /// Create a new mock provider serving English only.
    pub fn new() -> Self {
        Self {
            languages: vec!["en".to_string()],
            ..Default::default()
        }
    }

    /// Titles returned once the search queue is empty.
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Queue a one-off search response.
    pub fn queue_search<I, S>(self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_queue
            .lock()
            .unwrap()
            .push_back(Ok(titles.into_iter().map(Into::into).collect()));
        self
    }

    /// Queue a one-off search failure.
    pub fn queue_search_error(self, error: ProviderError) -> Self {
        self.search_queue.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_summary(mut self, title: impl Into<String>, summary: impl Into<String>) -> Self {
        self.summaries.insert(title.into(), summary.into());
        self
    }

    pub fn with_full_text(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.full_texts.insert(title.into(), text.into());
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Number of searches issued so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of summary and full-text fetches issued so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// The most recent search query.
    pub fn last_query(&self) -> Option<SearchQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentProvider for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        let titles = self
            .search_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_titles.clone()))?;
        let titles = titles.into_iter().take(query.max_results).collect();
        Ok(SearchResults::new(titles, &query.query))
    }

    async fn fetch_summary(&self, article: &ArticleRequest) -> Result<String, ProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.summaries
            .get(&article.title)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(article.title.clone()))
    }

    async fn fetch_full_text(&self, article: &ArticleRequest) -> Result<String, ProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.full_texts
            .get(&article.title)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(article.title.clone()))
    }

    async fn supported_languages(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.languages.clone())
    }
}
