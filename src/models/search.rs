//! Search request and response models.

use serde::{Deserialize, Serialize};

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Main search query string
    pub query: String,

    /// Maximum number of results to return
    pub max_results: usize,

    /// Language variant of the encyclopedia to search (e.g. "en", "ru")
    pub language: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: 10,
            language: "en".to_string(),
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Set the language variant
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Ranked article titles returned for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Titles in ranking order
    pub titles: Vec<String>,

    /// Query that was executed
    pub query: String,
}

impl SearchResults {
    /// Create a new result list
    pub fn new(titles: Vec<String>, query: impl Into<String>) -> Self {
        Self {
            titles,
            query: query.into(),
        }
    }

    /// Empty result list for a query
    pub fn empty(query: impl Into<String>) -> Self {
        Self::new(Vec::new(), query)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Look up a title by its 1-based position as shown to the user.
    pub fn get(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.titles.get(i))
            .map(String::as_str)
    }

    /// Iterate over `(position, title)` pairs with 1-based positions.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.titles
            .iter()
            .enumerate()
            .map(|(i, t)| (i + 1, t.as_str()))
    }
}
