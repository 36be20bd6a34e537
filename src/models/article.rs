//! Article requests and view modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one article in one language variant of the encyclopedia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRequest {
    /// Article title as returned by search
    pub title: String,

    /// Language variant (e.g. "en")
    pub language: String,
}

impl ArticleRequest {
    /// Create a new article request
    pub fn new(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
        }
    }
}

/// How a chosen article is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Short lead summary
    Summary,
    /// Table of contents with per-section browsing
    Content,
    /// Full article text
    Full,
}

impl ViewMode {
    /// Parse the single-letter menu answer (`S`, `C` or `F`, any case).
    pub fn from_letter(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "s" => Some(ViewMode::Summary),
            "c" => Some(ViewMode::Content),
            "f" => Some(ViewMode::Full),
            _ => None,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Summary => write!(f, "summary"),
            ViewMode::Content => write!(f, "content"),
            ViewMode::Full => write!(f, "full"),
        }
    }
}
