//! Core data models for encyclopedia search and article display.

mod article;
mod search;
mod sections;

pub use article::{ArticleRequest, ViewMode};
pub use search::{SearchQuery, SearchResults};
pub use sections::{SectionMap, HEADER_CLOSE, HEADER_OPEN, LEAD_SECTION_TITLE};
