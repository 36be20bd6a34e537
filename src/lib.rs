//! # Wiki Navigator
//!
//! An interactive command-line navigator that searches Wikipedia, lets the user
//! pick a result, and shows its summary, a sectioned table of contents, or the
//! full article text.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (SearchQuery, SectionMap, ViewMode, etc.)
//! - [`sources`]: Content provider trait and the Wikipedia implementation
//! - [`navigator`]: The interactive search → select → view state machine
//! - [`ui`]: Console abstraction used for prompts and output
//! - [`utils`]: HTTP client utilities
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod navigator;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{SectionMap, ViewMode};
pub use navigator::{MenuPolicy, Navigator, NavigatorError, Session};
pub use sources::{ContentProvider, ProviderError, WikipediaSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
