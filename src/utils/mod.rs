//! Utility modules supporting content providers.
//!
//! - [`HttpClient`]: shared `reqwest` client with user agent and timeouts
//!
//! ```rust,no_run
//! use wiki_navigator::utils::HttpClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let http = HttpClient::new()?;
//! let _request = http.client().get("https://en.wikipedia.org/w/api.php");
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
