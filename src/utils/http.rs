//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_settings(DEFAULT_USER_AGENT, Duration::from_secs(30))
    }

    /// Create a new HTTP client with a custom user agent and request timeout
    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_names_the_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("wiki-navigator/"));
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpClient::new().is_ok());
        assert!(HttpClient::with_settings("custom-agent/1.0", Duration::from_secs(5)).is_ok());
    }
}
