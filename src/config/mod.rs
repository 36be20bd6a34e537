//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `WIKI_NAVIGATOR_*` environment variables, then command-line flags (applied
//! by the binary).
//!
//! # Configuration File Format
//!
//! ```toml
//! [provider]
//! api_url = "https://{lang}.wikipedia.org/w/api.php"
//! user_agent = "wiki-navigator/0.1 (me@example.com)"
//! timeout_seconds = 30
//!
//! [session]
//! language = "ru"
//! max_results = 10
//!
//! [navigation]
//! menu_policy = "strict"   # or "lenient"
//! ```
//!
//! Environment variables use `__` between section and key, e.g.
//! `WIKI_NAVIGATOR_SESSION__LANGUAGE=en`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::navigator::MenuPolicy;
use crate::sources::DEFAULT_API_URL;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "WIKI_NAVIGATOR";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "wiki-navigator.toml";

/// Largest result count the search API accepts
pub const MAX_RESULTS_LIMIT: usize = 500;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Content provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Defaults for the interactive session
    #[serde(default)]
    pub session: SessionDefaults,

    /// Navigation behaviour
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Content provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API endpoint; `{lang}` is replaced by the session language
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User agent sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Defaults for the interactive session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDefaults {
    /// Language edition to search
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of search results
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            language: default_language(),
            max_results: default_max_results(),
        }
    }
}

fn default_language() -> String {
    "ru".to_string()
}

fn default_max_results() -> usize {
    10
}

/// Navigation behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// What happens on an unrecognised letter answer
    #[serde(default)]
    pub menu_policy: MenuPolicy,
}

impl Config {
    /// Reject settings the navigator cannot work with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !(1..=MAX_RESULTS_LIMIT).contains(&self.session.max_results) {
            return Err(config::ConfigError::Message(format!(
                "session.max_results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT, self.session.max_results
            )));
        }
        if self.session.language.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "session.language must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from an optional file plus environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    load_config_with_env(path, None)
}

/// Load configuration, reading overrides from `vars` instead of the process
/// environment when given
pub fn load_config_with_env(
    path: Option<&Path>,
    vars: Option<config::Map<String, String>>,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Find a configuration file in the default locations
///
/// Checks `./wiki-navigator.toml`, then `<config dir>/wiki-navigator/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("wiki-navigator").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    fn env_vars(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.api_url, DEFAULT_API_URL);
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.session.language, "ru");
        assert_eq!(config.session.max_results, 10);
        assert_eq!(config.navigation.menu_policy, MenuPolicy::Strict);
    }

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[provider]
user_agent = "tester/1.0"
timeout_seconds = 5

[session]
language = "en"
max_results = 3

[navigation]
menu_policy = "lenient"
"#;
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config_with_env(Some(path.as_path()), no_env()).unwrap();
        assert_eq!(config.provider.user_agent.as_deref(), Some("tester/1.0"));
        assert_eq!(config.provider.timeout_seconds, 5);
        assert_eq!(config.provider.api_url, DEFAULT_API_URL);
        assert_eq!(config.session.language, "en");
        assert_eq!(config.session.max_results, 3);
        assert_eq!(config.navigation.menu_policy, MenuPolicy::Lenient);
    }

    #[test]
    fn test_sparse_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nmax_results = 7\n").unwrap();

        let config = load_config_with_env(Some(path.as_path()), no_env()).unwrap();
        assert_eq!(config.session.max_results, 7);
        assert_eq!(config.session.language, "ru");
        assert_eq!(config.navigation.menu_policy, MenuPolicy::Strict);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/wiki-navigator.toml");
        assert!(load_config_with_env(Some(path.as_path()), no_env()).is_err());
    }

    #[test]
    fn test_zero_max_results_in_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nmax_results = 0\n").unwrap();

        let err = load_config_with_env(Some(path.as_path()), no_env()).unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn test_out_of_range_max_results_from_env_is_rejected() {
        let vars = env_vars(&[("WIKI_NAVIGATOR_SESSION__MAX_RESULTS", "501")]);
        assert!(load_config_with_env(None, vars).is_err());

        let vars = env_vars(&[("WIKI_NAVIGATOR_SESSION__MAX_RESULTS", "500")]);
        let config = load_config_with_env(None, vars).unwrap();
        assert_eq!(config.session.max_results, MAX_RESULTS_LIMIT);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\nlanguage = \"de\"\nmax_results = 7\n\n[provider]\ntimeout_seconds = 5\n",
        )
        .unwrap();

        let vars = env_vars(&[
            ("WIKI_NAVIGATOR_SESSION__LANGUAGE", "en"),
            ("WIKI_NAVIGATOR_NAVIGATION__MENU_POLICY", "lenient"),
            ("OTHER_APP_SESSION__LANGUAGE", "fr"),
        ]);
        let config = load_config_with_env(Some(path.as_path()), vars).unwrap();

        assert_eq!(config.session.language, "en");
        assert_eq!(config.session.max_results, 7);
        assert_eq!(config.provider.timeout_seconds, 5);
        assert_eq!(config.navigation.menu_policy, MenuPolicy::Lenient);
    }

    #[test]
    fn test_env_only_config() {
        let vars = env_vars(&[("WIKI_NAVIGATOR_PROVIDER__TIMEOUT_SECONDS", "12")]);
        let config = load_config_with_env(None, vars).unwrap();
        assert_eq!(config.provider.timeout_seconds, 12);
        assert_eq!(config.session, SessionDefaults::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_serializes_to_toml() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(rendered.contains("[session]"));
        assert!(rendered.contains("menu_policy = \"strict\""));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
