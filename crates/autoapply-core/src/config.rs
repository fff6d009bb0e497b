//! Configuration management for AutoApply.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// Loaded from `~/.config/autoapply/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Scraper behavior settings
    pub scraper: ScraperConfig,
    /// LLM integration settings
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined, or the
    /// file exists but cannot be read or is not valid TOML.
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `AUTOAPPLY_IDENTITY` / `AUTOAPPLY_SECRET`: login credentials for the
    ///   scraped site; authentication is attempted only when both are set
    /// - `AUTOAPPLY_HEADLESS`: override browser headless mode (true/false)
    /// - `AUTOAPPLY_OPENAI_API_KEY`: API key for the resume optimizer
    /// - `AUTOAPPLY_PORT`: override the HTTP listen port
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("AUTOAPPLY_IDENTITY") {
            config.scraper.credentials.identity = Some(val);
        }
        if let Ok(val) = std::env::var("AUTOAPPLY_SECRET") {
            config.scraper.credentials.secret = Some(val);
        }

        if let Ok(val) = std::env::var("AUTOAPPLY_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.scraper.headless = headless;
                tracing::debug!("Override scraper.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("AUTOAPPLY_OPENAI_API_KEY") {
            config.llm.api_key = Some(val);
        }

        if let Ok(val) = std::env::var("AUTOAPPLY_PORT") {
            if let Ok(port) = val.parse() {
                config.server.port = port;
                tracing::debug!("Override server.port from env: {}", port);
            }
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("ai", "autoapply", "autoapply").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path (diagnostic screenshots land here).
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("ai", "autoapply", "autoapply").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1"
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Login credentials for the scraped site.
///
/// Replaces ambient environment reads: the authenticator receives this value
/// explicitly, and authentication is attempted only when both fields are
/// present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Account identity (email address)
    pub identity: Option<String>,
    /// Account secret (password)
    pub secret: Option<String>,
}

impl Credentials {
    /// Whether authentication should be attempted at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.identity.is_some() && self.secret.is_some()
    }
}

/// Scraper behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Base URL of the job search results page
    pub search_url: String,
    /// URL of the login form
    pub login_url: String,
    /// URL fragment that signals arrival at the authenticated landing area
    pub logged_in_url_fragment: String,
    /// Whether to run the browser headless
    pub headless: bool,
    /// Default number of listings to collect when the caller gives no limit
    pub default_limit: usize,
    /// Timeout in milliseconds for the initial results render
    pub results_timeout_ms: u64,
    /// Timeout in milliseconds for the post-login navigation signal
    pub login_timeout_ms: u64,
    /// Timeout in milliseconds for individual field lookups
    pub field_timeout_ms: u64,
    /// Login credentials; absence of either field disables authentication
    pub credentials: Credentials,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.linkedin.com/jobs/search/".to_string(),
            login_url: "https://www.linkedin.com/login".to_string(),
            logged_in_url_fragment: "/feed".to_string(),
            headless: true,
            default_limit: 10,
            // Listings are lazily rendered and the provider is slow
            results_timeout_ms: 20_000,
            login_timeout_ms: 15_000,
            field_timeout_ms: 2_000,
            credentials: Credentials::default(),
        }
    }
}

/// LLM integration settings for the resume optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key for the completion provider
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert!(config.scraper.headless);
        assert_eq!(config.scraper.default_limit, 10);
        assert!(!config.scraper.credentials.is_configured());
    }

    #[test]
    fn test_credentials_configured_requires_both() {
        let mut creds = Credentials::default();
        assert!(!creds.is_configured());

        creds.identity = Some("user@example.com".to_string());
        assert!(!creds.is_configured());

        creds.secret = Some("hunter2".to_string());
        assert!(creds.is_configured());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = AppConfig::default();
        config.scraper.credentials.identity = Some("user@example.com".to_string());
        config.llm.model = "gpt-4o".to_string();

        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let back: AppConfig = toml::from_str(&toml_str).expect("deserialize");

        assert_eq!(
            back.scraper.credentials.identity.as_deref(),
            Some("user@example.com")
        );
        assert_eq!(back.llm.model, "gpt-4o");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
            [server]
            port = 9999
        "#;
        let config: AppConfig = toml::from_str(toml_str).expect("deserialize");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.scraper.default_limit, 10);
    }
}
