//! Client configuration
//!
//! [`SyncConfig`] is built explicitly and handed to the client at
//! construction. Values are layered: defaults, then an optional TOML file,
//! then environment variables (a `.env` file is honored), then CLI flags.

pub mod file;

use std::path::Path;
use thiserror::Error;

use crate::api::constants::{DEFAULT_BASE_URL, PLACEHOLDER_TOKEN};
pub use file::ConfigFile;

pub const ENV_ACCESS_TOKEN: &str = "HUBSPOT_ACCESS_TOKEN";
pub const ENV_BASE_URL: &str = "HUBSPOT_BASE_URL";
pub const ENV_VERIFY_TLS: &str = "HUBSPOT_VERIFY_TLS";
pub const ENV_ENFORCE_DEAL_RULES: &str = "LEADSYNC_ENFORCE_DEAL_RULES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No HubSpot access token configured. Set HUBSPOT_ACCESS_TOKEN or access_token in the config file")]
    MissingToken,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid boolean for {key}: '{value}'")]
    InvalidBool { key: String, value: String },
}

/// Settings for one HubSpot client
#[derive(Clone)]
pub struct SyncConfig {
    /// Private app access token sent as a bearer token
    pub access_token: String,
    pub base_url: String,
    /// Verify TLS certificates. Off by default.
    pub verify_tls: bool,
    /// Run deal business rules before creating deals
    pub enforce_deal_rules: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            verify_tls: false,
            enforce_deal_rules: false,
        }
    }
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("access_token", &self.token_preview())
            .field("base_url", &self.base_url)
            .field("verify_tls", &self.verify_tls)
            .field("enforce_deal_rules", &self.enforce_deal_rules)
            .finish()
    }
}

impl SyncConfig {
    /// Create a new builder for SyncConfig
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::new()
    }

    /// Load `.env`, the config file and the process environment
    ///
    /// `path` overrides the default file location
    /// (`<config dir>/leadsync/config.toml`); a missing default file is not
    /// an error, a missing explicit file is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", env_path.display());
        }

        let file = match path {
            Some(path) => ConfigFile::read(path)?,
            None => match file::default_path() {
                Some(path) if path.exists() => ConfigFile::read(&path)?,
                _ => ConfigFile::default(),
            },
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Layer a config file and an environment lookup over the defaults
    pub fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = file.apply(Self::builder());

        if let Some(token) = env(ENV_ACCESS_TOKEN) {
            builder = builder.access_token(token);
        }
        if let Some(base_url) = env(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(value) = env(ENV_VERIFY_TLS) {
            builder = builder.verify_tls(parse_bool(ENV_VERIFY_TLS, &value)?);
        }
        if let Some(value) = env(ENV_ENFORCE_DEAL_RULES) {
            builder = builder.enforce_deal_rules(parse_bool(ENV_ENFORCE_DEAL_RULES, &value)?);
        }

        Ok(builder.build())
    }

    /// Whether a usable token is present (not empty, not the sample placeholder)
    pub fn has_token(&self) -> bool {
        let token = self.access_token.trim();
        !token.is_empty() && token != PLACEHOLDER_TOKEN
    }

    /// Fail before any network call when no token is configured
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.has_token() {
            Ok(())
        } else {
            Err(ConfigError::MissingToken)
        }
    }

    /// First six characters of the token, for display
    pub fn token_preview(&self) -> String {
        if !self.has_token() {
            return "None".to_string();
        }
        let preview: String = self.access_token.chars().take(6).collect();
        format!("{}...", preview)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Builder for SyncConfig
#[derive(Debug)]
pub struct SyncConfigBuilder {
    config: SyncConfig,
}

impl SyncConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SyncConfig::default(),
        }
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = token.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Enable/disable TLS certificate verification
    pub fn verify_tls(mut self, enabled: bool) -> Self {
        self.config.verify_tls = enabled;
        self
    }

    /// Enable/disable deal business rules
    pub fn enforce_deal_rules(mut self, enabled: bool) -> Self {
        self.config.enforce_deal_rules = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SyncConfig {
        self.config
    }
}

impl Default for SyncConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Box<dyn Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Box::new(move |key| map.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();

        assert_eq!(config.base_url, "https://api.hubapi.com");
        assert!(!config.verify_tls);
        assert!(!config.enforce_deal_rules);
        assert!(!config.has_token());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SyncConfig::builder()
            .access_token("pat-na1-abc")
            .base_url("http://localhost:9000")
            .verify_tls(true)
            .enforce_deal_rules(true)
            .build();

        assert_eq!(config.access_token, "pat-na1-abc");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert!(config.verify_tls);
        assert!(config.enforce_deal_rules);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            access_token: Some("from-file".to_string()),
            base_url: Some("http://file".to_string()),
            verify_tls: Some(true),
            enforce_deal_rules: None,
        };
        let env = env_from(&[
            (ENV_ACCESS_TOKEN, "from-env"),
            (ENV_VERIFY_TLS, "no"),
            (ENV_ENFORCE_DEAL_RULES, "1"),
        ]);

        let config = SyncConfig::resolve(file, env).unwrap();

        assert_eq!(config.access_token, "from-env");
        assert_eq!(config.base_url, "http://file");
        assert!(!config.verify_tls);
        assert!(config.enforce_deal_rules);
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        let err = SyncConfig::resolve(ConfigFile::default(), env_from(&[(ENV_VERIFY_TLS, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    }

    #[test]
    fn test_placeholder_token_is_missing() {
        let config = SyncConfig::builder()
            .access_token("YOUR_HUBSPOT_ACCESS_TOKEN")
            .build();
        assert!(matches!(config.validate(), Err(ConfigError::MissingToken)));
        assert_eq!(config.token_preview(), "None");
    }

    #[test]
    fn test_debug_shows_only_token_preview() {
        let config = SyncConfig::builder()
            .access_token("pat-na1-0123456789")
            .build();
        let debug = format!("{:?}", config);

        assert!(debug.contains("pat-na..."));
        assert!(!debug.contains("0123456789"));
    }
}
