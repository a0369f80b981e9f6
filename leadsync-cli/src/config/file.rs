//! TOML config file

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{ConfigError, SyncConfigBuilder};

/// On-disk settings; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub verify_tls: Option<bool>,
    pub enforce_deal_rules: Option<bool>,
}

/// `<config dir>/leadsync/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("leadsync").join("config.toml"))
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Overlay the keys present in the file onto `builder`
    pub fn apply(self, mut builder: SyncConfigBuilder) -> SyncConfigBuilder {
        if let Some(token) = self.access_token {
            builder = builder.access_token(token);
        }
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(verify_tls) = self.verify_tls {
            builder = builder.verify_tls(verify_tls);
        }
        if let Some(enforce) = self.enforce_deal_rules {
            builder = builder.enforce_deal_rules(enforce);
        }
        builder
    }
}
