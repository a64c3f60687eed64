//! Configuration management for vpsview

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::query::DEFAULT_PAGE_SIZE;
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the statistics API (e.g. `https://vps.example.com/api`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default page size for custom queries
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".vpsview").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional custom path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional custom path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Resolve the effective configuration.
    ///
    /// A URL given on the command line (or via `VPSVIEW_API_URL`) wins over the
    /// file. With an override present a missing config file is not an error.
    pub fn resolve(path: Option<&str>, api_url_override: Option<&str>) -> Result<Self> {
        let mut config = match Self::load_at(path) {
            Ok(config) => config,
            Err(crate::error::Error::Config(ConfigError::NotFound))
                if api_url_override.is_some() =>
            {
                Self::default()
            }
            Err(e) => return Err(e),
        };

        if let Some(url) = api_url_override {
            config.api_url = Some(url.to_string());
        }

        Ok(config)
    }

    /// The configured API base URL, if any
    pub fn require_api_url(&self) -> Result<&str> {
        match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ConfigError::MissingApiUrl.into()),
        }
    }
}
