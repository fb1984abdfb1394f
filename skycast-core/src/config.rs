use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Backend base URL used when no config file overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1/";
/// IP geolocation endpoint queried at startup.
pub const DEFAULT_GEO_LOOKUP_URL: &str = "https://ipapi.co/json/";
/// City used when geolocation cannot produce one.
pub const DEFAULT_FALLBACK_CITY: &str = "chennai";

/// Top-level configuration stored on disk.
///
/// Every field has a default, so a partial (or absent) config file is
/// fine on first run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the weather backend; `weather` and `forecast` are
    /// joined onto it.
    pub api_base_url: String,

    /// Fully-qualified URL of the IP geolocation lookup.
    pub geo_lookup_url: String,

    /// City used when geolocation fails at startup.
    pub fallback_city: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            geo_lookup_url: DEFAULT_GEO_LOOKUP_URL.to_string(),
            fallback_city: DEFAULT_FALLBACK_CITY.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if the file doesn't
    /// exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file yet.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
