use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::UnitSystem;

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "imperial"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Unit system used when a command does not specify one.
    pub units: UnitSystem,

    pub base_url: String,

    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: UnitSystem::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
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
        let dirs = ProjectDirs::from("dev", "weather-alerts", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// API key from the environment if set, otherwise from the file.
    pub fn effective_api_key(&self) -> Option<String> {
        Self::resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    fn resolve_api_key(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| from_file.filter(|key| !key.trim().is_empty()).map(str::to_owned))
    }

    pub fn is_configured(&self) -> bool {
        self.effective_api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openweather() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.units, UnitSystem::Metric);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml("api_key = \"KEY\"\nunits = \"imperial\"\n")
            .expect("config must parse");

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.units, UnitSystem::Imperial);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn invalid_units_fail_to_parse() {
        assert!(Config::from_toml("units = \"kelvin\"").is_err());
    }

    #[test]
    fn toml_roundtrip_preserves_settings() {
        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.units = UnitSystem::Imperial;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml(&text).unwrap();

        assert_eq!(parsed.api_key.as_deref(), Some("OPEN_KEY"));
        assert_eq!(parsed.units, UnitSystem::Imperial);
    }

    #[test]
    fn env_key_overrides_file_key() {
        assert_eq!(
            Config::resolve_api_key(Some("ENV".into()), Some("FILE")).as_deref(),
            Some("ENV")
        );
        assert_eq!(Config::resolve_api_key(None, Some("FILE")).as_deref(), Some("FILE"));
        assert_eq!(Config::resolve_api_key(Some("  ".into()), Some("FILE")).as_deref(), Some("FILE"));
        assert_eq!(Config::resolve_api_key(None, Some("")), None);
    }
}
