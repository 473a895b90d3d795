//! Configuration management for Voyage CLI
//!
//! Stores API key, endpoint and default sources in ~/.config/voyage/config.toml.
//! `VOYAGE_API_KEY` and `VOYAGE_BASE_URL` override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "voyage";
const CONFIG_FILE: &str = "config.toml";

pub const ENV_API_KEY: &str = "VOYAGE_API_KEY";
pub const ENV_BASE_URL: &str = "VOYAGE_BASE_URL";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_sources")]
    pub default_sources: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_sources() -> Vec<String> {
    vec![
        "instagram".to_string(),
        "tiktok".to_string(),
        "youtube".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_sources: default_sources(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Apply `VOYAGE_*` environment overrides
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_BASE_URL).ok(),
        )
    }

    pub fn with_overrides(mut self, api_key: Option<String>, base_url: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url.trim_end_matches('/').to_string();
    }

    /// Replace default sources, dropping blanks and duplicates
    pub fn set_default_sources(&mut self, sources: Vec<String>) {
        self.default_sources = clean_sources(sources);
    }

    /// Sources given on the command line, else the configured defaults
    pub fn sources_or_default(&self, sources: Vec<String>) -> Vec<String> {
        let sources = clean_sources(sources);
        if sources.is_empty() {
            self.default_sources.clone()
        } else {
            sources
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Trim and lower-case source names, dropping blanks and duplicates
pub fn clean_sources(sources: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for source in sources {
        let source = source.trim().to_lowercase();
        if !source.is_empty() && !cleaned.contains(&source) {
            cleaned.push(source);
        }
    }
    cleaned
}

/// Show only the first few characters of a secret
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fills_defaults() {
        let config = Config::parse("api_key = \"abc\"\n").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.default_sources, vec!["instagram", "tiktok", "youtube"]);
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = Config::parse("api_key = \"file\"\nbase_url = \"http://file\"\n")
            .unwrap()
            .with_overrides(Some("env".to_string()), Some("http://env".to_string()));

        assert_eq!(config.api_key.as_deref(), Some("env"));
        assert_eq!(config.base_url, "http://env");
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let config = Config::default().with_overrides(Some("  ".to_string()), None);
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_set_default_sources_cleans_input() {
        let mut config = Config::default();
        config.set_default_sources(vec![
            " TikTok".to_string(),
            "".to_string(),
            "tiktok".to_string(),
            "youtube".to_string(),
        ]);
        assert_eq!(config.default_sources, vec!["tiktok", "youtube"]);
    }

    #[test]
    fn test_sources_or_default() {
        let config = Config::default();
        assert_eq!(config.sources_or_default(Vec::new()).len(), 3);
        assert_eq!(
            config.sources_or_default(vec!["youtube".to_string()]),
            vec!["youtube"]
        );
    }

    #[test]
    fn test_flag_sources_are_cleaned() {
        let config = Config::default();
        assert_eq!(
            config.sources_or_default(vec![
                " TikTok".to_string(),
                "tiktok".to_string(),
                "YouTube ".to_string(),
            ]),
            vec!["tiktok", "youtube"]
        );
        assert_eq!(
            config.sources_or_default(vec!["  ".to_string()]),
            config.default_sources
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("voyage-config-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.set_api_key("secret-key".to_string());
        config.set_base_url("http://example.test/".to_string());

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
        assert_eq!(loaded.base_url, "http://example.test");
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("voyage-config-does-not-exist.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-12345678"), "sk-1****");
        assert_eq!(mask_key("abc"), "****");
    }
}
