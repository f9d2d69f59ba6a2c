//! Configuration management for countdown
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/countdown/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `log_level`
pub const LOG_ENV: &str = "COUNTDOWN_LOG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ring the terminal bell when the countdown finishes
    pub bell: bool,
    /// Default tracing filter
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bell: true,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("countdown");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default path, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Tracing filter to use. A non-empty `COUNTDOWN_LOG` value wins over `log_level`.
    pub fn log_directive(&self, env: Option<String>) -> String {
        match env {
            Some(value) if !value.trim().is_empty() => value,
            _ => self.log_level.clone(),
        }
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    /// Stored representation
    pub fn key(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// Parse the stored representation
    pub fn from_key(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeName::Light),
            "dark" => Some(ThemeName::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.bell);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_file_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countdown").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "bell = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.bell);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_log_directive_prefers_env() {
        let config = Config {
            log_level: "warn".into(),
            ..Config::default()
        };
        assert_eq!(config.log_directive(None), "warn");
        assert_eq!(config.log_directive(Some("  ".into())), "warn");
        assert_eq!(config.log_directive(Some("countdown=debug".into())), "countdown=debug");
    }

    #[test]
    fn test_theme_toggle() {
        let theme = ThemeName::Light;
        assert_eq!(theme.toggle(), ThemeName::Dark);
        assert_eq!(theme.toggle().toggle(), ThemeName::Light);
    }

    #[test]
    fn test_theme_keys() {
        for theme in [ThemeName::Light, ThemeName::Dark] {
            assert_eq!(ThemeName::from_key(theme.key()), Some(theme));
        }
        assert_eq!(ThemeName::from_key("solarized"), None);
    }
}
