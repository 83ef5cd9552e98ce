//! User configuration
//!
//! Loaded once at startup from `~/.apitty/config.yaml` and passed down to
//! the app state, the network actor and the draw functions. Every field has
//! a default, so a partial file (or no file at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::models::HttpMethod;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    /// Methods offered by the method selector, in display order
    pub methods: Vec<HttpMethod>,
    pub theme: ThemeConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds. 0 = no timeout.
    pub timeout_secs: u64,
}

/// Colour names as written in the config file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent: String,
    pub focus: String,
    pub border: String,
    pub muted: String,
    pub json_key: String,
    pub json_string: String,
    pub json_number: String,
    pub json_literal: String,
    pub json_bracket: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http: HttpConfig::default(),
            methods: HttpMethod::ALL.to_vec(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig { timeout_secs: 15 }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            accent: String::from("#7D56F4"),
            focus: String::from("#FF00FF"),
            border: String::from("#874BFD"),
            muted: String::from("#626262"),
            json_key: String::from("#7D56F4"),
            json_string: String::from("#04B575"),
            json_number: String::from("#FFA500"),
            json_literal: String::from("#FF6B6B"),
            json_bracket: String::from("#00D9FF"),
        }
    }
}

impl Config {
    /// Directory holding the config file and the log file
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Load from the default location, falling back to defaults on any problem
    pub fn load() -> Config {
        let path = Self::dir().join(CONFIG_FILE_NAME);
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Config::default()
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        if config.methods.is_empty() {
            config.methods = HttpMethod::ALL.to_vec();
        }
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

/// Resolved colours used by the draw functions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub accent: Color,
    pub focus: Color,
    pub border: Color,
    pub muted: Color,
    pub json_key: Color,
    pub json_string: Color,
    pub json_number: Color,
    pub json_literal: Color,
    pub json_bracket: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from(&ThemeConfig::default())
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let color = |value: &str, fallback: &str| {
            Color::from_str(value).unwrap_or_else(|_| {
                tracing::warn!(value, "Unknown colour in theme");
                Color::from_str(fallback).unwrap_or(Color::Reset)
            })
        };

        Theme {
            accent: color(&config.accent, &defaults.accent),
            focus: color(&config.focus, &defaults.focus),
            border: color(&config.border, &defaults.border),
            muted: color(&config.muted, &defaults.muted),
            json_key: color(&config.json_key, &defaults.json_key),
            json_string: color(&config.json_string, &defaults.json_string),
            json_number: color(&config.json_number, &defaults.json_number),
            json_literal: color(&config.json_literal, &defaults.json_literal),
            json_bracket: color(&config.json_bracket, &defaults.json_bracket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.timeout_secs, 15);
        assert_eq!(config.methods.len(), 5);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http:\n  timeout_secs: 3\nmethods: [GET, DELETE]").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.methods, vec![HttpMethod::GET, HttpMethod::DELETE]);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_empty_method_list_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "methods: []").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.methods, HttpMethod::ALL.to_vec());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http: [not, a, map").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_theme_resolves_names_and_falls_back() {
        let theme_config = ThemeConfig {
            accent: String::from("red"),
            focus: String::from("not-a-colour"),
            ..ThemeConfig::default()
        };
        let theme = Theme::from(&theme_config);
        assert_eq!(theme.accent, Color::Red);
        assert_eq!(theme.focus, Color::Rgb(0xFF, 0x00, 0xFF));
        assert_eq!(theme.json_string, Color::Rgb(0x04, 0xB5, 0x75));
    }
}
