use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::types::CefrLevel;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// CEFR level to request words at, or "all" for no filter.
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_difficulty() -> String {
    "all".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: default_theme(),
            difficulty: default_difficulty(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("worddr")
            .join("config.toml")
    }

    /// Clamp out-of-range values from stale or hand-edited config files.
    pub fn validate(&mut self) {
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 120);
        if self.difficulty != "all" && self.difficulty.parse::<CefrLevel>().is_err() {
            self.difficulty = default_difficulty();
        }
        if self.api_url.trim().is_empty() {
            self.api_url = default_api_url();
        }
    }

    /// The word filter to send, `None` when set to "all".
    pub fn difficulty_filter(&self) -> Option<CefrLevel> {
        self.difficulty.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8000");
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.difficulty, "all");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let toml_str = r#"
api_url = "http://vocab.example.net"
difficulty = "B2"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "http://vocab.example.net");
        assert_eq!(config.difficulty, "B2");
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.api_url, deserialized.api_url);
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.difficulty, deserialized.difficulty);
        assert_eq!(
            config.request_timeout_secs,
            deserialized.request_timeout_secs
        );
    }

    #[test]
    fn validate_clamps_values() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        config.difficulty = "Expert".to_string();
        config.api_url = "  ".to_string();

        config.validate();
        assert_eq!(config.request_timeout_secs, 1);
        assert_eq!(config.difficulty, "all");
        assert_eq!(config.api_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn difficulty_filter_parses_levels() {
        let mut config = Config::default();
        assert_eq!(config.difficulty_filter(), None);

        config.difficulty = "b1".to_string();
        assert_eq!(config.difficulty_filter(), Some(CefrLevel::B1));
    }
}
