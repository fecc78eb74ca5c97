use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::random::RandomSourceKind;
use crate::keyboard::layout::{KeyboardLayout, LAYOUT_NAMES};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_keyboard_layout")]
    pub keyboard_layout: String,
    /// Rows used when `keyboard_layout = "custom"`.
    #[serde(default)]
    pub custom_rows: Vec<Vec<String>>,
    #[serde(default = "default_hit_flash_ms")]
    pub hit_flash_ms: u64,
    #[serde(default)]
    pub random_source: RandomSourceKind,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_keyboard_layout() -> String {
    "qwerty".to_string()
}
fn default_hit_flash_ms() -> u64 {
    150
}
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            keyboard_layout: default_keyboard_layout(),
            custom_rows: Vec::new(),
            hit_flash_ms: default_hit_flash_ms(),
            random_source: RandomSourceKind::default(),
            tick_rate_ms: default_tick_rate_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyhunt")
            .join("config.toml")
    }

    /// Reset stale or out-of-range values left by hand edits.
    pub fn normalize(&mut self) {
        let layout = self.keyboard_layout.to_ascii_lowercase();
        if layout != "custom" && !LAYOUT_NAMES.contains(&layout.as_str()) {
            warn!(layout = %self.keyboard_layout, "unknown keyboard layout, using default");
            self.keyboard_layout = default_keyboard_layout();
        } else {
            self.keyboard_layout = layout;
        }
        if self.hit_flash_ms == 0 {
            self.hit_flash_ms = default_hit_flash_ms();
        }
        self.tick_rate_ms = self.tick_rate_ms.clamp(10, 1000);
    }

    /// The layout the keyboard is built from. `custom` with no rows gives an
    /// empty keyboard.
    pub fn layout(&self) -> KeyboardLayout {
        if self.keyboard_layout == "custom" {
            return KeyboardLayout::custom(self.custom_rows.clone());
        }
        KeyboardLayout::from_name(&self.keyboard_layout).unwrap_or_default()
    }

    pub fn hit_flash(&self) -> Duration {
        Duration::from_millis(self.hit_flash_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.keyboard_layout, "qwerty");
        assert_eq!(config.hit_flash_ms, 150);
        assert_eq!(config.random_source, RandomSourceKind::Auto);
        assert!(config.custom_rows.is_empty());
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
keyboard_layout = "dvorak"
random_source = "bytes"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.keyboard_layout, "dvorak");
        assert_eq!(config.random_source, RandomSourceKind::Bytes);
        assert_eq!(config.tick_rate_ms, 50);
    }

    #[test]
    fn test_custom_rows() {
        let toml_str = r#"
keyboard_layout = "custom"
custom_rows = [["q", "w"], ["CAPSLOCK"]]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let layout = config.layout();
        assert_eq!(layout.name, "Custom");
        assert_eq!(layout.key_count(), 3);
    }

    #[test]
    fn test_normalize_unknown_layout_resets() {
        let mut config = Config::default();
        config.keyboard_layout = "workman".to_string();
        config.normalize();
        assert_eq!(config.keyboard_layout, "qwerty");
    }

    #[test]
    fn test_normalize_lowercases_and_clamps() {
        let mut config = Config::default();
        config.keyboard_layout = "Colemak".to_string();
        config.hit_flash_ms = 0;
        config.tick_rate_ms = 5;
        config.normalize();
        assert_eq!(config.keyboard_layout, "colemak");
        assert_eq!(config.hit_flash_ms, 150);
        assert_eq!(config.tick_rate_ms, 10);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.keyboard_layout = "colemak".to_string();
        config.hit_flash_ms = 300;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.keyboard_layout, "colemak");
        assert_eq!(loaded.hit_flash_ms, 300);
        assert_eq!(loaded.hit_flash(), Duration::from_millis(300));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.keyboard_layout, "qwerty");
    }
}
