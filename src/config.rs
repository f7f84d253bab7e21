use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_placeholder() -> String {
    "Ask Harvey anything...".to_string()
}

fn default_chip_label_width() -> usize {
    32
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1100,
            height: 820,
            min_width: 720,
            min_height: 560,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ComposerConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Display columns a chip label may take before it is cut.
    #[serde(default = "default_chip_label_width")]
    pub chip_label_width: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            placeholder: default_placeholder(),
            chip_label_width: default_chip_label_width(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Reads `config.toml` from the config dir. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Error reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Error parsing {}", path.display()))
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_config_dir() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config/lex-bar")
        } else {
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[composer]\nchip_label_width = 20\n").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.composer.chip_label_width, 20);
        assert_eq!(config.composer.placeholder, "Ask Harvey anything...");
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[window]\nwidth = 900\nheight = 700\nmin_width = 600\nmin_height = 400\n\n[logging]\nfilter = \"lex_bar=debug\""
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.window.width, 900);
        assert_eq!(config.window.min_height, 400);
        assert_eq!(config.logging.filter, "lex_bar=debug");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = \"wide\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Error parsing"));
    }

    #[test]
    fn test_partial_window_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 1280").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 820);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let rendered = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
