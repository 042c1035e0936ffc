//! Configuration file support for paintfield.
//!
//! The file lives at `<config dir>/paintfield/config.toml`. Every field is
//! optional; a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use paintfield_core::{FieldTuning, PaletteName};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Palette active at startup.
    pub palette: PaletteName,
    /// Time between animation frames.
    pub frame_interval_ms: u64,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Write logs to this file. Logging is off without one.
    pub log_file: Option<PathBuf>,
    /// Renderer tuning.
    pub field: FieldTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: PaletteName::default(),
            frame_interval_ms: 33,
            seed: None,
            log_file: None,
            field: FieldTuning::default(),
        }
    }
}

impl Config {
    /// Load from the platform config directory, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Parse a TOML document.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(raw)?;
        config.field = config.field.sanitized();
        config.frame_interval_ms = config.frame_interval_ms.clamp(1, 1000);
        Ok(config)
    }
}

/// Location of the configuration file, if a home directory is known.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "paintfield").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintfield_core::{DEFAULT_FADE_PER_FRAME, Rgb};

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_toml(
            r##"
palette = "Pastel"
frame_interval_ms = 16
seed = 7
log_file = "/tmp/paintfield.log"

[field]
background_fill = "#FFF8F1"
fade_per_frame = 0.001
shrink_on_fade = false
"##,
        )
        .unwrap();

        assert_eq!(config.palette, PaletteName::Pastel);
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/paintfield.log")));
        assert_eq!(config.field.background_fill, Some(Rgb::new(0xFF, 0xF8, 0xF1)));
        assert_eq!(config.field.fade_per_frame, 0.001);
        assert!(!config.field.shrink_on_fade);
    }

    #[test]
    fn test_partial_field_table_keeps_defaults() {
        let config = Config::from_toml("[field]\nshrink_on_fade = false\n").unwrap();
        assert_eq!(config.field.fade_per_frame, DEFAULT_FADE_PER_FRAME);
        assert_eq!(config.field.background_fill, None);
    }

    #[test]
    fn test_bad_color_is_parse_error() {
        let err = Config::from_toml("[field]\nbackground_fill = \"#nope\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_palette_is_parse_error() {
        assert!(Config::from_toml("palette = \"Neon\"\n").is_err());
    }

    #[test]
    fn test_frame_interval_is_clamped() {
        let config = Config::from_toml("frame_interval_ms = 0\n").unwrap();
        assert_eq!(config.frame_interval_ms, 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
