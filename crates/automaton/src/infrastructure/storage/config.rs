//! TOML-based configuration persistence.
//!
//! Reads and writes [`AutomatonConfig`] to the platform-appropriate file:
//! - Windows:  `%APPDATA%\Automaton\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/automaton/config.toml` or `~/.config/automaton/config.toml`
//! - macOS:    `~/Library/Application Support/Automaton/config.toml`
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [motion]
//! default_speed = 0.3
//! tick_interval_ms = 1
//! min_animated_duration_ms = 2.0
//!
//! [screen]
//! fallback_width = 1920
//! fallback_height = 1080
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section or a
//! missing key all fall back to the values above.

use std::path::{Path, PathBuf};
use std::time::Duration;

use automaton_core::{MotionSettings, ScreenMetrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AutomatonConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Pointer animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotionConfig {
    /// Speed used when a caller does not give one, in screen diagonals per second.
    #[serde(default = "default_speed")]
    pub default_speed: f64,
    /// Sleep between interpolated moves.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Moves shorter than this are a single jump.
    #[serde(default = "default_min_animated_duration_ms")]
    pub min_animated_duration_ms: f64,
}

/// Screen size used when no monitor can be enumerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenConfig {
    #[serde(default = "default_screen_width")]
    pub fallback_width: u32,
    #[serde(default = "default_screen_height")]
    pub fallback_height: u32,
}

impl MotionConfig {
    pub fn to_settings(&self) -> MotionSettings {
        MotionSettings {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            min_animated_duration_ms: self.min_animated_duration_ms,
        }
    }
}

impl ScreenConfig {
    pub fn fallback_metrics(&self) -> ScreenMetrics {
        ScreenMetrics::new(self.fallback_width, self.fallback_height)
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_speed() -> f64 {
    0.3
}
fn default_tick_interval_ms() -> u64 {
    1
}
fn default_min_animated_duration_ms() -> f64 {
    2.0
}
fn default_screen_width() -> u32 {
    1920
}
fn default_screen_height() -> u32 {
    1080
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_speed: default_speed(),
            tick_interval_ms: default_tick_interval_ms(),
            min_animated_duration_ms: default_min_animated_duration_ms(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            fallback_width: default_screen_width(),
            fallback_height: default_screen_height(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the base directory cannot
/// be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the platform path, or defaults if the file does not
/// exist yet.
pub fn load_config() -> Result<AutomatonConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config from `path`, or defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AutomatonConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AutomatonConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to the platform path.
pub fn save_config(config: &AutomatonConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AutomatonConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Automaton"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("automaton"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Automaton")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("automaton_test_{}", Uuid::new_v4()))
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_config_values() {
        // Arrange / Act
        let cfg = AutomatonConfig::default();

        // Assert
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.motion.default_speed, 0.3);
        assert_eq!(cfg.motion.tick_interval_ms, 1);
        assert_eq!(cfg.screen.fallback_width, 1920);
        assert_eq!(cfg.screen.fallback_height, 1080);
    }

    #[test]
    fn test_motion_config_converts_to_settings() {
        let settings = MotionConfig::default().to_settings();
        assert_eq!(settings, MotionSettings::default());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: AutomatonConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AutomatonConfig::default());
    }

    #[test]
    fn test_partial_section_overrides_only_given_keys() {
        // Arrange
        let toml_str = r#"
[motion]
tick_interval_ms = 5
"#;

        // Act
        let cfg: AutomatonConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.motion.tick_interval_ms, 5);
        assert_eq!(cfg.motion.default_speed, 0.3);
        assert_eq!(cfg.screen, ScreenConfig::default());
    }

    // ── Files ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        let path = temp_dir().join("config.toml");
        let cfg = load_config_from(&path).expect("missing file is not an error");
        assert_eq!(cfg, AutomatonConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trip_via_temp_dir() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("config.toml");
        let mut cfg = AutomatonConfig::default();
        cfg.general.log_level = "debug".to_string();
        cfg.screen.fallback_width = 2560;

        // Act
        save_config_to(&cfg, &path).expect("save");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_returns_parse_error() {
        // Arrange
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_config_from(&path);

        // Assert
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"), "got {path:?}");
        }
    }
}
