//! src/config.rs
//! ============================================================================
//! # Config: Console Configuration Loader and Saver
//!
//! User-editable settings for the fleet console, stored as TOML at the
//! platform config path resolved by [`directories`](https://docs.rs/directories).
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Defaults written on first run
//! - Async load/save for the Tokio event loop
//! - Explicit-path variants for `--config` and tests
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save().await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use tracing::{info, warn};

use tokio::fs as TokioFs;

use crate::error::AppError;
use crate::i18n::Language;

/// Color scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,

    Dark,

    Pink,

    Green,
}

impl ThemeName {
    pub const ALL: [Self; 4] = [Self::Light, Self::Dark, Self::Pink, Self::Green];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Pink => "pink",
            Self::Green => "green",
        }
    }

    /// Catalog key of the theme's display name.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Light => "APP.THEMES.LIGHT",
            Self::Dark => "APP.THEMES.DARK",
            Self::Pink => "APP.THEMES.PINK",
            Self::Green => "APP.THEMES.GREEN",
        }
    }

    /// Next theme in cycle order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Pink,
            Self::Pink => Self::Green,
            Self::Green => Self::Light,
        }
    }

    /// Parse a saved value, falling back to the default theme.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!(marker = "CONFIG_FALLBACK", value, "Unknown theme, using light");
            Self::default()
        })
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::invalid_input("theme", format!("unknown theme '{s}'")))
    }
}

// Hand-edited files may carry stale names; those must not stop startup.
impl<'de> Deserialize<'de> for ThemeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeName,

    pub language: Language,

    /// Interval of the tick that expires notifications.
    #[serde(with = "humantime_serde")]
    pub tick_rate: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            language: Language::default(),
            tick_rate: Duration::from_millis(250),
        }
    }
}

/// Search pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet window before a typed term is applied.
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,

    /// Shortest term (in characters) that filters the list.
    pub min_search_length: usize,

    /// Shortest term (in characters) that gets highlighted.
    pub highlight_min_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_search_length: 3,
            highlight_min_length: 3,
        }
    }
}

/// Notification lifetimes. The undo window is the lifetime of the
/// delete notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    #[serde(with = "humantime_serde")]
    pub success: Duration,

    #[serde(with = "humantime_serde")]
    pub info: Duration,

    #[serde(with = "humantime_serde")]
    pub warning: Duration,

    #[serde(with = "humantime_serde")]
    pub undo_window: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(2000),
            info: Duration::from_millis(3000),
            warning: Duration::from_millis(5000),
            undo_window: Duration::from_millis(5000),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,

    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,

    /// Mirror log lines to stderr. Off while the TUI owns the terminal.
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            level: "info".to_string(),
            stderr: false,
        }
    }
}

/// Main configuration struct for the console.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,

    pub search: SearchConfig,

    pub notifications: NotificationConfig,

    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from the platform config dir, creating it with defaults
    /// when missing.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/fleet/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;
        Self::load_from(&path).await
    }

    /// Loads config from an explicit path, creating it with defaults when
    /// missing.
    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        if TokioFs::try_exists(path)
            .await
            .map_err(|e| AppError::config_io(path, e))?
        {
            info!(marker = "CONFIG_LOAD", path = %path.display(), "Loading config");
            let text = TokioFs::read_to_string(path)
                .await
                .map_err(|e| AppError::config_io(path, e))?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                marker = "CONFIG_CREATE",
                path = %path.display(),
                "No config file found, writing defaults"
            );

            let default_config = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    /// Saves config to the platform config dir.
    pub async fn save(&self) -> Result<(), AppError> {
        let path = Self::config_path()?;
        self.save_to(&path).await
    }

    /// Saves config to an explicit path, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!(marker = "CONFIG_SAVE", path = %path.display(), "Saving config");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str)
            .await
            .map_err(|e| AppError::config_io(path, e))?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the config directory (without filename).
    pub fn config_dir() -> Result<PathBuf, AppError> {
        let proj_dirs = ProjectDirs::from("org", "fleet", "fleet").ok_or(AppError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config::load_from(&path).await.expect("load defaults");

        assert!(path.exists());
        assert_eq!(cfg.ui.theme, ThemeName::Light);
        assert_eq!(cfg.search.debounce, Duration::from_millis(300));
        assert_eq!(cfg.search.min_search_length, 3);
    }

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.ui.theme = ThemeName::Pink;
        cfg.ui.language = Language::De;
        cfg.notifications.undo_window = Duration::from_secs(8);
        cfg.save_to(&path).await.expect("save");

        let loaded = Config::load_from(&path).await.expect("load");
        assert_eq!(loaded.ui.theme, ThemeName::Pink);
        assert_eq!(loaded.ui.language, Language::De);
        assert_eq!(loaded.notifications.undo_window, Duration::from_secs(8));
    }

    #[tokio::test]
    async fn test_unknown_preferences_fall_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[ui]\ntheme = \"solarized\"\nlanguage = \"xx\"\n")
            .await
            .expect("write");

        let loaded = Config::load_from(&path).await.expect("load");
        assert_eq!(loaded.ui.theme, ThemeName::Light);
        assert_eq!(loaded.ui.language, Language::En);
        assert_eq!(loaded.search.highlight_min_length, 3);
    }

    #[tokio::test]
    async fn test_malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[ui\n").await.expect("write");

        assert!(matches!(
            Config::load_from(&path).await,
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_theme_cycle_wraps() {
        let mut theme = ThemeName::Light;
        for _ in 0..ThemeName::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, ThemeName::Light);
        assert_eq!(ThemeName::parse_or_default("DARK"), ThemeName::Dark);
    }
}
