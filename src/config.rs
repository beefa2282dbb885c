//! Configuration loading for Remembrall.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`<home>/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The program runs with defaults when no
//! config exists, and an unreadable config file only produces a warning.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FailOpen, RemembrallError, Result};

/// Main configuration struct for Remembrall.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Study session behavior.
    pub study: StudyConfig,
    /// Card layout.
    pub display: DisplayConfig,
    /// Startup banner.
    pub intro: IntroConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Study session behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StudyConfig {
    /// Shuffle a set before each session opened from the menu.
    pub shuffle_on_start: bool,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            shuffle_on_start: true,
        }
    }
}

/// Card layout, resolved against the terminal size at render time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Card box width as a percentage of terminal width.
    pub card_width_percent: u16,
    /// Card box interior height in lines.
    pub card_height: u16,
    /// Characters of term/definition shown in card lists.
    pub preview_chars: usize,
}

/// Bounds for `card_width_percent`.
pub const CARD_WIDTH_PERCENT_RANGE: std::ops::RangeInclusive<u16> = 10..=100;

impl DisplayConfig {
    /// Check if a width percentage is usable.
    pub fn is_valid_width_percent(value: u16) -> bool {
        CARD_WIDTH_PERCENT_RANGE.contains(&value)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            card_width_percent: 60,
            card_height: 7,
            preview_chars: 30,
        }
    }
}

/// Startup banner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntroConfig {
    /// Show the banner when the menu opens.
    pub enabled: bool,
    /// Delay between banner frames.
    pub frame_delay_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frame_delay_ms: 60,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "warn" or "remembrall=debug".
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with the full precedence chain.
    pub fn load() -> Self {
        match remembrall_home() {
            Some(home) => Self::load_from_dir(&home),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration from `config.toml` in the given home directory.
    pub fn load_from_dir(home: &Path) -> Self {
        let path = home.join(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_from_file(&path).fail_open_default("loading config")
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        config
    }

    /// Load config from a specific file path.
    fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| RemembrallError::storage(path, e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| RemembrallError::config(e.to_string()))?;
        Ok(config.validated())
    }

    /// Replace out-of-range values with defaults.
    fn validated(mut self) -> Self {
        let defaults = DisplayConfig::default();
        if !DisplayConfig::is_valid_width_percent(self.display.card_width_percent) {
            tracing::warn!(
                value = self.display.card_width_percent,
                "card_width_percent out of range, using default"
            );
            self.display.card_width_percent = defaults.card_width_percent;
        }
        if self.display.card_height == 0 {
            tracing::warn!("card_height must be positive, using default");
            self.display.card_height = defaults.card_height;
        }
        self
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // REMEMBRALL_SHUFFLE
        if let Ok(val) = env::var("REMEMBRALL_SHUFFLE") {
            match parse_bool(&val) {
                Some(b) => self.study.shuffle_on_start = b,
                None => eprintln!(
                    "Warning: Invalid REMEMBRALL_SHUFFLE value '{}'. \
                    Expected true/false. Using '{}'.",
                    val, self.study.shuffle_on_start
                ),
            }
        }

        // REMEMBRALL_NO_INTRO
        if let Ok(val) = env::var("REMEMBRALL_NO_INTRO") {
            if parse_bool(&val).unwrap_or(true) {
                self.intro.enabled = false;
            }
        }

        // REMEMBRALL_LOG
        if let Ok(val) = env::var("REMEMBRALL_LOG") {
            if !val.trim().is_empty() {
                self.logging.level = val;
            }
        }
    }

    /// Default `config.toml` content written by `init`.
    pub fn default_toml() -> &'static str {
        DEFAULT_CONFIG
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Store file name inside the home directory.
pub const SETS_FILE: &str = "sets.json";

/// Config file name inside the home directory.
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Remembrall Configuration

[study]
# Shuffle a set every time it is opened for study
shuffle_on_start = true

[display]
# Card width as a percentage of the terminal width (10-100)
card_width_percent = 60
card_height = 7
# Characters of each side shown when listing cards
preview_chars = 30

[intro]
enabled = true
frame_delay_ms = 60

[logging]
# tracing filter, e.g. "info" or "remembrall=debug"
level = "warn"
"#;

// =============================================================================
// Paths
// =============================================================================

/// Get the Remembrall home directory.
///
/// Uses `REMEMBRALL_HOME` when set and non-empty, otherwise
/// `<config dir>/remembrall` (`~/.config/remembrall` on Linux).
pub fn remembrall_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("REMEMBRALL_HOME") {
        if home.is_empty() {
            tracing::warn!("REMEMBRALL_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("REMEMBRALL_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Some(config_dir.join("remembrall"));
    }

    let fallback_path = fallback_home();
    tracing::warn!(
        "no config directory, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Fallback home when no config directory is known.
#[cfg(unix)]
fn fallback_home() -> PathBuf {
    use std::os::unix::fs::MetadataExt;
    let uid = std::fs::metadata("/").map(|m| m.uid()).unwrap_or(0);
    PathBuf::from(format!("/tmp/remembrall-{}", uid))
}

/// Fallback home when no config directory is known.
#[cfg(not(unix))]
fn fallback_home() -> PathBuf {
    std::env::temp_dir().join("remembrall")
}

/// Path of the set store.
pub fn sets_path() -> Option<PathBuf> {
    remembrall_home().map(|h| h.join(SETS_FILE))
}

/// Path of the log file.
pub fn log_path() -> Option<PathBuf> {
    remembrall_home().map(|h| h.join("remembrall.log"))
}

/// Path of the crash log.
pub fn crash_log_path() -> Option<PathBuf> {
    remembrall_home().map(|h| h.join("crash.log"))
}
