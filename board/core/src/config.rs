//! TOML Configuration File Support
//!
//! Startup configuration for the board: ingest listen address, the four-player
//! grid toggle, border/background toggles, the custom per-(character, variant)
//! color override tables, and render timing knobs.
//!
//! Configuration is read once at startup and never mutated afterwards.
//!
//! # Example Configuration
//!
//! ```toml
//! [ingest]
//! listen_addr = "127.0.0.1:8081"
//!
//! [display]
//! grid_view_4p = true
//!
//! [colors]
//! borders_active = true
//! borders_rgb = [60, 60, 60]
//! backgrounds_active = true
//! custom_backgrounds_active = true
//! custom_foregrounds_active = false
//!
//! [colors.custom_char_bgs]
//! "fox-red" = [140, 30, 30]
//!
//! [timing]
//! postgame_hold_ms = 10000
//! active_frame_ms = 50
//! waiting_step_ms = 500
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Top-level configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telemetry ingest settings
    pub ingest: IngestConfig,
    /// Display layout settings
    pub display: DisplayConfig,
    /// Border/background toggles and override tables
    pub colors: ColorConfig,
    /// Render loop timing
    pub timing: TimingConfig,
}

/// Ingest section
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Address the line-delimited JSON listener binds to
    pub listen_addr: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Display section
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use the 2x2 grid layout for four-player matches instead of bars
    pub grid_view_4p: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { grid_view_4p: false }
    }
}

/// Colors section
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Draw seat-divider borders on the static background
    pub borders_active: bool,
    /// Border color
    pub borders_rgb: [u8; 3],
    /// Draw per-seat background fills at all
    pub backgrounds_active: bool,
    /// Honor entries in `custom_char_bgs`
    pub custom_backgrounds_active: bool,
    /// Honor entries in `custom_char_fgs`
    pub custom_foregrounds_active: bool,
    /// Per-pair foreground overrides, keyed `<character>-<variant>` lowercased
    pub custom_char_fgs: HashMap<String, [u8; 3]>,
    /// Per-pair background overrides, keyed `<character>-<variant>` lowercased
    pub custom_char_bgs: HashMap<String, [u8; 3]>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            borders_active: true,
            borders_rgb: [60, 60, 60],
            backgrounds_active: true,
            custom_backgrounds_active: true,
            custom_foregrounds_active: true,
            custom_char_fgs: HashMap::new(),
            custom_char_bgs: HashMap::new(),
        }
    }
}

/// Timing section
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long the winner screen holds before returning to waiting
    pub postgame_hold_ms: u64,
    /// Delay between in-game overlay redraws
    pub active_frame_ms: u64,
    /// Delay between waiting-animation ellipsis steps
    pub waiting_step_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            postgame_hold_ms: 10_000,
            active_frame_ms: 50,
            waiting_step_ms: 500,
        }
    }
}

/// Default configuration file path
///
/// `$XDG_CONFIG_HOME/stockboard/stockboard.toml` (typically
/// `~/.config/stockboard/stockboard.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stockboard").join("stockboard.toml"))
}

/// Load configuration
///
/// With an explicit path, the file must exist and parse. Without one, the
/// default path is tried and a missing file silently yields defaults.
///
/// # Errors
///
/// Returns `ConfigError` when an explicitly given file cannot be read, or
/// when any file fails to parse.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config_from_path(path),
        None => match default_config_path() {
            Some(path) if path.exists() => load_config_from_path(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        },
    }
}

/// Load configuration from a specific file
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&contents)?;
    tracing::info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}
