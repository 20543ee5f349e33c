//! Configuration file support for the gallery.
//!
//! Every section and field has a default, so a partial JSON document only needs
//! to name what it changes.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLUMN_GAP, DEFAULT_FIX_THRESHOLD_PERCENT, DEFAULT_OPTIMAL_THRESHOLD_PERCENT,
    DEFAULT_SWIPE_THRESHOLD, DEFAULT_THUMBNAIL_COLUMN_WIDTH,
};
use crate::keybindings::NavKeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Which way a horizontal swipe moves through the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SwipeConvention {
    /// Dragging the image leftward reveals the next one
    #[default]
    Natural,
    /// Leftward swipes go back
    Inverted,
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Gallery configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Input adapter settings
    #[serde(default)]
    pub input: InputConfig,

    /// Whitespace inspector settings
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Input section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Minimum horizontal displacement for a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,

    #[serde(default)]
    pub swipe_convention: SwipeConvention,

    #[serde(default)]
    pub keybindings: NavKeyBindings,
}

fn default_swipe_threshold() -> f32 {
    DEFAULT_SWIPE_THRESHOLD
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            swipe_convention: SwipeConvention::default(),
            keybindings: NavKeyBindings::default(),
        }
    }
}

/// Layout section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Thumbnail column width used when it cannot be measured
    #[serde(default = "default_thumbnail_column_width")]
    pub thumbnail_column_width: f32,

    /// Gap between thumbnail column and main image
    #[serde(default = "default_column_gap")]
    pub column_gap: f32,

    /// Utilization (percent) below which the fix is applied
    #[serde(default = "default_fix_threshold")]
    pub fix_threshold_percent: u32,

    /// Utilization (percent) at or above which the layout is optimal
    #[serde(default = "default_optimal_threshold")]
    pub optimal_threshold_percent: u32,
}

fn default_thumbnail_column_width() -> f32 {
    DEFAULT_THUMBNAIL_COLUMN_WIDTH
}

fn default_column_gap() -> f32 {
    DEFAULT_COLUMN_GAP
}

fn default_fix_threshold() -> u32 {
    DEFAULT_FIX_THRESHOLD_PERCENT
}

fn default_optimal_threshold() -> u32 {
    DEFAULT_OPTIMAL_THRESHOLD_PERCENT
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            thumbnail_column_width: default_thumbnail_column_width(),
            column_gap: default_column_gap(),
            fix_threshold_percent: default_fix_threshold(),
            optimal_threshold_percent: default_optimal_threshold(),
        }
    }
}

impl GalleryConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            input: InputConfig::default(),
            layout: LayoutConfig::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if !(config.input.swipe_threshold.is_finite() && config.input.swipe_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "swipe_threshold must be a non-negative number, got {}",
                config.input.swipe_threshold
            )));
        }

        for (key, action, other) in config.input.keybindings.conflicts() {
            log::warn!(
                "Key {} is bound to both {} and {}; only one will fire",
                key,
                action.name(),
                other
            );
        }

        Ok(config)
    }

    /// Get the default filename for config files.
    pub fn default_filename() -> &'static str {
        "thumbnav-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("thumbnav").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("thumbnav")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "thumbnav-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

    /// Save configuration to localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

        let json = self.to_json()?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &json)
            .map_err(|e| {
                ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e))
            })?;

        log::info!("Saved configuration to localStorage");
        Ok(())
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A value parsed but is out of range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}
