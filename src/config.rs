//! Tool configuration.
//!
//! Handles loading, validating, and merging an optional `imgmeta.toml`. The
//! file is sparse: stock defaults are the base layer and any keys the user sets
//! override them.
//!
//! ## Config File Location
//!
//! `imgmeta.toml` in the working directory is picked up automatically. An
//! explicit `--config <path>` on the command line replaces that lookup, and a
//! missing explicit file is an error.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [scan]
//! extensions = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"]
//!
//! [display]
//! delay_seconds = 2.0
//!
//! [transform]
//! suffix = "_transformed"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "imgmeta.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `imgmeta.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Which files count as images when enumerating a directory.
    pub scan: ScanConfig,
    /// Settings for the `imgmeta-show` display program.
    pub display: DisplayConfig,
    /// Settings for the bulk transform operation.
    pub transform: TransformConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if self
            .scan
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::Validation(
                "scan.extensions entries must not be empty".into(),
            ));
        }
        if !self.display.delay_seconds.is_finite() || self.display.delay_seconds < 0.0 {
            return Err(ConfigError::Validation(
                "display.delay_seconds must be a non-negative number".into(),
            ));
        }
        if self.transform.suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "transform.suffix must not contain path separators".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Recognized image extensions, without the dot. Matched case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: crate::scan::IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Pause between records when showing a directory.
    pub delay_seconds: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { delay_seconds: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Appended to the file stem of every transformed image.
    pub suffix: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            suffix: "_transformed".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(Config::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse config text, merge it over the defaults, and validate.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration for a run.
///
/// - `Some(path)`: the file must exist.
/// - `None`: use `imgmeta.toml` in `cwd` if present, otherwise stock defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let implicit = cwd.join(CONFIG_FILENAME);
            if !implicit.is_file() {
                return Ok(Config::default());
            }
            implicit
        }
    };
    let content = fs::read_to_string(&path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `imgmeta.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgmeta configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as imgmeta.toml in the directory you run imgmeta from,
# or pass --config <path>. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Directory scanning
# ---------------------------------------------------------------------------
[scan]
# Extensions (without the dot) treated as images. Case-insensitive.
extensions = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"]

# ---------------------------------------------------------------------------
# imgmeta-show
# ---------------------------------------------------------------------------
[display]
# Seconds to pause between images when showing a directory.
delay_seconds = 2.0

# ---------------------------------------------------------------------------
# Bulk transform
# ---------------------------------------------------------------------------
[transform]
# Appended to the file stem: photo.png -> photo_transformed.png
suffix = "_transformed"
"##
}
