//! Configuration file handling for ~/.geogrid/config.ini.
//!
//! A missing file yields the defaults. Values are validated through
//! [`ConfigKey`] so the file and `config set` accept the same spellings.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::keys::{path_to_display, ConfigKey, ConfigKeyError};
use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.geogrid/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.geogrid/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }
}

/// Get the path to the config directory (~/.geogrid).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geogrid")
}

/// Get the path to the config file (~/.geogrid/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

/// Overlays the values found in `ini` onto the defaults.
fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    for key in ConfigKey::all() {
        let Some(value) = ini
            .section(Some(key.section()))
            .and_then(|section| section.get(key.key_name()))
        else {
            continue;
        };

        key.set(&mut config, value)
            .map_err(|e| ConfigFileError::InvalidValue {
                section: key.section().to_string(),
                key: key.key_name().to_string(),
                value: value.to_string(),
                reason: match e {
                    ConfigKeyError::ValidationFailed { reason, .. } => reason,
                    other => other.to_string(),
                },
            })?;
    }

    Ok(config)
}

/// Renders the commented INI written to `config.ini`.
fn to_config_string(config: &ConfigFile) -> String {
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| path_to_display(p))
        .unwrap_or_default();

    format!(
        r#"[xyz]
; Zoom level used when encoding to tiles without --zoom (0-22)
default_zoom = {}

[mgrs]
; Digits per axis when encoding to MGRS without --precision (0-5)
;   0 = 100 km square, 5 = 1 m cell
precision = {}

[output]
; Target format when --to is omitted: xyz, mgrs, wkt, wkb, geojson
format = {}
; Indent GeoJSON output
pretty = {}
; WKB byte order: little or big
byte_order = {}

[logging]
; Minimum log level when RUST_LOG is unset: trace, debug, info, warn, error
level = {}
; Also write logs to this file (leave empty for stderr only)
file = {}
"#,
        config.xyz.default_zoom,
        config.mgrs.precision,
        config.output.format,
        config.output.pretty,
        config.output.byte_order,
        config.logging.level,
        log_file,
    )
}
