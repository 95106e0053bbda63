//! Configuration key access and validation.
//!
//! Keys are addressed as `section.key` (e.g. `mgrs.precision`). Values are
//! validated by a [`ValueSpecification`] before they reach the config.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use super::settings::{ConfigFile, LOG_LEVELS};
use crate::coord::MAX_ZOOM;
use crate::format::Format;
use crate::mgrs::MAX_PRECISION;
use crate::wkb::ByteOrder;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to one field of [`ConfigFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    XyzDefaultZoom,
    MgrsPrecision,
    OutputFormat,
    OutputPretty,
    OutputByteOrder,
    LoggingLevel,
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xyz.default_zoom" => Ok(ConfigKey::XyzDefaultZoom),
            "mgrs.precision" => Ok(ConfigKey::MgrsPrecision),
            "output.format" => Ok(ConfigKey::OutputFormat),
            "output.pretty" => Ok(ConfigKey::OutputPretty),
            "output.byte_order" => Ok(ConfigKey::OutputByteOrder),
            "logging.level" => Ok(ConfigKey::LoggingLevel),
            "logging.file" => Ok(ConfigKey::LoggingFile),
            _ => Err(ConfigKeyError::UnknownKey(s.to_string())),
        }
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "mgrs.precision").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::XyzDefaultZoom => "xyz.default_zoom",
            ConfigKey::MgrsPrecision => "mgrs.precision",
            ConfigKey::OutputFormat => "output.format",
            ConfigKey::OutputPretty => "output.pretty",
            ConfigKey::OutputByteOrder => "output.byte_order",
            ConfigKey::LoggingLevel => "logging.level",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "mgrs").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "precision").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::XyzDefaultZoom => config.xyz.default_zoom.to_string(),
            ConfigKey::MgrsPrecision => config.mgrs.precision.to_string(),
            ConfigKey::OutputFormat => config.output.format.to_string(),
            ConfigKey::OutputPretty => config.output.pretty.to_string(),
            ConfigKey::OutputByteOrder => config.output.byte_order.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| path_to_display(p))
                .unwrap_or_default(),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        self.set_validated(config, value.trim());
        Ok(())
    }

    fn set_validated(&self, config: &mut ConfigFile, value: &str) {
        match self {
            ConfigKey::XyzDefaultZoom => {
                if let Ok(zoom) = value.parse() {
                    config.xyz.default_zoom = zoom;
                }
            }
            ConfigKey::MgrsPrecision => {
                if let Ok(precision) = value.parse() {
                    config.mgrs.precision = precision;
                }
            }
            ConfigKey::OutputFormat => {
                if let Ok(format) = value.parse() {
                    config.output.format = format;
                }
            }
            ConfigKey::OutputPretty => {
                if let Some(pretty) = parse_bool(value) {
                    config.output.pretty = pretty;
                }
            }
            ConfigKey::OutputByteOrder => {
                if let Ok(order) = value.parse() {
                    config.output.byte_order = order;
                }
            }
            ConfigKey::LoggingLevel => {
                config.logging.level = value.to_lowercase();
            }
            ConfigKey::LoggingFile => {
                config.logging.file = optional_path(value);
            }
        }
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::XyzDefaultZoom => Box::new(IntegerRangeSpec::new(0, MAX_ZOOM as u64)),
            ConfigKey::MgrsPrecision => Box::new(IntegerRangeSpec::new(0, MAX_PRECISION as u64)),
            ConfigKey::OutputFormat => Box::new(FormatSpec),
            ConfigKey::OutputPretty => Box::new(BooleanSpec),
            ConfigKey::OutputByteOrder => Box::new(ByteOrderSpec),
            ConfigKey::LoggingLevel => Box::new(OneOfSpec::new(LOG_LEVELS)),
            ConfigKey::LoggingFile => Box::new(OptionalPathSpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::XyzDefaultZoom,
            ConfigKey::MgrsPrecision,
            ConfigKey::OutputFormat,
            ConfigKey::OutputPretty,
            ConfigKey::OutputByteOrder,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }
}

// ============================================================================
// Value Specifications (Specification Pattern)
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Specification that requires the value to be one of a set of options.
struct OneOfSpec {
    options: &'static [&'static str],
}

impl OneOfSpec {
    fn new(options: &'static [&'static str]) -> Self {
        Self { options }
    }
}

impl ValueSpecification for OneOfSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        if self.options.iter().any(|opt| *opt == lower) {
            Ok(())
        } else {
            Err(format!("must be one of: {}", self.options.join(", ")))
        }
    }
}

/// Specification for integers within an inclusive range.
struct IntegerRangeSpec {
    min: u64,
    max: u64,
}

impl IntegerRangeSpec {
    fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

impl ValueSpecification for IntegerRangeSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let reason = || format!("must be an integer between {} and {}", self.min, self.max);
        let n = value.parse::<u64>().map_err(|_| reason())?;
        if (self.min..=self.max).contains(&n) {
            Ok(())
        } else {
            Err(reason())
        }
    }
}

/// Specification for boolean values.
struct BooleanSpec;

impl ValueSpecification for BooleanSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        parse_bool(value)
            .map(|_| ())
            .ok_or_else(|| "must be true/false, yes/no, 1/0, or on/off".to_string())
    }
}

/// Specification for format names, aliases included.
struct FormatSpec;

impl ValueSpecification for FormatSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<Format>()
            .map(|_| ())
            .map_err(|_| "must be one of: xyz, mgrs, wkt, wkb, geojson".to_string())
    }
}

/// Specification for WKB byte order names.
struct ByteOrderSpec;

impl ValueSpecification for ByteOrderSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value.parse::<ByteOrder>().map(|_| ())
    }
}

/// Specification for optional path values (empty allowed).
struct OptionalPathSpec;

impl ValueSpecification for OptionalPathSpec {
    fn is_satisfied_by(&self, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse the boolean spellings accepted in config values.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Convert path to display string, collapsing home dir to ~.
pub(super) fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

/// Convert empty string to None, non-empty to Some path with tilde expansion.
fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(expand_tilde(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "mgrs.precision".parse::<ConfigKey>().unwrap(),
            ConfigKey::MgrsPrecision
        );
        // Case insensitive
        assert_eq!(
            "OUTPUT.BYTE_ORDER".parse::<ConfigKey>().unwrap(),
            ConfigKey::OutputByteOrder
        );
        assert_eq!(
            "invalid.key".parse::<ConfigKey>().unwrap_err(),
            ConfigKeyError::UnknownKey("invalid.key".to_string())
        );
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::XyzDefaultZoom.section(), "xyz");
        assert_eq!(ConfigKey::XyzDefaultZoom.key_name(), "default_zoom");
        assert_eq!(ConfigKey::LoggingFile.section(), "logging");
        assert_eq!(ConfigKey::LoggingFile.key_name(), "file");
    }

    #[test]
    fn test_names_parse_back() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_get_defaults() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::XyzDefaultZoom.get(&config), "14");
        assert_eq!(ConfigKey::MgrsPrecision.get(&config), "0");
        assert_eq!(ConfigKey::OutputFormat.get(&config), "wkt");
        assert_eq!(ConfigKey::OutputPretty.get(&config), "false");
        assert_eq!(ConfigKey::OutputByteOrder.get(&config), "little");
        assert_eq!(ConfigKey::LoggingLevel.get(&config), "warn");
        assert_eq!(ConfigKey::LoggingFile.get(&config), "");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::XyzDefaultZoom.set(&mut config, "18").unwrap();
        assert_eq!(config.xyz.default_zoom, 18);

        ConfigKey::MgrsPrecision.set(&mut config, " 5 ").unwrap();
        assert_eq!(config.mgrs.precision, 5);

        ConfigKey::OutputFormat.set(&mut config, "json").unwrap();
        assert_eq!(config.output.format, Format::GeoJson);

        ConfigKey::OutputPretty.set(&mut config, "yes").unwrap();
        assert!(config.output.pretty);

        ConfigKey::OutputByteOrder.set(&mut config, "XDR").unwrap();
        assert_eq!(config.output.byte_order, ByteOrder::BigEndian);

        ConfigKey::LoggingLevel.set(&mut config, "DEBUG").unwrap();
        assert_eq!(config.logging.level, "debug");

        ConfigKey::LoggingFile
            .set(&mut config, "/tmp/geogrid.log")
            .unwrap();
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/geogrid.log")));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(ConfigKey::XyzDefaultZoom.validate("0").is_ok());
        assert!(ConfigKey::XyzDefaultZoom.validate("22").is_ok());
        assert!(ConfigKey::XyzDefaultZoom.validate("23").is_err());
        assert!(ConfigKey::XyzDefaultZoom.validate("-1").is_err());
        assert!(ConfigKey::MgrsPrecision.validate("5").is_ok());
        assert!(ConfigKey::MgrsPrecision.validate("6").is_err());
        assert!(ConfigKey::MgrsPrecision.validate("two").is_err());
    }

    #[test]
    fn test_validate_choices() {
        assert!(ConfigKey::OutputFormat.validate("geojson").is_ok());
        assert!(ConfigKey::OutputFormat.validate("kml").is_err());
        assert!(ConfigKey::OutputByteOrder.validate("big").is_ok());
        assert!(ConfigKey::OutputByteOrder.validate("middle").is_err());
        assert!(ConfigKey::OutputPretty.validate("off").is_ok());
        assert!(ConfigKey::OutputPretty.validate("maybe").is_err());
        assert!(ConfigKey::LoggingLevel.validate("trace").is_ok());
        assert!(ConfigKey::LoggingLevel.validate("verbose").is_err());
    }

    #[test]
    fn test_set_invalid_value_leaves_config_unchanged() {
        let mut config = ConfigFile::default();
        let result = ConfigKey::XyzDefaultZoom.set(&mut config, "30");

        assert!(matches!(
            result,
            Err(ConfigKeyError::ValidationFailed { ref key, .. }) if key == "xyz.default_zoom"
        ));
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_clear_log_file() {
        let mut config = ConfigFile::default();
        ConfigKey::LoggingFile.set(&mut config, "/var/log/g.log").unwrap();
        assert!(config.logging.file.is_some());

        ConfigKey::LoggingFile.set(&mut config, "").unwrap();
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_all_keys() {
        assert_eq!(ConfigKey::all().len(), 7);
    }
}
