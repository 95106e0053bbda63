//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of the INI config file. These are
//! plain data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::format::{EncodeOptions, Format, DEFAULT_MGRS_PRECISION, DEFAULT_ZOOM};
use crate::wkb::ByteOrder;

/// Default output format for conversions
pub const DEFAULT_OUTPUT_FORMAT: Format = Format::Wkt;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    /// XYZ tile settings
    pub xyz: XyzSettings,
    /// MGRS settings
    pub mgrs: MgrsSettings,
    /// Output encoding settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Encoding options derived from the configured defaults.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            zoom: self.xyz.default_zoom,
            precision: self.mgrs.precision,
            byte_order: self.output.byte_order,
            pretty: self.output.pretty,
        }
    }
}

/// `[xyz]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzSettings {
    /// Zoom level used when encoding to tiles without an explicit zoom
    pub default_zoom: u8,
}

impl Default for XyzSettings {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

/// `[mgrs]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MgrsSettings {
    /// Digits per axis used when encoding to MGRS (0-5)
    pub precision: u8,
}

impl Default for MgrsSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_MGRS_PRECISION,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Target format when none is given on the command line
    pub format: Format,
    /// Indent GeoJSON output
    pub pretty: bool,
    /// Byte order of WKB output
    pub byte_order: ByteOrder,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: DEFAULT_OUTPUT_FORMAT,
            pretty: false,
            byte_order: ByteOrder::LittleEndian,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Minimum level when `RUST_LOG` is not set
    pub level: String,
    /// Optional log file; stderr only when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}
