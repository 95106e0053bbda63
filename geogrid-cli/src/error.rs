//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use geogrid::config::ConfigFileError;
use geogrid::ConvertError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to load or save the config file
    ConfigFile(ConfigFileError),
    /// Conversion failed
    Convert(ConvertError),
    /// Failed to read input from stdin
    ReadInput(std::io::Error),
    /// Argument value rejected before conversion
    InvalidArgument(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let Some(hint) = self.hint() {
            eprintln!();
            eprintln!("{}", hint);
        }

        process::exit(1)
    }

    /// Extra guidance printed below the error for common input mistakes.
    fn hint(&self) -> Option<&'static str> {
        let CliError::Convert(e) = self else {
            return None;
        };
        let hint = match e {
            ConvertError::InvalidZoom(_) | ConvertError::TileIndexOutOfRange { .. } => {
                "Tiles are addressed as X Y Z with 0 <= Z <= 22 and X, Y below 2^Z."
            }
            ConvertError::InvalidMgrsFormat { .. } => {
                "Expected zone, band and 100 km square, then 0-5 digits per axis,\n\
                 e.g. 33UUU, 18TWL8359 or 18T WL 83959 07350."
            }
            ConvertError::UnsupportedLatitude(_) => {
                "MGRS covers latitudes from 80°S to 84°N. Polar (UPS) references are not supported."
            }
            ConvertError::MgrsBandMismatch { .. } => {
                "The 100 km square letters do not occur inside this grid zone.\n\
                 Check the band letter and the square identifier."
            }
            ConvertError::MalformedWkt(_) => {
                "Expected Well-Known Text, e.g. POINT (30 10) or POLYGON ((0 0, 1 0, 1 1, 0 0))."
            }
            ConvertError::MalformedWkb(_) => {
                "Expected hex-encoded WKB or EWKB, e.g. 0101000000000000000000F03F0000000000000040."
            }
            ConvertError::MalformedGeoJson(_) => {
                "Expected a GeoJSON geometry or Feature, e.g. {\"type\":\"Point\",\"coordinates\":[30,10]}."
            }
            ConvertError::InvalidCoordinate { .. } => {
                "Longitude must be within -180..180 and latitude within -90..90."
            }
            ConvertError::UnsupportedInput(_) => {
                "Supported formats: xyz, mgrs, wkt, wkb, geojson."
            }
        };
        Some(hint)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Convert(e) => write!(f, "{}", e),
            CliError::ReadInput(e) => write!(f, "Failed to read input: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Convert(e) => Some(e),
            CliError::ReadInput(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConvertError> for CliError {
    fn from(e: ConvertError) -> Self {
        CliError::Convert(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}
