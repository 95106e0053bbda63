//! Error types for coordinate and geometry conversions.
//!
//! Every decode/encode operation either returns a fully valid value or fails
//! with exactly one [`ConvertError`] variant. Errors carry the offending input
//! (or a reason) so that callers can surface them verbatim.

use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting between formats.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Zoom level is outside the supported range (0 to 22)
    #[error("Invalid zoom level: {0} (must be between 0 and 22)")]
    InvalidZoom(u8),

    /// Tile column or row does not exist at the requested zoom level
    #[error("Tile index out of range: x={x}, y={y} does not exist at zoom {zoom}")]
    TileIndexOutOfRange { x: u32, y: u32, zoom: u8 },

    /// MGRS reference could not be parsed or names a non-existent grid cell
    #[error("Invalid MGRS reference '{input}': {reason}")]
    InvalidMgrsFormat { input: String, reason: String },

    /// Latitude is outside the UTM/MGRS coverage (80°S to 84°N)
    #[error("Unsupported latitude for MGRS: {0} (must be between -80 and 84)")]
    UnsupportedLatitude(f64),

    /// The decoded grid square does not fall inside its latitude band or grid zone
    #[error("MGRS reference '{input}' does not lie within band {band}: {reason}")]
    MgrsBandMismatch {
        input: String,
        band: char,
        reason: String,
    },

    /// WKT text could not be parsed
    #[error("Malformed WKT: {0}")]
    MalformedWkt(String),

    /// WKB hex could not be decoded
    #[error("Malformed WKB: {0}")]
    MalformedWkb(String),

    /// GeoJSON text could not be parsed
    #[error("Malformed GeoJSON: {0}")]
    MalformedGeoJson(String),

    /// Input coordinate is not finite or outside geographic bounds
    #[error("Invalid coordinate: lon={lon}, lat={lat}")]
    InvalidCoordinate { lon: f64, lat: f64 },

    /// Input variant does not match the selected format
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

impl ConvertError {
    /// Short, stable name of the error kind (e.g. `MalformedWkt`).
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidZoom(_) => "InvalidZoom",
            ConvertError::TileIndexOutOfRange { .. } => "TileIndexOutOfRange",
            ConvertError::InvalidMgrsFormat { .. } => "InvalidMgrsFormat",
            ConvertError::UnsupportedLatitude(_) => "UnsupportedLatitude",
            ConvertError::MgrsBandMismatch { .. } => "MgrsBandMismatch",
            ConvertError::MalformedWkt(_) => "MalformedWkt",
            ConvertError::MalformedWkb(_) => "MalformedWkb",
            ConvertError::MalformedGeoJson(_) => "MalformedGeoJson",
            ConvertError::InvalidCoordinate { .. } => "InvalidCoordinate",
            ConvertError::UnsupportedInput(_) => "UnsupportedInput",
        }
    }
}
