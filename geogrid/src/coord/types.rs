//! Tile coordinate type definitions

use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, Result};

/// Web Mercator valid latitude range, `atan(sinh(π))` in degrees
pub const MIN_MERCATOR_LAT: f64 = -85.051_128_779_806_59;
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Supported zoom levels
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// Tile coordinates in the Web Mercator / Slippy Map system.
///
/// Always holds a tile that exists at its zoom level; construct through
/// [`TileCoord::new`] to get that guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// X coordinate (west-east column), 0 at the antimeridian
    pub x: u32,
    /// Y coordinate (north-south row), 0 at the north edge
    pub y: u32,
    /// Zoom level (0-22)
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a tile coordinate, checking zoom and index ranges.
    pub fn new(x: u32, y: u32, zoom: u8) -> Result<Self> {
        if zoom > MAX_ZOOM {
            return Err(ConvertError::InvalidZoom(zoom));
        }
        let n = tiles_per_axis(zoom);
        if x >= n || y >= n {
            return Err(ConvertError::TileIndexOutOfRange { x, y, zoom });
        }
        Ok(Self { x, y, zoom })
    }
}

/// Number of tile columns (and rows) at a zoom level.
#[inline]
pub fn tiles_per_axis(zoom: u8) -> u32 {
    1u32 << zoom
}

impl fmt::Display for TileCoord {
    /// Formats as the conventional `z/x/y` tile path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

impl FromStr for TileCoord {
    type Err = ConvertError;

    /// Parses a `z/x/y` tile path.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConvertError::UnsupportedInput(format!("'{}' is not a z/x/y tile path", s));

        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let zoom: u8 = parts[0].trim().parse().map_err(|_| invalid())?;
        let x: u32 = parts[1].trim().parse().map_err(|_| invalid())?;
        let y: u32 = parts[2].trim().parse().map_err(|_| invalid())?;

        TileCoord::new(x, y, zoom)
    }
}
