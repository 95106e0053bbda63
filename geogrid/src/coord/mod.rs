//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (longitude/latitude)
//! and Web Mercator XYZ tile coordinates used by slippy-map tile servers.

mod types;

pub use types::{tiles_per_axis, TileCoord, MAX_MERCATOR_LAT, MAX_ZOOM, MIN_MERCATOR_LAT, MIN_ZOOM};

use std::f64::consts::PI;

use crate::error::{ConvertError, Result};
use crate::geometry::{BoundingBox, Coord, Geometry};

/// Converts a geographic point to the tile containing it.
///
/// Latitudes beyond the Web Mercator limit (±85.0511°) are clamped to the
/// first or last tile row; longitude 180 maps to the last column.
///
/// # Arguments
///
/// * `point` - Longitude/latitude in degrees
/// * `zoom` - Zoom level (0 to 22)
///
/// # Returns
///
/// A `Result` containing the tile coordinates or an error if inputs are invalid.
#[inline]
pub fn to_tile_coords(point: Coord, zoom: u8) -> Result<TileCoord> {
    // Validate inputs
    if !point.is_valid() {
        return Err(ConvertError::InvalidCoordinate {
            lon: point.lon,
            lat: point.lat,
        });
    }
    if zoom > MAX_ZOOM {
        return Err(ConvertError::InvalidZoom(zoom));
    }

    // Calculate number of tiles at this zoom level
    let n = tiles_per_axis(zoom);
    let n_f = n as f64;
    let last = (n - 1) as f64;

    // Convert longitude to tile X coordinate
    let x = ((point.lon + 180.0) / 360.0 * n_f).floor().clamp(0.0, last) as u32;

    // Convert latitude to tile Y coordinate using Web Mercator projection
    let lat = point.lat.clamp(MIN_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n_f)
        .floor()
        .clamp(0.0, last) as u32;

    Ok(TileCoord { x, y, zoom })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the longitude/latitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lon_lat(tile: &TileCoord) -> Coord {
    corner(tile.x as f64, tile.y as f64, tile.zoom)
}

/// Longitude/latitude of a tile-grid vertex; `x` and `y` may equal `2^zoom`.
fn corner(x: f64, y: f64, zoom: u8) -> Coord {
    let n = tiles_per_axis(zoom) as f64;

    // Convert tile X coordinate to longitude
    let lon = x / n * 360.0 - 180.0;

    // Convert tile Y coordinate to latitude using inverse Web Mercator
    let lat_rad = (PI * (1.0 - 2.0 * y / n)).sinh().atan();

    Coord::new(lon, lat_rad.to_degrees())
}

/// Decodes a tile into its geographic bounding box.
///
/// # Errors
///
/// `InvalidZoom` if zoom is above 22, `TileIndexOutOfRange` if `x` or `y`
/// is not below `2^zoom`.
pub fn tile_bounds(x: u32, y: u32, zoom: u8) -> Result<BoundingBox> {
    Ok(TileCoord::new(x, y, zoom)?.bounds())
}

/// Decodes a tile into a closed polygon (NW, NE, SE, SW, NW).
pub fn tile_polygon(x: u32, y: u32, zoom: u8) -> Result<Geometry> {
    Ok(TileCoord::new(x, y, zoom)?.to_polygon())
}

impl TileCoord {
    /// Geographic bounding box of this tile.
    pub fn bounds(&self) -> BoundingBox {
        let nw = tile_to_lon_lat(self);
        let se = corner((self.x + 1) as f64, (self.y + 1) as f64, self.zoom);
        BoundingBox::new(nw.lon, se.lat, se.lon, nw.lat)
    }

    /// Geographic center of this tile (center in Mercator space).
    pub fn center(&self) -> Coord {
        corner(self.x as f64 + 0.5, self.y as f64 + 0.5, self.zoom)
    }

    /// The tile outline as a Polygon, starting at the northwest corner.
    pub fn to_polygon(&self) -> Geometry {
        let (x, y) = (self.x as f64, self.y as f64);
        let nw = corner(x, y, self.zoom);
        let ring = vec![
            nw,
            corner(x + 1.0, y, self.zoom),
            corner(x + 1.0, y + 1.0, self.zoom),
            corner(x, y + 1.0, self.zoom),
            nw,
        ];
        Geometry::Polygon(vec![ring])
    }
}
