//! Axis-aligned geographic bounding boxes.

use std::fmt;

use super::types::{Coord, Geometry, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// A longitude/latitude rectangle in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Creates a bounding box, ordering each axis so that min <= max.
    pub fn new(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> Self {
        Self {
            min_lon: lon_a.min(lon_b),
            min_lat: lat_a.min(lat_b),
            max_lon: lon_a.max(lon_b),
            max_lat: lat_a.max(lat_b),
        }
    }

    /// Smallest box containing every coordinate, or `None` if there are none.
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first.lon, first.lat, first.lon, first.lat);
        for c in iter {
            bbox.expand(c);
        }
        Some(bbox)
    }

    /// Grows the box to include `c`.
    pub fn expand(&mut self, c: &Coord) {
        self.min_lon = self.min_lon.min(c.lon);
        self.min_lat = self.min_lat.min(c.lat);
        self.max_lon = self.max_lon.max(c.lon);
        self.max_lat = self.max_lat.max(c.lat);
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Center point of the box.
    pub fn center(&self) -> Coord {
        Coord::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Returns true if `c` lies inside or on the edge of the box.
    pub fn contains(&self, c: &Coord) -> bool {
        (self.min_lon..=self.max_lon).contains(&c.lon)
            && (self.min_lat..=self.max_lat).contains(&c.lat)
    }

    /// Overlap of two boxes, or `None` unless it has positive area.
    ///
    /// Boxes that only share an edge or a corner do not intersect.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min_lon = self.min_lon.max(other.min_lon);
        let min_lat = self.min_lat.max(other.min_lat);
        let max_lon = self.max_lon.min(other.max_lon);
        let max_lat = self.max_lat.min(other.max_lat);
        if !(min_lon < max_lon && min_lat < max_lat) {
            return None;
        }
        Some(BoundingBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Scales the box about its center by `factor`, clamped to geographic bounds.
    ///
    /// A factor of 1.1 adds a 5% margin on every side.
    pub fn scale(&self, factor: f64) -> BoundingBox {
        let center = self.center();
        let half_w = self.width() * factor / 2.0;
        let half_h = self.height() * factor / 2.0;
        BoundingBox {
            min_lon: (center.lon - half_w).max(MIN_LON),
            min_lat: (center.lat - half_h).max(MIN_LAT),
            max_lon: (center.lon + half_w).min(MAX_LON),
            max_lat: (center.lat + half_h).min(MAX_LAT),
        }
    }

    /// Closed counter-clockwise ring: SW, SE, NE, NW, SW.
    pub fn to_ring(&self) -> Vec<Coord> {
        vec![
            Coord::new(self.min_lon, self.min_lat),
            Coord::new(self.max_lon, self.min_lat),
            Coord::new(self.max_lon, self.max_lat),
            Coord::new(self.min_lon, self.max_lat),
            Coord::new(self.min_lon, self.min_lat),
        ]
    }

    /// The box as a single-ring Polygon.
    pub fn to_polygon(&self) -> Geometry {
        Geometry::Polygon(vec![self.to_ring()])
    }

    /// `[min_lon, min_lat, max_lon, max_lat]`, the GeoJSON `bbox` ordering.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
