//! Geometry type definitions

use std::fmt;

use thiserror::Error;

use super::BoundingBox;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Minimum number of points in a LineString
pub const MIN_LINE_POINTS: usize = 2;

/// Minimum number of points in a closed Polygon ring
pub const MIN_RING_POINTS: usize = 4;

/// A geographic position in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    /// Longitude (x), -180 to 180
    pub lon: f64,
    /// Latitude (y), -90 to 90
    pub lat: f64,
}

impl Coord {
    /// Creates a coordinate from longitude and latitude.
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns true when both ordinates are finite and within geographic bounds.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (MIN_LON..=MAX_LON).contains(&self.lon)
            && (MIN_LAT..=MAX_LAT).contains(&self.lat)
    }

    /// Checks this coordinate against the geographic bounds.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        if !(MIN_LON..=MAX_LON).contains(&self.lon) {
            return Err(GeometryError::LongitudeOutOfRange(self.lon));
        }
        if !(MIN_LAT..=MAX_LAT).contains(&self.lat) {
            return Err(GeometryError::LatitudeOutOfRange(self.lat));
        }
        Ok(())
    }

    /// Returns true when both ordinates differ by at most `epsilon`.
    pub fn approx_eq(&self, other: &Coord, epsilon: f64) -> bool {
        (self.lon - other.lon).abs() <= epsilon && (self.lat - other.lat).abs() <= epsilon
    }
}

impl From<(f64, f64)> for Coord {
    fn from((lon, lat): (f64, f64)) -> Self {
        Coord::new(lon, lat)
    }
}

/// The geometry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// All kinds in OGC type-code order.
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
    ];

    /// Type name as used by GeoJSON and for display (e.g. `MultiPolygon`).
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }

    /// Upper-case WKT keyword (e.g. `MULTIPOLYGON`).
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
            GeometryKind::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Looks up a kind by WKT keyword, ignoring case.
    pub fn from_wkt_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wkt_keyword().eq_ignore_ascii_case(keyword))
    }

    /// Looks up a kind by its GeoJSON `type` name (case-sensitive, per RFC 7946).
    pub fn from_geojson_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Base OGC WKB type code (1 to 7).
    pub fn wkb_code(&self) -> u32 {
        match self {
            GeometryKind::Point => 1,
            GeometryKind::LineString => 2,
            GeometryKind::Polygon => 3,
            GeometryKind::MultiPoint => 4,
            GeometryKind::MultiLineString => 5,
            GeometryKind::MultiPolygon => 6,
            GeometryKind::GeometryCollection => 7,
        }
    }

    /// Looks up a kind by base OGC WKB type code.
    pub fn from_wkb_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wkb_code() == code)
    }

    /// Returns true for the Multi* kinds and GeometryCollection.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            GeometryKind::MultiPoint
                | GeometryKind::MultiLineString
                | GeometryKind::MultiPolygon
                | GeometryKind::GeometryCollection
        )
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical in-memory geometry in geographic coordinates.
///
/// Nesting depth follows the kind: a Polygon is a list of rings, each ring a
/// closed list of positions; Multi* variants hold lists of the single-part
/// structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// The type tag of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Returns true if the geometry holds no positions at all.
    pub fn is_empty(&self) -> bool {
        self.coords().next().is_none()
    }

    /// Iterates over every position in the geometry, depth first.
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coord> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(line) | Geometry::MultiPoint(line) => Box::new(line.iter()),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                Box::new(rings.iter().flatten())
            }
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter().flatten().flatten()),
            Geometry::GeometryCollection(members) => {
                Box::new(members.iter().flat_map(|g| g.coords()))
            }
        }
    }

    /// Number of positions in the geometry.
    pub fn num_coords(&self) -> usize {
        self.coords().count()
    }

    /// Bounding box of all positions, or `None` for an empty collection.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(self.coords())
    }

    /// Checks the geometry invariants.
    ///
    /// Every position must be finite and inside geographic bounds, every
    /// LineString must have at least two points, and every Polygon must have
    /// at least one ring, each closed with at least four points.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Geometry::Point(c) => c.validate(),
            Geometry::LineString(line) => validate_line(line),
            Geometry::Polygon(rings) => validate_polygon(rings),
            Geometry::MultiPoint(points) => points.iter().try_for_each(Coord::validate),
            Geometry::MultiLineString(lines) => {
                lines.iter().try_for_each(|line| validate_line(line))
            }
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .try_for_each(|rings| validate_polygon(rings)),
            Geometry::GeometryCollection(members) => {
                members.iter().try_for_each(Geometry::validate)
            }
        }
    }

    /// Coordinate-for-coordinate equality within `epsilon`.
    pub fn approx_eq(&self, other: &Geometry, epsilon: f64) -> bool {
        fn seq_eq(a: &[Coord], b: &[Coord], epsilon: f64) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.approx_eq(q, epsilon))
        }
        fn rings_eq(a: &[Vec<Coord>], b: &[Vec<Coord>], epsilon: f64) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(p, q)| seq_eq(p, q, epsilon))
        }

        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => a.approx_eq(b, epsilon),
            (Geometry::LineString(a), Geometry::LineString(b))
            | (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => seq_eq(a, b, epsilon),
            (Geometry::Polygon(a), Geometry::Polygon(b))
            | (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                rings_eq(a, b, epsilon)
            }
            (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(p, q)| rings_eq(p, q, epsilon))
            }
            (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.approx_eq(q, epsilon))
            }
            _ => false,
        }
    }
}

fn validate_line(line: &[Coord]) -> Result<(), GeometryError> {
    if line.len() < MIN_LINE_POINTS {
        return Err(GeometryError::TooFewLinePoints(line.len()));
    }
    line.iter().try_for_each(Coord::validate)
}

fn validate_polygon(rings: &[Vec<Coord>]) -> Result<(), GeometryError> {
    if rings.is_empty() {
        return Err(GeometryError::EmptyPolygon);
    }
    for ring in rings {
        if ring.len() < MIN_RING_POINTS {
            return Err(GeometryError::TooFewRingPoints(ring.len()));
        }
        ring.iter().try_for_each(Coord::validate)?;
        // Closed means exactly equal; a ring that merely comes near its start is open
        if ring.first() != ring.last() {
            return Err(GeometryError::RingNotClosed);
        }
    }
    Ok(())
}

/// Geometry invariant violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("coordinate is not a finite number")]
    NonFiniteCoordinate,

    #[error("longitude {0} is outside -180..180")]
    LongitudeOutOfRange(f64),

    #[error("latitude {0} is outside -90..90")]
    LatitudeOutOfRange(f64),

    #[error("linestring has {0} points, at least 2 required")]
    TooFewLinePoints(usize),

    #[error("polygon ring has {0} points, at least 4 required")]
    TooFewRingPoints(usize),

    #[error("polygon ring is not closed")]
    RingNotClosed,

    #[error("polygon has no rings")]
    EmptyPolygon,
}
