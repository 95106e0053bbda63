//! Serde model of RFC 7946 geometry objects.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ConvertError, Result};
use crate::geometry::{Coord, Geometry};

/// A position; members past the second (altitude) are read and dropped.
type Position = Vec<f64>;

/// Any GeoJSON object that carries a geometry.
///
/// Unknown members (`bbox`, `properties`, `crs`, ...) are ignored. Type
/// names are case-sensitive.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(super) enum GeoJsonObject {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonObject>,
    },
    Feature {
        geometry: Option<Box<GeoJsonObject>>,
    },
}

fn malformed(msg: impl Into<String>) -> ConvertError {
    ConvertError::MalformedGeoJson(msg.into())
}

fn position(p: &[f64]) -> Result<Coord> {
    match p {
        [lon, lat, ..] => Ok(Coord::new(*lon, *lat)),
        _ => Err(malformed(format!(
            "a position needs at least 2 numbers, found {}",
            p.len()
        ))),
    }
}

fn positions(ps: &[Position]) -> Result<Vec<Coord>> {
    ps.iter().map(|p| position(p)).collect()
}

fn rings(rs: &[Vec<Position>]) -> Result<Vec<Vec<Coord>>> {
    rs.iter().map(|r| positions(r)).collect()
}

impl GeoJsonObject {
    /// Converts to the canonical model. A top-level Feature is unwrapped;
    /// anywhere else it is an error.
    pub(super) fn into_geometry(self, top_level: bool) -> Result<Geometry> {
        Ok(match self {
            GeoJsonObject::Point { coordinates } => Geometry::Point(position(&coordinates)?),
            GeoJsonObject::LineString { coordinates } => {
                Geometry::LineString(positions(&coordinates)?)
            }
            GeoJsonObject::Polygon { coordinates } => Geometry::Polygon(rings(&coordinates)?),
            GeoJsonObject::MultiPoint { coordinates } => {
                Geometry::MultiPoint(positions(&coordinates)?)
            }
            GeoJsonObject::MultiLineString { coordinates } => {
                Geometry::MultiLineString(rings(&coordinates)?)
            }
            GeoJsonObject::MultiPolygon { coordinates } => Geometry::MultiPolygon(
                coordinates
                    .iter()
                    .map(|polygon| rings(polygon))
                    .collect::<Result<_>>()?,
            ),
            GeoJsonObject::GeometryCollection { geometries } => Geometry::GeometryCollection(
                geometries
                    .into_iter()
                    .map(|g| g.into_geometry(false))
                    .collect::<Result<_>>()?,
            ),
            GeoJsonObject::Feature { geometry } => {
                if !top_level {
                    return Err(malformed("a Feature cannot be a collection member"));
                }
                let geometry = geometry.ok_or_else(|| malformed("Feature has a null geometry"))?;
                geometry.into_geometry(false)?
            }
        })
    }
}

fn coord_value(c: &Coord) -> Value {
    json!([c.lon, c.lat])
}

fn coords_value(coords: &[Coord]) -> Value {
    Value::Array(coords.iter().map(coord_value).collect())
}

fn rings_value(rings: &[Vec<Coord>]) -> Value {
    Value::Array(rings.iter().map(|r| coords_value(r)).collect())
}

/// Builds the GeoJSON geometry object for a geometry.
pub(super) fn to_value(geometry: &Geometry) -> Value {
    let kind = geometry.kind().name();
    match geometry {
        Geometry::Point(c) => json!({ "type": kind, "coordinates": coord_value(c) }),
        Geometry::LineString(coords) | Geometry::MultiPoint(coords) => {
            json!({ "type": kind, "coordinates": coords_value(coords) })
        }
        Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
            json!({ "type": kind, "coordinates": rings_value(rings) })
        }
        Geometry::MultiPolygon(polygons) => {
            let coordinates: Vec<Value> = polygons.iter().map(|p| rings_value(p)).collect();
            json!({ "type": kind, "coordinates": coordinates })
        }
        Geometry::GeometryCollection(members) => {
            let geometries: Vec<Value> = members.iter().map(to_value).collect();
            json!({ "type": kind, "geometries": geometries })
        }
    }
}
