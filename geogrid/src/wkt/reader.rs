//! WKT reading: text checks, then the `wkt` crate, then mapping into the
//! canonical model.

use std::str::FromStr;

use geo_traits::{
    CoordTrait, GeometryCollectionTrait, GeometryTrait, GeometryType, LineStringTrait,
    MultiLineStringTrait, MultiPointTrait, MultiPolygonTrait, PointTrait, PolygonTrait,
};
use ::wkt::Wkt;

use crate::error::{ConvertError, Result};
use crate::geometry::{Coord, Geometry};

/// Deepest parenthesis nesting accepted: a MULTIPOLYGON needs three levels
/// and every enclosing GEOMETRYCOLLECTION adds one.
const MAX_PAREN_DEPTH: usize = 32 + 3;

fn malformed(msg: impl Into<String>) -> ConvertError {
    ConvertError::MalformedWkt(msg.into())
}

/// Removes an EWKT `SRID=<n>;` prefix.
fn strip_srid(text: &str) -> Result<&str> {
    let trimmed = text.trim_start();
    let has_prefix = trimmed
        .get(..5)
        .map(|p| p.eq_ignore_ascii_case("SRID="))
        .unwrap_or(false);
    if !has_prefix {
        return Ok(text);
    }
    let (srid, rest) = trimmed[5..]
        .split_once(';')
        .ok_or_else(|| malformed("SRID prefix is not terminated by ';'"))?;
    if srid.trim().parse::<i32>().is_err() {
        return Err(malformed(format!("invalid SRID '{}'", srid.trim())));
    }
    Ok(rest)
}

/// Rejects characters WKT never uses, unbalanced parentheses, trailing
/// input and nesting past [`MAX_PAREN_DEPTH`].
///
/// Runs before the recursive parser so that hostile nesting cannot exhaust
/// the stack.
fn check_text(body: &str) -> Result<()> {
    let mut depth = 0usize;
    let mut closed = false;

    for (offset, c) in body.char_indices() {
        if c.is_whitespace() {
            continue;
        }
        if closed {
            return Err(malformed(format!(
                "trailing input at offset {}",
                offset
            )));
        }
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_PAREN_DEPTH {
                    return Err(malformed(format!(
                        "nesting deeper than {} levels",
                        MAX_PAREN_DEPTH
                    )));
                }
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(format!("unmatched ')' at offset {}", offset)))?;
                closed = depth == 0;
            }
            c if c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | '-' | '+') => {}
            other => {
                return Err(malformed(format!(
                    "unexpected character '{}' at offset {}",
                    other, offset
                )))
            }
        }
    }

    if depth > 0 {
        return Err(malformed("unclosed '('"));
    }
    Ok(())
}

fn coord(c: &impl CoordTrait<T = f64>) -> Coord {
    Coord::new(c.x(), c.y())
}

fn point(p: &impl PointTrait<T = f64>, keyword: &str) -> Result<Coord> {
    p.coord()
        .map(|c| coord(&c))
        .ok_or_else(|| malformed(format!("{} EMPTY is not supported", keyword)))
}

fn line(l: &impl LineStringTrait<T = f64>) -> Vec<Coord> {
    l.coords().map(|c| coord(&c)).collect()
}

fn rings(p: &impl PolygonTrait<T = f64>) -> Vec<Vec<Coord>> {
    p.exterior()
        .map(|r| line(&r))
        .into_iter()
        .chain(p.interiors().map(|r| line(&r)))
        .collect()
}

/// Maps a parsed WKT geometry into the canonical model.
///
/// Empty Point, LineString and Polygon have no canonical form and are
/// rejected; empty Multi* and collections map to empty members.
fn to_geometry(g: &impl GeometryTrait<T = f64>) -> Result<Geometry> {
    Ok(match g.as_type() {
        GeometryType::Point(p) => Geometry::Point(point(p, "POINT")?),
        GeometryType::LineString(l) => {
            let coords = line(l);
            if coords.is_empty() {
                return Err(malformed("LINESTRING EMPTY is not supported"));
            }
            Geometry::LineString(coords)
        }
        GeometryType::Polygon(p) => {
            let polygon = rings(p);
            if polygon.is_empty() {
                return Err(malformed("POLYGON EMPTY is not supported"));
            }
            Geometry::Polygon(polygon)
        }
        GeometryType::MultiPoint(mp) => Geometry::MultiPoint(
            mp.points()
                .map(|p| point(&p, "MULTIPOINT member"))
                .collect::<Result<_>>()?,
        ),
        GeometryType::MultiLineString(ml) => {
            Geometry::MultiLineString(ml.line_strings().map(|l| line(&l)).collect())
        }
        GeometryType::MultiPolygon(mp) => {
            Geometry::MultiPolygon(mp.polygons().map(|p| rings(&p)).collect())
        }
        GeometryType::GeometryCollection(gc) => Geometry::GeometryCollection(
            gc.geometries()
                .map(|member| to_geometry(&member))
                .collect::<Result<_>>()?,
        ),
        GeometryType::Rect(_) | GeometryType::Triangle(_) | GeometryType::Line(_) => {
            return Err(malformed("only the seven simple-feature kinds are supported"))
        }
    })
}

/// Parses WKT (or EWKT) text into a validated geometry.
pub fn parse(text: &str) -> Result<Geometry> {
    let body = strip_srid(text)?;
    check_text(body)?;

    let parsed = Wkt::<f64>::from_str(body.trim()).map_err(|e| malformed(e.to_string()))?;
    let geometry = to_geometry(&parsed)?;

    geometry
        .validate()
        .map_err(|e| malformed(e.to_string()))?;
    Ok(geometry)
}
