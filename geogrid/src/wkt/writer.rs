//! WKT serialization.

use std::fmt::Write;

use crate::geometry::{Coord, Geometry};

/// Serializes a geometry as canonical WKT, e.g. `POLYGON ((0 0, 1 0, 1 1, 0 0))`.
///
/// Ordinates use the shortest representation that parses back to the same
/// `f64`.
pub fn serialize(geometry: &Geometry) -> String {
    let mut out = String::new();
    write_geometry(&mut out, geometry);
    out
}

fn write_geometry(out: &mut String, geometry: &Geometry) {
    out.push_str(geometry.kind().wkt_keyword());
    if has_no_parts(geometry) {
        out.push_str(" EMPTY");
        return;
    }
    out.push(' ');

    match geometry {
        Geometry::Point(c) => {
            out.push('(');
            write_coord(out, c);
            out.push(')');
        }
        Geometry::LineString(coords) => write_coords(out, coords),
        Geometry::Polygon(rings) => write_rings(out, rings),
        Geometry::MultiPoint(points) => {
            write_list(out, points, |out, c| {
                out.push('(');
                write_coord(out, c);
                out.push(')');
            });
        }
        Geometry::MultiLineString(lines) => write_list(out, lines, |out, l| write_coords(out, l)),
        Geometry::MultiPolygon(polygons) => {
            write_list(out, polygons, |out, p| write_rings(out, p))
        }
        Geometry::GeometryCollection(members) => write_list(out, members, write_geometry),
    }
}

/// True when the outermost list is empty; nested empties are written as-is.
fn has_no_parts(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Point(_) => false,
        Geometry::LineString(coords) | Geometry::MultiPoint(coords) => coords.is_empty(),
        Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => rings.is_empty(),
        Geometry::MultiPolygon(polygons) => polygons.is_empty(),
        Geometry::GeometryCollection(members) => members.is_empty(),
    }
}

fn write_list<T>(out: &mut String, items: &[T], mut item: impl FnMut(&mut String, &T)) {
    out.push('(');
    for (i, value) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item(out, value);
    }
    out.push(')');
}

fn write_coords(out: &mut String, coords: &[Coord]) {
    write_list(out, coords, write_coord);
}

fn write_rings(out: &mut String, rings: &[Vec<Coord>]) {
    write_list(out, rings, |out, r| write_coords(out, r));
}

fn write_coord(out: &mut String, c: &Coord) {
    // Writing to a String never fails
    let _ = write!(out, "{} {}", c.lon, c.lat);
}
