use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};

use super::common::ByteOrder;
use super::hex;
use crate::geometry::{Coord, Geometry, GeometryKind};

/// Serializes a geometry as little-endian WKB hex.
pub fn serialize(geometry: &Geometry) -> String {
    serialize_with(geometry, ByteOrder::LittleEndian)
}

/// Serializes a geometry as WKB hex in the given byte order.
pub fn serialize_with(geometry: &Geometry, order: ByteOrder) -> String {
    hex::encode(&to_bytes(geometry, order))
}

/// Serializes a geometry as raw 2D OGC WKB.
pub fn to_bytes(geometry: &Geometry, order: ByteOrder) -> Vec<u8> {
    let mut out = Vec::with_capacity(wkb_size(geometry));
    match order {
        ByteOrder::LittleEndian => write_geometry::<LittleEndian>(&mut out, geometry, order),
        ByteOrder::BigEndian => write_geometry::<BigEndian>(&mut out, geometry, order),
    }
    out
}

/// Encoded length in bytes.
pub fn wkb_size(geometry: &Geometry) -> usize {
    const HEADER: usize = 1 + 4;
    const COUNT: usize = 4;
    const COORD: usize = 2 * 8;

    let rings_size = |rings: &[Vec<Coord>]| -> usize {
        COUNT + rings.iter().map(|r| COUNT + r.len() * COORD).sum::<usize>()
    };

    match geometry {
        Geometry::Point(_) => HEADER + COORD,
        Geometry::LineString(coords) => HEADER + COUNT + coords.len() * COORD,
        Geometry::Polygon(rings) => HEADER + rings_size(rings),
        Geometry::MultiPoint(points) => HEADER + COUNT + points.len() * (HEADER + COORD),
        Geometry::MultiLineString(lines) => {
            HEADER
                + COUNT
                + lines
                    .iter()
                    .map(|l| HEADER + COUNT + l.len() * COORD)
                    .sum::<usize>()
        }
        Geometry::MultiPolygon(polygons) => {
            HEADER
                + COUNT
                + polygons
                    .iter()
                    .map(|p| HEADER + rings_size(p))
                    .sum::<usize>()
        }
        Geometry::GeometryCollection(members) => {
            HEADER + COUNT + members.iter().map(wkb_size).sum::<usize>()
        }
    }
}

fn put_u32<E: Endian>(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; 4];
    E::write_u32(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn put_f64<E: Endian>(out: &mut Vec<u8>, value: f64) {
    let mut buf = [0u8; 8];
    E::write_f64(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn put_count<E: Endian>(out: &mut Vec<u8>, len: usize) {
    // Counts are u32 on the wire
    put_u32::<E>(out, len as u32);
}

fn put_header<E: Endian>(out: &mut Vec<u8>, order: ByteOrder, code: u32) {
    out.push(order.into());
    put_u32::<E>(out, code);
}

fn put_coord<E: Endian>(out: &mut Vec<u8>, c: &Coord) {
    put_f64::<E>(out, c.lon);
    put_f64::<E>(out, c.lat);
}

fn put_coords<E: Endian>(out: &mut Vec<u8>, coords: &[Coord]) {
    put_count::<E>(out, coords.len());
    for c in coords {
        put_coord::<E>(out, c);
    }
}

fn put_rings<E: Endian>(out: &mut Vec<u8>, rings: &[Vec<Coord>]) {
    put_count::<E>(out, rings.len());
    for ring in rings {
        put_coords::<E>(out, ring);
    }
}

fn write_geometry<E: Endian>(out: &mut Vec<u8>, geometry: &Geometry, order: ByteOrder) {
    let kind = geometry.kind();
    put_header::<E>(out, order, kind.wkb_code());

    match geometry {
        Geometry::Point(c) => put_coord::<E>(out, c),
        Geometry::LineString(coords) => put_coords::<E>(out, coords),
        Geometry::Polygon(rings) => put_rings::<E>(out, rings),
        Geometry::MultiPoint(points) => {
            put_count::<E>(out, points.len());
            for p in points {
                write_geometry::<E>(out, &Geometry::Point(*p), order);
            }
        }
        Geometry::MultiLineString(lines) => {
            put_count::<E>(out, lines.len());
            for line in lines {
                put_header::<E>(out, order, GeometryKind::LineString.wkb_code());
                put_coords::<E>(out, line);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            put_count::<E>(out, polygons.len());
            for rings in polygons {
                put_header::<E>(out, order, GeometryKind::Polygon.wkb_code());
                put_rings::<E>(out, rings);
            }
        }
        Geometry::GeometryCollection(members) => {
            put_count::<E>(out, members.len());
            for member in members {
                write_geometry::<E>(out, member, order);
            }
        }
    }
}
