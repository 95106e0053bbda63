use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use super::common::{ByteOrder, WkbType};
use super::hex;
use crate::error::{ConvertError, Result};
use crate::geometry::{Coord, Geometry, GeometryKind};

/// Deepest GeometryCollection nesting accepted.
const MAX_NESTING: usize = 32;

fn malformed(msg: impl Into<String>) -> ConvertError {
    ConvertError::MalformedWkb(msg.into())
}

/// Parses hex-encoded WKB/EWKB into a validated geometry.
pub fn parse(text: &str) -> Result<Geometry> {
    let bytes = hex::decode(text)?;
    from_bytes(&bytes)
}

/// Parses raw WKB/EWKB bytes into a validated geometry.
pub fn from_bytes(buf: &[u8]) -> Result<Geometry> {
    let mut reader = WkbReader {
        cursor: Cursor::new(buf),
    };
    let geometry = reader.geometry(0)?;

    let consumed = reader.cursor.position() as usize;
    if consumed != buf.len() {
        return Err(malformed(format!(
            "{} trailing bytes after geometry",
            buf.len() - consumed
        )));
    }

    geometry.validate().map_err(|e| malformed(e.to_string()))?;
    Ok(geometry)
}

struct WkbReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl WkbReader<'_> {
    fn truncated(&self) -> ConvertError {
        malformed(format!(
            "unexpected end of input at byte {}",
            self.cursor.position()
        ))
    }

    fn u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| self.truncated())
    }

    fn u32(&mut self, order: ByteOrder) -> Result<u32> {
        let value = match order {
            ByteOrder::LittleEndian => self.cursor.read_u32::<LittleEndian>(),
            ByteOrder::BigEndian => self.cursor.read_u32::<BigEndian>(),
        };
        value.map_err(|_| self.truncated())
    }

    fn f64(&mut self, order: ByteOrder) -> Result<f64> {
        let value = match order {
            ByteOrder::LittleEndian => self.cursor.read_f64::<LittleEndian>(),
            ByteOrder::BigEndian => self.cursor.read_f64::<BigEndian>(),
        };
        value.map_err(|_| self.truncated())
    }

    /// Element count, checked against the bytes left so that a corrupt
    /// count fails fast instead of looping.
    fn count(&mut self, order: ByteOrder, min_element_size: usize) -> Result<usize> {
        let n = self.u32(order)? as usize;
        let remaining = self.cursor.get_ref().len() - self.cursor.position() as usize;
        if n.saturating_mul(min_element_size) > remaining {
            return Err(self.truncated());
        }
        Ok(n)
    }

    /// Byte order flag and type code.
    fn header(&mut self) -> Result<(ByteOrder, WkbType)> {
        let order = ByteOrder::try_from(self.u8()?)?;
        let code = self.u32(order)?;
        let wkb_type = WkbType::from_code(code)
            .ok_or_else(|| malformed(format!("unknown geometry type code {}", code)))?;
        if wkb_type.has_srid {
            // SRID is not carried into the canonical model
            self.u32(order)?;
        }
        Ok((order, wkb_type))
    }

    fn coord(&mut self, order: ByteOrder, wkb_type: &WkbType) -> Result<Coord> {
        let lon = self.f64(order)?;
        let lat = self.f64(order)?;
        for _ in 2..wkb_type.ordinates() {
            self.f64(order)?;
        }
        Ok(Coord::new(lon, lat))
    }

    fn coords(&mut self, order: ByteOrder, wkb_type: &WkbType) -> Result<Vec<Coord>> {
        let n = self.count(order, 8 * wkb_type.ordinates())?;
        (0..n).map(|_| self.coord(order, wkb_type)).collect()
    }

    fn rings(&mut self, order: ByteOrder, wkb_type: &WkbType) -> Result<Vec<Vec<Coord>>> {
        let n = self.count(order, 4)?;
        (0..n).map(|_| self.coords(order, wkb_type)).collect()
    }

    /// A Multi* member: a complete geometry that must be of `expected` kind.
    fn member(&mut self, expected: GeometryKind, depth: usize) -> Result<Geometry> {
        let start = self.cursor.position();
        let member = self.geometry(depth + 1)?;
        if member.kind() != expected {
            return Err(malformed(format!(
                "member at byte {} is a {}, expected {}",
                start,
                member.kind(),
                expected
            )));
        }
        Ok(member)
    }

    fn members<T>(
        &mut self,
        order: ByteOrder,
        expected: GeometryKind,
        depth: usize,
        unwrap: impl Fn(Geometry) -> Option<T>,
    ) -> Result<Vec<T>> {
        let n = self.count(order, 5)?;
        (0..n)
            .map(|_| {
                let member = self.member(expected, depth)?;
                unwrap(member).ok_or_else(|| malformed("member kind changed while reading"))
            })
            .collect()
    }

    fn geometry(&mut self, depth: usize) -> Result<Geometry> {
        if depth > MAX_NESTING {
            return Err(malformed(format!(
                "geometry nesting deeper than {}",
                MAX_NESTING
            )));
        }

        let (order, wkb_type) = self.header()?;

        let geometry = match wkb_type.kind {
            GeometryKind::Point => Geometry::Point(self.coord(order, &wkb_type)?),
            GeometryKind::LineString => Geometry::LineString(self.coords(order, &wkb_type)?),
            GeometryKind::Polygon => Geometry::Polygon(self.rings(order, &wkb_type)?),
            GeometryKind::MultiPoint => Geometry::MultiPoint(self.members(
                order,
                GeometryKind::Point,
                depth,
                |g| match g {
                    Geometry::Point(c) => Some(c),
                    _ => None,
                },
            )?),
            GeometryKind::MultiLineString => Geometry::MultiLineString(self.members(
                order,
                GeometryKind::LineString,
                depth,
                |g| match g {
                    Geometry::LineString(line) => Some(line),
                    _ => None,
                },
            )?),
            GeometryKind::MultiPolygon => Geometry::MultiPolygon(self.members(
                order,
                GeometryKind::Polygon,
                depth,
                |g| match g {
                    Geometry::Polygon(rings) => Some(rings),
                    _ => None,
                },
            )?),
            GeometryKind::GeometryCollection => {
                let n = self.count(order, 5)?;
                let members = (0..n)
                    .map(|_| self.geometry(depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::GeometryCollection(members)
            }
        };

        Ok(geometry)
    }
}
