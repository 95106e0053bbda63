//! Format selection and dispatch
//!
//! Every format decodes into the canonical [`Geometry`] and encodes from it,
//! so any pair of formats can be converted through [`decode`] and
//! [`encode`].
//!
//! # Example
//!
//! ```
//! use geogrid::format::{self, EncodeOptions, Format, Input};
//!
//! let decoded = format::decode(Format::Wkt, &Input::Text("POINT (1 2)".into())).unwrap();
//! let json = format::encode(Format::GeoJson, &decoded.geometry, &EncodeOptions::default()).unwrap();
//! assert!(json.contains("\"Point\""));
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::coord::{self, TileCoord};
use crate::error::{ConvertError, Result};
use crate::geometry::{BoundingBox, Coord, Geometry};
use crate::wkb::ByteOrder;
use crate::{geojson, mgrs, wkb, wkt};

/// Default zoom level for tile encoding
pub const DEFAULT_ZOOM: u8 = 14;

/// Default MGRS digits per axis (100 km square only)
pub const DEFAULT_MGRS_PRECISION: u8 = 0;

/// Supported coordinate/geometry representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Xyz,
    Mgrs,
    Wkt,
    Wkb,
    GeoJson,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Xyz,
        Format::Mgrs,
        Format::Wkt,
        Format::Wkb,
        Format::GeoJson,
    ];

    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Xyz => "xyz",
            Format::Mgrs => "mgrs",
            Format::Wkt => "wkt",
            Format::Wkb => "wkb",
            Format::GeoJson => "geojson",
        }
    }

    /// Formats that carry arbitrary geometry rather than a single cell.
    pub fn is_geometry_format(&self) -> bool {
        matches!(self, Format::Wkt | Format::Wkb | Format::GeoJson)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xyz" | "tile" => Ok(Format::Xyz),
            "mgrs" => Ok(Format::Mgrs),
            "wkt" | "ewkt" => Ok(Format::Wkt),
            "wkb" | "ewkb" | "hex" => Ok(Format::Wkb),
            "geojson" | "json" => Ok(Format::GeoJson),
            other => Err(ConvertError::UnsupportedInput(format!(
                "unknown format '{}' (expected one of: xyz, mgrs, wkt, wkb, geojson)",
                other
            ))),
        }
    }
}

/// Raw input for [`decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// XYZ tile indices
    Tile { x: u32, y: u32, zoom: u8 },
    /// MGRS reference
    Mgrs(String),
    /// WKT, WKB hex or GeoJSON text
    Text(String),
}

impl Input {
    /// Builds the input variant a format expects from user text.
    ///
    /// XYZ text is a `z/x/y` path; MGRS text is the reference itself.
    pub fn from_text(format: Format, text: &str) -> Result<Self> {
        match format {
            Format::Xyz => {
                let tile: TileCoord = text.parse()?;
                Ok(Input::Tile {
                    x: tile.x,
                    y: tile.y,
                    zoom: tile.zoom,
                })
            }
            Format::Mgrs => Ok(Input::Mgrs(text.trim().to_string())),
            Format::Wkt | Format::Wkb | Format::GeoJson => Ok(Input::Text(text.to_string())),
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Input::Tile { .. } => "tile indices",
            Input::Mgrs(_) => "an MGRS reference",
            Input::Text(_) => "text",
        }
    }
}

/// Result of decoding any format.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub geometry: Geometry,
    /// Extent of the geometry; `None` only for empty collections
    pub bbox: Option<BoundingBox>,
    /// Representative point: the cell center for tiles and MGRS, the
    /// bounding-box center otherwise
    pub center: Option<Coord>,
}

impl Decoded {
    fn from_geometry(geometry: Geometry) -> Self {
        let bbox = geometry.bounding_box();
        Self {
            center: bbox.map(|b| b.center()),
            bbox,
            geometry,
        }
    }
}

/// Options for [`encode`]; each applies to one output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Zoom level for XYZ output
    pub zoom: u8,
    /// Digits per axis for MGRS output (0-5)
    pub precision: u8,
    /// Byte order for WKB output
    pub byte_order: ByteOrder,
    /// Indented GeoJSON output
    pub pretty: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            precision: DEFAULT_MGRS_PRECISION,
            byte_order: ByteOrder::LittleEndian,
            pretty: false,
        }
    }
}

/// Decodes `input` as `format`.
///
/// Tiles and MGRS references decode to the Polygon of their cell. A format
/// paired with the wrong input variant fails with
/// [`ConvertError::UnsupportedInput`].
pub fn decode(format: Format, input: &Input) -> Result<Decoded> {
    let decoded = match (format, input) {
        (Format::Xyz, Input::Tile { x, y, zoom }) => {
            let tile = TileCoord::new(*x, *y, *zoom)?;
            let bbox = tile.bounds();
            Decoded {
                geometry: tile.to_polygon(),
                bbox: Some(bbox),
                center: Some(tile.center()),
            }
        }
        (Format::Mgrs, Input::Mgrs(reference)) => {
            let area = mgrs::decode(reference)?;
            Decoded {
                geometry: area.to_polygon(),
                bbox: Some(area.bounds),
                center: Some(area.center),
            }
        }
        (Format::Wkt, Input::Text(text)) => Decoded::from_geometry(wkt::parse(text)?),
        (Format::Wkb, Input::Text(text)) => Decoded::from_geometry(wkb::parse(text)?),
        (Format::GeoJson, Input::Text(text)) => Decoded::from_geometry(geojson::parse(text)?),
        (format, input) => {
            return Err(ConvertError::UnsupportedInput(format!(
                "{} cannot be decoded from {}",
                format,
                input.variant_name()
            )))
        }
    };

    debug!(
        format = %format,
        kind = %decoded.geometry.kind(),
        coords = decoded.geometry.num_coords(),
        "Decoded input"
    );
    Ok(decoded)
}

/// Encodes a geometry as `format`.
///
/// XYZ and MGRS describe a single cell, so they encode the center of the
/// geometry's bounding box.
pub fn encode(format: Format, geometry: &Geometry, options: &EncodeOptions) -> Result<String> {
    let output = match format {
        Format::Xyz => {
            let tile = coord::to_tile_coords(representative_point(geometry)?, options.zoom)?;
            tile.to_string()
        }
        Format::Mgrs => {
            let reference =
                mgrs::encode_with_precision(representative_point(geometry)?, options.precision)?;
            reference.to_string()
        }
        Format::Wkt => wkt::serialize(geometry),
        Format::Wkb => wkb::serialize_with(geometry, options.byte_order),
        Format::GeoJson if options.pretty => geojson::serialize_pretty(geometry),
        Format::GeoJson => geojson::serialize(geometry),
    };
    Ok(output)
}

/// Decodes `input` as `from` and re-encodes it as `to`.
pub fn convert(from: Format, input: &Input, to: Format, options: &EncodeOptions) -> Result<String> {
    let decoded = decode(from, input)?;
    match (to, decoded.center) {
        // Keep the cell's own center rather than the center of its bounding box
        (Format::Xyz | Format::Mgrs, Some(center)) => {
            encode(to, &Geometry::Point(center), options)
        }
        _ => encode(to, &decoded.geometry, options),
    }
}

fn representative_point(geometry: &Geometry) -> Result<Coord> {
    match geometry {
        Geometry::Point(c) => Ok(*c),
        _ => geometry.bounding_box().map(|b| b.center()).ok_or_else(|| {
            ConvertError::UnsupportedInput(format!(
                "empty {} has no position to encode",
                geometry.kind()
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    #[test]
    fn test_format_names() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>().unwrap(), format);
        }
        assert_eq!("GeoJSON".parse::<Format>().unwrap(), Format::GeoJson);
        assert_eq!("tile".parse::<Format>().unwrap(), Format::Xyz);
        assert_eq!("kml".parse::<Format>().unwrap_err().kind(), "UnsupportedInput");
    }

    #[test]
    fn test_decode_tile_to_polygon() {
        let decoded = decode(Format::Xyz, &Input::Tile { x: 0, y: 0, zoom: 0 }).unwrap();
        let bbox = decoded.bbox.unwrap();
        assert_eq!(bbox.min_lon, -180.0);
        assert_eq!(bbox.max_lon, 180.0);
        assert!((bbox.max_lat - 85.05112877980659).abs() < 1e-9);
        assert_eq!(decoded.geometry.num_coords(), 5);
        assert!(decoded.geometry.validate().is_ok());
    }

    #[test]
    fn test_decode_mgrs_to_polygon() {
        let decoded = decode(Format::Mgrs, &Input::Mgrs("33UUU".into())).unwrap();
        let center = decoded.center.unwrap();
        assert!((center.lat - 52.7768).abs() < 1e-3);
        assert!(decoded.bbox.unwrap().contains(&center));
    }

    #[test]
    fn test_decode_text_formats() {
        let d = decode(Format::Wkt, &text("LINESTRING (0 0, 10 10)")).unwrap();
        assert_eq!(d.center, Some(Coord::new(5.0, 5.0)));

        let d = decode(Format::Wkb, &text("0101000000000000000000F03F0000000000000040")).unwrap();
        assert_eq!(d.geometry, Geometry::Point(Coord::new(1.0, 2.0)));

        let d = decode(
            Format::GeoJson,
            &text(r#"{"type":"MultiPoint","coordinates":[]}"#),
        )
        .unwrap();
        assert_eq!(d.bbox, None);
        assert_eq!(d.center, None);
    }

    #[test]
    fn test_decode_input_mismatch() {
        let cases = [
            (Format::Xyz, text("POINT (1 2)")),
            (Format::Mgrs, Input::Tile { x: 0, y: 0, zoom: 0 }),
            (Format::Wkt, Input::Mgrs("33UUU".into())),
            (Format::GeoJson, Input::Tile { x: 0, y: 0, zoom: 0 }),
        ];
        for (format, input) in cases {
            let err = decode(format, &input).unwrap_err();
            assert_eq!(err.kind(), "UnsupportedInput", "{format}");
        }
    }

    #[test]
    fn test_decode_propagates_codec_errors() {
        let err = decode(Format::Xyz, &Input::Tile { x: 5, y: 5, zoom: 1 }).unwrap_err();
        assert_eq!(err.kind(), "TileIndexOutOfRange");
        let err = decode(Format::Mgrs, &Input::Mgrs("99ZZZ".into())).unwrap_err();
        assert_eq!(err.kind(), "InvalidMgrsFormat");
        let err = decode(Format::Wkt, &text("POINT (")).unwrap_err();
        assert_eq!(err.kind(), "MalformedWkt");
    }

    #[test]
    fn test_input_from_text() {
        assert_eq!(
            Input::from_text(Format::Xyz, "16/19295/24640").unwrap(),
            Input::Tile {
                x: 19295,
                y: 24640,
                zoom: 16
            }
        );
        assert_eq!(
            Input::from_text(Format::Mgrs, " 33UUU\n").unwrap(),
            Input::Mgrs("33UUU".into())
        );
        assert!(Input::from_text(Format::Xyz, "16/19295").is_err());
    }

    #[test]
    fn test_encode_point_everywhere() {
        let p = Geometry::Point(Coord::new(-74.0060, 40.7128));
        let options = EncodeOptions {
            zoom: 16,
            precision: 5,
            ..EncodeOptions::default()
        };
        assert_eq!(encode(Format::Xyz, &p, &options).unwrap(), "16/19295/24640");
        assert_eq!(encode(Format::Mgrs, &p, &options).unwrap(), "18TWL8395907350");
        assert_eq!(encode(Format::Wkt, &p, &options).unwrap(), "POINT (-74.006 40.7128)");
        assert!(encode(Format::GeoJson, &p, &options).unwrap().contains("Point"));
    }

    #[test]
    fn test_encode_respects_options() {
        let p = Geometry::Point(Coord::new(1.0, 2.0));
        let big = EncodeOptions {
            byte_order: ByteOrder::BigEndian,
            ..EncodeOptions::default()
        };
        assert_eq!(
            encode(Format::Wkb, &p, &big).unwrap(),
            "00000000013FF00000000000004000000000000000"
        );
        let pretty = EncodeOptions {
            pretty: true,
            ..EncodeOptions::default()
        };
        assert!(encode(Format::GeoJson, &p, &pretty).unwrap().contains('\n'));
    }

    #[test]
    fn test_encode_empty_geometry_as_cell_fails() {
        let empty = Geometry::GeometryCollection(vec![]);
        let err = encode(Format::Mgrs, &empty, &EncodeOptions::default()).unwrap_err();
        assert_eq!(err.kind(), "UnsupportedInput");
        assert_eq!(
            encode(Format::Wkt, &empty, &EncodeOptions::default()).unwrap(),
            "GEOMETRYCOLLECTION EMPTY"
        );
    }

    #[test]
    fn test_convert_tile_to_mgrs_and_back() {
        let options = EncodeOptions {
            zoom: 10,
            ..EncodeOptions::default()
        };
        let reference = convert(
            Format::Xyz,
            &Input::Tile {
                x: 301,
                y: 384,
                zoom: 10,
            },
            Format::Mgrs,
            &options,
        )
        .unwrap();
        assert_eq!(reference.len(), 5);

        let tile = convert(Format::Mgrs, &Input::Mgrs(reference), Format::Xyz, &options).unwrap();
        assert!(tile.starts_with("10/"));
    }

    #[test]
    fn test_convert_wkt_to_geojson() {
        let json = convert(
            Format::Wkt,
            &text("POLYGON ((0 0, 1 0, 1 1, 0 0))"),
            Format::GeoJson,
            &EncodeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            crate::geojson::parse(&json).unwrap(),
            crate::wkt::parse("POLYGON ((0 0, 1 0, 1 1, 0 0))").unwrap()
        );
    }
}
