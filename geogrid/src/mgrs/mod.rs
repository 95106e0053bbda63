//! Military Grid Reference System codec
//!
//! Converts between MGRS references and WGS84 positions. A reference names
//! a grid zone (UTM zone plus latitude band), a 100 km square and an
//! optional easting/northing offset; decoding yields the cell's bounding box
//! and a representative center point.
//!
//! Row letters repeat every 2,000,000 m of northing, so the square letters
//! alone do not fix the northing. Decoding tries each repetition of the row
//! in turn and keeps the first one whose cell has a point inside the
//! reference's grid zone.
//!
//! # Example
//!
//! ```
//! use geogrid::geometry::Coord;
//! use geogrid::mgrs;
//!
//! let reference = mgrs::encode(Coord::new(-74.0060, 40.7128)).unwrap();
//! assert_eq!(reference.to_string(), "18TWL8395907350");
//!
//! let area = mgrs::decode("18TWL8395907350").unwrap();
//! assert!((area.center.lat - 40.7128).abs() < 1e-4);
//! ```

mod reference;
mod tables;
mod utm;

pub use reference::{cell_size, MgrsReference, MAX_PRECISION};
pub use tables::{band_for_lat, band_range, zone_lon_range, MAX_MGRS_LAT, MIN_MGRS_LAT};
pub use utm::{central_meridian, from_utm, project, to_utm, zone_for, UtmCoord};

use tracing::trace;

use crate::error::{ConvertError, Result};
use crate::geometry::{BoundingBox, Coord, Geometry};
use tables::{column_index, column_letter, row_index, row_letter, ROW_CYCLE, SQUARE_SIZE};
use utm::FALSE_NORTHING;

/// Digits per axis used by [`encode`].
pub const DEFAULT_PRECISION: u8 = MAX_PRECISION;

/// Northern-hemisphere cells never start this close to the false northing.
const NORTH_NORTHING_LIMIT: f64 = 9_500_000.0;

/// Southern-hemisphere cells always reach at least this far north.
const SOUTH_NORTHING_FLOOR: f64 = 1_000_000.0;

/// Seeds per axis when searching a cell for a point inside its grid zone.
const SEARCH_SEEDS_PER_AXIS: usize = 4;

/// Clamp rounds per seed.
const SEARCH_ITERATIONS: usize = 12;

/// Distance kept from grid zone edges while searching, in degrees.
const EDGE_INSET_DEG: f64 = 1e-9;

/// A decoded grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MgrsArea {
    pub reference: MgrsReference,
    /// Cell extent, clipped to the latitude band and grid zone
    pub bounds: BoundingBox,
    /// A point inside both the cell and its clipped bounds
    pub center: Coord,
}

impl MgrsArea {
    /// The cell extent as a closed Polygon.
    pub fn to_polygon(&self) -> Geometry {
        self.bounds.to_polygon()
    }
}

/// Decodes an MGRS reference string.
pub fn decode(input: &str) -> Result<MgrsArea> {
    let reference: MgrsReference = input.parse()?;
    decode_reference(&reference)
}

/// Decodes an already-parsed reference.
pub fn decode_reference(reference: &MgrsReference) -> Result<MgrsArea> {
    reference.validate()?;

    let zone = reference.zone;
    let band = reference.band;
    let north = reference.is_northern();
    let size = reference.cell_size() as f64;

    let mismatch = |reason: &str| ConvertError::MgrsBandMismatch {
        input: reference.to_string(),
        band,
        reason: reason.to_string(),
    };

    // Validated above
    let (band_south, band_north) = band_range(band).ok_or_else(|| mismatch("unknown band"))?;
    let column = column_index(zone, reference.column).ok_or_else(|| mismatch("unknown column"))?;
    let row = row_index(zone, reference.row).ok_or_else(|| mismatch("unknown row"))?;

    let (zone_west, zone_east) = zone_lon_range(zone, band);
    let grid_zone = BoundingBox::new(zone_west, band_south, zone_east, band_north);

    let west = column as f64 * SQUARE_SIZE + reference.easting as f64;
    let base_northing = row as f64 * SQUARE_SIZE + reference.northing as f64;

    let (cycle, cell, bounds, inside) = (0u32..)
        .map(|k| (k, base_northing + k as f64 * ROW_CYCLE))
        .take_while(|&(_, n0)| n0 < FALSE_NORTHING)
        .filter(|&(_, n0)| in_hemisphere(n0, size, north))
        .find_map(|(k, south)| {
            let cell = Cell {
                zone,
                band,
                north,
                west,
                south,
                size,
            };
            let bounds = cell.extent().intersection(&grid_zone)?;
            let inside = cell.find_point(&bounds)?;
            Some((k, cell, bounds, inside))
        })
        .ok_or_else(|| mismatch("no repetition of the square has a point inside the grid zone"))?;

    let midpoint = bounds.center();
    let center = if cell.holds(midpoint) {
        midpoint
    } else {
        inside
    };

    trace!(
        reference = %reference,
        cycle = cycle,
        northing = cell.south,
        "Resolved MGRS northing cycle"
    );

    Ok(MgrsArea {
        reference: reference.clone(),
        bounds,
        center,
    })
}

/// Encodes a point at full (1 m) precision.
pub fn encode(point: Coord) -> Result<MgrsReference> {
    encode_with_precision(point, DEFAULT_PRECISION)
}

/// Encodes a point with `precision` digits per axis (0-5).
///
/// Offsets are truncated, so the returned cell always contains the point.
pub fn encode_with_precision(point: Coord, precision: u8) -> Result<MgrsReference> {
    if !point.is_valid() {
        return Err(ConvertError::InvalidCoordinate {
            lon: point.lon,
            lat: point.lat,
        });
    }
    if precision > MAX_PRECISION {
        return Err(ConvertError::UnsupportedInput(format!(
            "MGRS precision {} exceeds {}",
            precision, MAX_PRECISION
        )));
    }
    let band = band_for_lat(point.lat).ok_or(ConvertError::UnsupportedLatitude(point.lat))?;

    let zone = zone_for(point);
    let utm = to_utm(point, zone);

    let column = ((utm.easting / SQUARE_SIZE).floor() as i64).clamp(1, 8) as usize;
    let row = ((utm.northing / SQUARE_SIZE).floor() as i64).rem_euclid(20) as usize;

    let size = cell_size(precision);
    let (easting, northing) = if precision == 0 {
        (0, 0)
    } else {
        let e = utm.easting.rem_euclid(SQUARE_SIZE) as u32;
        let n = utm.northing.rem_euclid(SQUARE_SIZE) as u32;
        (e / size * size, n / size * size)
    };

    Ok(MgrsReference {
        zone,
        band,
        column: column_letter(zone, column),
        row: row_letter(zone, row),
        easting,
        northing,
        precision,
    })
}

/// Rejects row repetitions that cannot belong to the hemisphere: northern
/// cells near the false northing and southern cells near the south pole.
fn in_hemisphere(south_northing: f64, size: f64, north: bool) -> bool {
    if north {
        south_northing <= NORTH_NORTHING_LIMIT
    } else {
        south_northing + size >= SOUTH_NORTHING_FLOOR
    }
}

/// One repetition of a reference's cell in grid space.
#[derive(Debug, Clone, Copy)]
struct Cell {
    zone: u8,
    band: char,
    north: bool,
    west: f64,
    south: f64,
    size: f64,
}

impl Cell {
    fn at(&self, easting: f64, northing: f64) -> Coord {
        from_utm(&UtmCoord {
            zone: self.zone,
            north: self.north,
            easting,
            northing,
        })
    }

    /// Bounding box of the four projected corners.
    fn extent(&self) -> BoundingBox {
        let (w, s, size) = (self.west, self.south, self.size);
        let sw = self.at(w, s);
        let mut extent = BoundingBox::new(sw.lon, sw.lat, sw.lon, sw.lat);
        for c in [
            self.at(w + size, s),
            self.at(w, s + size),
            self.at(w + size, s + size),
        ] {
            extent.expand(&c);
        }
        extent
    }

    /// True if `point` encodes back into this cell's grid zone and square.
    fn holds(&self, point: Coord) -> bool {
        if !point.is_valid()
            || band_for_lat(point.lat) != Some(self.band)
            || zone_for(point) != self.zone
        {
            return false;
        }
        let utm = project(point, self.zone, self.north);
        (self.west..self.west + self.size).contains(&utm.easting)
            && (self.south..self.south + self.size).contains(&utm.northing)
    }

    /// Searches grid space for a point of the cell that lies inside `bounds`
    /// and the grid zone.
    ///
    /// Constant-northing lines are curved, so the corner extent can overlap
    /// a band the cell never reaches. Each seed alternates between clamping
    /// into `bounds` in degrees and clamping into the cell in metres.
    fn find_point(&self, bounds: &BoundingBox) -> Option<Coord> {
        let margin = (self.size / 4.0).min(1.0);
        let fraction = |i: usize| (i as f64 + 0.5) / SEARCH_SEEDS_PER_AXIS as f64;
        let grid = (0..SEARCH_SEEDS_PER_AXIS)
            .flat_map(|i| (0..SEARCH_SEEDS_PER_AXIS).map(move |j| (fraction(i), fraction(j))));
        let seeds = std::iter::once((0.5, 0.5)).chain(grid);

        for (fx, fy) in seeds {
            let mut easting = self.west + fx * self.size;
            let mut northing = self.south + fy * self.size;
            for _ in 0..SEARCH_ITERATIONS {
                let point = self.at(easting, northing);
                if self.holds(point) && bounds.contains(&point) {
                    return Some(point);
                }
                let pulled = Coord::new(
                    clamp_inside(point.lon, bounds.min_lon, bounds.max_lon),
                    clamp_inside(point.lat, bounds.min_lat, bounds.max_lat),
                );
                let utm = project(pulled, self.zone, self.north);
                easting = utm
                    .easting
                    .clamp(self.west + margin, self.west + self.size - margin);
                northing = utm
                    .northing
                    .clamp(self.south + margin, self.south + self.size - margin);
            }
        }
        None
    }
}

/// Clamps into `[lo, hi]` while keeping clear of both edges. Requires `lo < hi`.
fn clamp_inside(value: f64, lo: f64, hi: f64) -> f64 {
    let inset = ((hi - lo) / 4.0).min(EDGE_INSET_DEG);
    value.clamp(lo + inset, hi - inset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn round_trip_square(reference: &str) {
        let area = decode(reference).unwrap();
        let back = encode_with_precision(area.center, 0).unwrap();
        assert_eq!(back.to_string(), reference, "center {:?}", area.center);
    }

    #[test]
    fn test_encode_known_cities() {
        let nyc = encode(Coord::new(-74.0060, 40.7128)).unwrap();
        assert_eq!(nyc.to_string(), "18TWL8395907350");

        let sydney = encode(Coord::new(151.2093, -33.8688)).unwrap();
        assert_eq!(sydney.to_string(), "56HLH3436850948");

        let london = encode(Coord::new(-0.1278, 51.5074)).unwrap();
        assert_eq!(london.to_string(), "30UXC9931610163");
    }

    #[test]
    fn test_encode_precision_truncates() {
        let point = Coord::new(-74.0060, 40.7128);
        assert_eq!(encode_with_precision(point, 0).unwrap().to_string(), "18TWL");
        assert_eq!(encode_with_precision(point, 1).unwrap().to_string(), "18TWL80");
        assert_eq!(encode_with_precision(point, 3).unwrap().to_string(), "18TWL839073");
    }

    #[test]
    fn test_encode_origin() {
        let r = encode(Coord::new(0.0, 0.0)).unwrap();
        assert_eq!(r.to_string(), "31NAA6602100000");
    }

    #[test]
    fn test_encode_irregular_zones() {
        // Bergen, Norway
        assert_eq!(
            encode(Coord::new(5.32, 60.39)).unwrap().to_string(),
            "32VKN9723000510"
        );
        // Longyearbyen, Svalbard
        assert_eq!(
            encode(Coord::new(15.6, 78.2)).unwrap().to_string(),
            "33XWG1369680760"
        );
    }

    #[test]
    fn test_encode_extreme_latitudes() {
        assert_eq!(
            encode_with_precision(Coord::new(-179.9, -79.9), 1)
                .unwrap()
                .to_string(),
            "01CDM42"
        );
        assert_eq!(
            encode_with_precision(Coord::new(179.9, 83.9), 2)
                .unwrap()
                .to_string(),
            "60XWU3417"
        );
    }

    #[test]
    fn test_encode_rejects_polar_latitudes() {
        let err = encode(Coord::new(0.0, 84.0)).unwrap_err();
        assert_eq!(err, ConvertError::UnsupportedLatitude(84.0));
        let err = encode(Coord::new(0.0, -80.5)).unwrap_err();
        assert_eq!(err, ConvertError::UnsupportedLatitude(-80.5));
    }

    #[test]
    fn test_encode_rejects_invalid_input() {
        let err = encode(Coord::new(f64::NAN, 10.0)).unwrap_err();
        assert_eq!(err.kind(), "InvalidCoordinate");
        let err = encode(Coord::new(190.0, 10.0)).unwrap_err();
        assert_eq!(err.kind(), "InvalidCoordinate");
        let err = encode_with_precision(Coord::new(10.0, 10.0), 6).unwrap_err();
        assert_eq!(err.kind(), "UnsupportedInput");
    }

    #[test]
    fn test_decode_first_cycle() {
        let area = decode("44PLV").unwrap();
        assert_abs_diff_eq!(area.center.lat, 13.1123, epsilon = 1e-3);
        assert_abs_diff_eq!(area.center.lon, 79.6154, epsilon = 1e-3);
        assert!(area.bounds.contains(&area.center));
    }

    #[test]
    fn test_decode_second_cycle_north() {
        // Row F first repeats at 2,500,000 m in band Q
        let area = decode("45QWF").unwrap();
        assert_abs_diff_eq!(area.center.lat, 23.0571, epsilon = 1e-3);
        assert_abs_diff_eq!(area.center.lon, 87.4897, epsilon = 1e-3);
        assert!(area.bounds.min_lat > 22.0);
    }

    #[test]
    fn test_decode_third_cycle_north() {
        let area = decode("33UUU").unwrap();
        assert_abs_diff_eq!(area.center.lat, 52.7768, epsilon = 1e-3);
        assert_abs_diff_eq!(area.center.lon, 12.7685, epsilon = 1e-3);
        assert!(area.bounds.min_lat >= 48.0 && area.bounds.max_lat <= 56.0);
    }

    #[test]
    fn test_decode_cross_cycle_south() {
        // Sydney: row H repeats at 6,200,000 m in band H
        let area = decode("56HLH").unwrap();
        assert_abs_diff_eq!(area.center.lat, -33.8786, epsilon = 1e-3);
        assert_abs_diff_eq!(area.center.lon, 151.3752, epsilon = 1e-3);
        assert!(area.bounds.min_lat >= -40.0 && area.bounds.max_lat <= -32.0);
    }

    #[test]
    fn test_decode_full_precision_restores_point() {
        let area = decode("56HLH3436850948").unwrap();
        assert_abs_diff_eq!(area.center.lat, -33.8688, epsilon = 1e-4);
        assert_abs_diff_eq!(area.center.lon, 151.2093, epsilon = 1e-4);

        let area = decode("18TWL8395907350").unwrap();
        assert!(area.bounds.contains(&Coord::new(-74.0060, 40.7128)));
    }

    #[test]
    fn test_decode_single_digit_zone() {
        let area = decode("4QFJ12345678").unwrap();
        assert_eq!(area.reference.to_string(), "04QFJ12345678");
        assert_abs_diff_eq!(area.center.lat, 21.3095, epsilon = 1e-3);
        assert_abs_diff_eq!(area.center.lon, -157.9168, epsilon = 1e-3);
    }

    #[test]
    fn test_decode_clips_to_band() {
        // 32VKH straddles the 56°N band edge
        let area = decode("32VKH").unwrap();
        assert_abs_diff_eq!(area.bounds.min_lat, 56.0, epsilon = 1e-12);
        assert!(area.bounds.max_lat < 57.0);
    }

    #[test]
    fn test_decode_clips_to_zone() {
        // Square on the equator at the western edge of zone 31
        let area = decode("31NAA").unwrap();
        assert_abs_diff_eq!(area.bounds.min_lon, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(area.bounds.min_lat, 0.0, epsilon = 1e-12);
        assert!(area.bounds.contains(&area.center));
    }

    #[test]
    fn test_decode_irregular_zones() {
        let area = decode("33XVG").unwrap();
        assert!(area.bounds.min_lat >= 72.0);
        assert!(area.bounds.min_lon >= 9.0 && area.bounds.max_lon <= 21.0);

        // 32VNM lies east of the 9°E line inside the widened Norway zone
        let area = decode("32VNM").unwrap();
        assert_abs_diff_eq!(area.center.lon, 9.9081, epsilon = 1e-3);
    }

    #[test]
    fn test_decode_band_mismatch() {
        // Row J never reaches band U in zone 33
        let err = decode("33UUJ").unwrap_err();
        assert_eq!(err.kind(), "MgrsBandMismatch");
    }

    #[test]
    fn test_decode_square_outside_zone() {
        // Column S in zone 33 lies west of 12°E in band U
        let err = decode("33USU").unwrap_err();
        assert_eq!(err.kind(), "MgrsBandMismatch");
        // Square is cut off by the narrowed 31V zone
        assert_eq!(decode("31VEJ").unwrap_err().kind(), "MgrsBandMismatch");
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(decode("99ZZZ").unwrap_err().kind(), "InvalidMgrsFormat");
        assert_eq!(decode("hello").unwrap_err().kind(), "InvalidMgrsFormat");
    }

    #[test]
    fn test_square_round_trips() {
        for reference in ["45QWF", "33UUU", "44PLV", "56HLH", "32VKH", "31NAA", "33XVG", "18TWL"] {
            round_trip_square(reference);
        }
    }

    #[test]
    fn test_squares_beyond_curved_band_edge() {
        // Corner extents overlap the band, the curved cells barely or never do
        for reference in ["01ECJ", "01FBA", "01UBV", "01VCM", "02ELP"] {
            match decode(reference) {
                Ok(area) => {
                    assert!(area.bounds.contains(&area.center), "{reference}");
                    round_trip_square(reference);
                }
                Err(err) => assert_eq!(err.kind(), "MgrsBandMismatch", "{reference}"),
            }
        }
    }

    #[test]
    fn test_every_decodable_square_center_encodes_back() {
        let mut decoded = 0;
        for zone in 1u8..=60 {
            for &band in tables::BAND_LETTERS.iter() {
                let band = band as char;
                if !tables::zone_exists(zone, band) {
                    continue;
                }
                for &column in tables::column_set(zone).iter() {
                    for &row in tables::ROW_LETTERS.iter() {
                        let reference =
                            format!("{:02}{}{}{}", zone, band, column as char, row as char);
                        let area = match decode(&reference) {
                            Ok(area) => area,
                            Err(err) => {
                                assert_eq!(err.kind(), "MgrsBandMismatch", "{reference}");
                                continue;
                            }
                        };
                        assert!(
                            area.bounds.contains(&area.center),
                            "{reference}: {:?} outside {:?}",
                            area.center,
                            area.bounds
                        );
                        assert!(area.bounds.width() > 0.0 && area.bounds.height() > 0.0);
                        let back = encode_with_precision(area.center, 0).unwrap();
                        assert_eq!(back.to_string(), reference, "center {:?}", area.center);
                        decoded += 1;
                    }
                }
            }
        }
        assert!(decoded > 60_000, "only {decoded} squares decoded");
    }

    #[test]
    fn test_area_polygon_is_closed() {
        let polygon = decode("33UUU").unwrap().to_polygon();
        assert!(polygon.validate().is_ok());
        assert_eq!(polygon.num_coords(), 5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_full_precision_cell_contains_point(
                lon in -180.0f64..180.0,
                lat in -80.0f64..84.0,
            ) {
                let point = Coord::new(lon, lat);
                let reference = encode(point).unwrap();
                let area = decode_reference(&reference).unwrap();
                prop_assert!((area.center.lon - lon).abs() < 1e-4);
                prop_assert!((area.center.lat - lat).abs() < 1e-4);
                prop_assert!(area.bounds.min_lon - 1e-5 <= lon && lon <= area.bounds.max_lon + 1e-5);
                prop_assert!(area.bounds.min_lat - 1e-5 <= lat && lat <= area.bounds.max_lat + 1e-5);
            }

            #[test]
            fn prop_square_center_encodes_to_same_square(
                lon in -180.0f64..180.0,
                lat in -80.0f64..84.0,
            ) {
                let reference = encode_with_precision(Coord::new(lon, lat), 0).unwrap();
                let area = decode_reference(&reference).unwrap();
                let again = encode_with_precision(area.center, 0).unwrap();
                prop_assert_eq!(again, reference);
            }
        }
    }
}
