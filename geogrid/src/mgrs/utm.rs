//! Universal Transverse Mercator projection on the WGS84 ellipsoid.
//!
//! Closed-form series (Snyder, "Map Projections: A Working Manual", §8).
//! Round trips stay well under a metre, including across the widened
//! Norway/Svalbard zones.

use crate::geometry::Coord;

/// WGS84 semi-major axis in metres
const A: f64 = 6_378_137.0;

/// WGS84 first eccentricity squared
const E2: f64 = 0.006_694_379_990_14;

/// Scale factor on the central meridian
const K0: f64 = 0.9996;

/// Added to every easting so that it stays positive
pub const FALSE_EASTING: f64 = 500_000.0;

/// Added to southern-hemisphere northings
pub const FALSE_NORTHING: f64 = 10_000_000.0;

/// Projected position inside a UTM zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoord {
    pub zone: u8,
    pub north: bool,
    pub easting: f64,
    pub northing: f64,
}

/// Second eccentricity squared.
#[inline]
fn ep2() -> f64 {
    E2 / (1.0 - E2)
}

/// Longitude of a zone's central meridian in degrees.
#[inline]
pub fn central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
}

/// UTM zone for a point, applying the Norway and Svalbard exceptions.
pub fn zone_for(point: Coord) -> u8 {
    let Coord { lon, lat } = point;
    let mut zone = (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;

    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        zone = 32;
    }

    if (72.0..84.0).contains(&lat) && lon >= 0.0 {
        if lon < 9.0 {
            zone = 31;
        } else if lon < 21.0 {
            zone = 33;
        } else if lon < 33.0 {
            zone = 35;
        } else if lon < 42.0 {
            zone = 37;
        }
    }

    zone
}

/// Meridional arc length from the equator to latitude `phi` (radians).
fn meridian_arc(phi: f64) -> f64 {
    let e4 = E2 * E2;
    let e6 = e4 * E2;
    A * ((1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
        - (3.0 * E2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Projects a point into the given zone.
///
/// The hemisphere follows the sign of the latitude. Use [`project`] to
/// force one.
pub fn to_utm(point: Coord, zone: u8) -> UtmCoord {
    project(point, zone, point.lat >= 0.0)
}

/// Projects a point into the given zone and hemisphere.
pub fn project(point: Coord, zone: u8, north: bool) -> UtmCoord {
    let ep2 = ep2();
    let phi = point.lat.to_radians();
    let lambda = point.lon.to_radians();
    let lambda0 = central_meridian(zone).to_radians();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let tan_phi = phi.tan();

    let n = A / (1.0 - E2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = cos_phi * (lambda - lambda0);
    let m = meridian_arc(phi);

    let easting = K0
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
        + FALSE_EASTING;

    let mut northing = K0
        * (m + n
            * tan_phi
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));

    if !north {
        northing += FALSE_NORTHING;
    }

    UtmCoord {
        zone,
        north,
        easting,
        northing,
    }
}

/// Inverse projection back to longitude/latitude.
pub fn from_utm(utm: &UtmCoord) -> Coord {
    let ep2 = ep2();
    let x = utm.easting - FALSE_EASTING;
    let y = if utm.north {
        utm.northing
    } else {
        utm.northing - FALSE_NORTHING
    };

    let e4 = E2 * E2;
    let e6 = e4 * E2;
    let m = y / K0;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

    let e1 = (1.0 - (1.0 - E2).sqrt()) / (1.0 + (1.0 - E2).sqrt());
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let (sin_phi1, cos_phi1) = phi1.sin_cos();
    let tan_phi1 = phi1.tan();
    let c1 = ep2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let denom = 1.0 - E2 * sin_phi1 * sin_phi1;
    let n1 = A / denom.sqrt();
    let r1 = A * (1.0 - E2) / denom.powf(1.5);
    let d = x / (n1 * K0);

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);

    let lon = central_meridian(utm.zone).to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / cos_phi1;

    Coord::new(lon.to_degrees(), lat.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_central_meridians() {
        assert_eq!(central_meridian(1), -177.0);
        assert_eq!(central_meridian(31), 3.0);
        assert_eq!(central_meridian(60), 177.0);
    }

    #[test]
    fn test_zone_for_regular_points() {
        assert_eq!(zone_for(Coord::new(-180.0, 0.0)), 1);
        assert_eq!(zone_for(Coord::new(-74.006, 40.7128)), 18);
        assert_eq!(zone_for(Coord::new(151.2093, -33.8688)), 56);
        assert_eq!(zone_for(Coord::new(180.0, 0.0)), 60);
    }

    #[test]
    fn test_zone_for_norway_exception() {
        // Bergen sits west of 6°E but belongs to the widened zone 32
        assert_eq!(zone_for(Coord::new(5.32, 60.39)), 32);
        assert_eq!(zone_for(Coord::new(2.5, 60.0)), 31);
        assert_eq!(zone_for(Coord::new(5.32, 55.0)), 31);
    }

    #[test]
    fn test_zone_for_svalbard_exception() {
        assert_eq!(zone_for(Coord::new(8.0, 78.0)), 31);
        assert_eq!(zone_for(Coord::new(15.6, 78.2)), 33);
        assert_eq!(zone_for(Coord::new(25.0, 78.0)), 35);
        assert_eq!(zone_for(Coord::new(40.0, 80.0)), 37);
        assert_eq!(zone_for(Coord::new(45.0, 80.0)), 38);
    }

    #[test]
    fn test_central_meridian_projects_to_false_easting() {
        let utm = to_utm(Coord::new(3.0, 45.0), 31);
        assert_abs_diff_eq!(utm.easting, FALSE_EASTING, epsilon = 1e-6);
        assert!(utm.north);
    }

    #[test]
    fn test_equator_is_zero_northing() {
        let north = project(Coord::new(3.0, 0.0), 31, true);
        assert_abs_diff_eq!(north.northing, 0.0, epsilon = 1e-6);
        let south = project(Coord::new(3.0, 0.0), 31, false);
        assert_abs_diff_eq!(south.northing, FALSE_NORTHING, epsilon = 1e-6);
    }

    #[test]
    fn test_known_projection_nyc() {
        let utm = to_utm(Coord::new(-74.006, 40.7128), 18);
        assert_abs_diff_eq!(utm.easting, 583_959.0, epsilon = 1.0);
        assert_abs_diff_eq!(utm.northing, 4_507_350.0, epsilon = 1.0);
    }

    #[test]
    fn test_inverse_restores_point() {
        for (lon, lat) in [(-74.006, 40.7128), (151.2093, -33.8688), (15.6, 78.2), (0.1, 0.1)] {
            let point = Coord::new(lon, lat);
            let zone = zone_for(point);
            let back = from_utm(&to_utm(point, zone));
            assert_abs_diff_eq!(back.lon, lon, epsilon = 1e-7);
            assert_abs_diff_eq!(back.lat, lat, epsilon = 1e-7);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_projection_round_trips(
                lon in -180.0f64..180.0,
                lat in -80.0f64..84.0,
            ) {
                let point = Coord::new(lon, lat);
                let zone = zone_for(point);
                let back = from_utm(&to_utm(point, zone));
                prop_assert!((back.lon - lon).abs() < 1e-5);
                prop_assert!((back.lat - lat).abs() < 1e-5);
            }
        }
    }
}
