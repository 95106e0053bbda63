//! Canonical geometry model
//!
//! Every codec decodes into [`Geometry`] and encodes from it. Positions are
//! WGS84 longitude/latitude pairs; no codec ever reprojects.

mod bbox;
mod types;

pub use bbox::BoundingBox;
pub use types::{
    Coord, Geometry, GeometryError, GeometryKind, MAX_LAT, MAX_LON, MIN_LAT, MIN_LINE_POINTS,
    MIN_LON, MIN_RING_POINTS,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coord> {
        vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(0.0, 1.0),
            Coord::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Geometry::Point(Coord::new(1.0, 2.0)).kind(), GeometryKind::Point);
        assert_eq!(
            Geometry::MultiPolygon(vec![vec![square()]]).kind(),
            GeometryKind::MultiPolygon
        );
        assert_eq!(
            Geometry::GeometryCollection(vec![]).kind(),
            GeometryKind::GeometryCollection
        );
    }

    #[test]
    fn test_kind_lookup_by_keyword_and_code() {
        assert_eq!(
            GeometryKind::from_wkt_keyword("multilinestring"),
            Some(GeometryKind::MultiLineString)
        );
        assert_eq!(GeometryKind::from_wkt_keyword("CIRCLE"), None);
        assert_eq!(GeometryKind::from_wkb_code(3), Some(GeometryKind::Polygon));
        assert_eq!(GeometryKind::from_wkb_code(8), None);
        assert_eq!(
            GeometryKind::from_geojson_name("MultiPoint"),
            Some(GeometryKind::MultiPoint)
        );
        // GeoJSON type names are case-sensitive
        assert_eq!(GeometryKind::from_geojson_name("multipoint"), None);
    }

    #[test]
    fn test_valid_polygon() {
        assert!(Geometry::Polygon(vec![square()]).validate().is_ok());
    }

    #[test]
    fn test_open_ring_rejected() {
        let mut ring = square();
        ring.pop();
        ring.push(Coord::new(0.0, 0.5));
        assert_eq!(
            Geometry::Polygon(vec![ring]).validate(),
            Err(GeometryError::RingNotClosed)
        );
    }

    #[test]
    fn test_short_ring_rejected() {
        let ring = vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(0.0, 0.0),
        ];
        assert_eq!(
            Geometry::Polygon(vec![ring]).validate(),
            Err(GeometryError::TooFewRingPoints(3))
        );
    }

    #[test]
    fn test_polygon_without_rings_rejected() {
        assert_eq!(
            Geometry::Polygon(vec![]).validate(),
            Err(GeometryError::EmptyPolygon)
        );
    }

    #[test]
    fn test_single_point_linestring_rejected() {
        let line = Geometry::LineString(vec![Coord::new(0.0, 0.0)]);
        assert_eq!(line.validate(), Err(GeometryError::TooFewLinePoints(1)));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        assert_eq!(
            Geometry::Point(Coord::new(181.0, 0.0)).validate(),
            Err(GeometryError::LongitudeOutOfRange(181.0))
        );
        assert_eq!(
            Geometry::Point(Coord::new(0.0, -90.5)).validate(),
            Err(GeometryError::LatitudeOutOfRange(-90.5))
        );
        assert_eq!(
            Geometry::Point(Coord::new(f64::NAN, 0.0)).validate(),
            Err(GeometryError::NonFiniteCoordinate)
        );
    }

    #[test]
    fn test_collection_validates_members() {
        let gc = Geometry::GeometryCollection(vec![
            Geometry::Point(Coord::new(0.0, 0.0)),
            Geometry::LineString(vec![Coord::new(0.0, 0.0)]),
        ]);
        assert!(gc.validate().is_err());
    }

    #[test]
    fn test_coords_iterates_nested_positions() {
        let mp = Geometry::MultiPolygon(vec![vec![square()], vec![square(), square()]]);
        assert_eq!(mp.num_coords(), 15);

        let gc = Geometry::GeometryCollection(vec![
            Geometry::Point(Coord::new(5.0, 5.0)),
            Geometry::Polygon(vec![square()]),
        ]);
        assert_eq!(gc.num_coords(), 6);
        assert!(!gc.is_empty());
        assert!(Geometry::MultiPoint(vec![]).is_empty());
    }

    #[test]
    fn test_bounding_box_of_geometry() {
        let line = Geometry::LineString(vec![Coord::new(-10.0, 5.0), Coord::new(20.0, -3.0)]);
        let bbox = line.bounding_box().unwrap();
        assert_eq!(bbox.to_array(), [-10.0, -3.0, 20.0, 5.0]);
        assert_eq!(bbox.center(), Coord::new(5.0, 1.0));
        assert!(Geometry::GeometryCollection(vec![]).bounding_box().is_none());
    }

    #[test]
    fn test_bbox_scale_adds_margin_and_clamps() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).scale(1.1);
        assert!((bbox.min_lon - -0.5).abs() < 1e-12);
        assert!((bbox.max_lat - 10.5).abs() < 1e-12);

        let world = BoundingBox::new(-180.0, -90.0, 180.0, 90.0).scale(1.1);
        assert_eq!(world.to_array(), [-180.0, -90.0, 180.0, 90.0]);
    }

    #[test]
    fn test_bbox_intersection() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(
            a.intersection(&b),
            Some(BoundingBox::new(5.0, 5.0, 10.0, 10.0))
        );
        let c = BoundingBox::new(11.0, 0.0, 12.0, 1.0);
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_bbox_touching_edges_do_not_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let east = BoundingBox::new(10.0, 2.0, 12.0, 4.0);
        assert_eq!(a.intersection(&east), None);
        let north = BoundingBox::new(2.0, 10.0, 4.0, 12.0);
        assert_eq!(a.intersection(&north), None);
        let corner = BoundingBox::new(10.0, 10.0, 11.0, 11.0);
        assert_eq!(a.intersection(&corner), None);
        let flat = BoundingBox::new(2.0, 5.0, 4.0, 5.0);
        assert_eq!(a.intersection(&flat), None);
    }

    #[test]
    fn test_bbox_polygon_is_valid_closed_ring() {
        let polygon = BoundingBox::new(1.0, 2.0, 3.0, 4.0).to_polygon();
        assert!(polygon.validate().is_ok());
        assert_eq!(polygon.num_coords(), 5);
    }

    #[test]
    fn test_approx_eq() {
        let a = Geometry::LineString(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)]);
        let b = Geometry::LineString(vec![Coord::new(0.0, 1e-12), Coord::new(1.0, 1.0)]);
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&b, 1e-13));
        assert!(!a.approx_eq(&Geometry::MultiPoint(vec![]), 1.0));
    }
}
