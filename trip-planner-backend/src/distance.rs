//! Great-circle distance between two points on the globe.

use trip_planner_shared::models::GeoPoint;

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers.
///
/// Uses the `atan2` form so antipodal points stay numerically stable. Symmetric in its arguments
/// and exactly zero when both points are equal.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod distance_tests {
    use super::{haversine_km, EARTH_RADIUS_KM};
    use trip_planner_shared::models::GeoPoint;

    const PARIS: GeoPoint = GeoPoint {
        latitude: 48.8566,
        longitude: 2.3522,
    };
    const LONDON: GeoPoint = GeoPoint {
        latitude: 51.5074,
        longitude: -0.1278,
    };

    #[test]
    fn test_paris_london_known_value() {
        let d = haversine_km(PARIS, LONDON);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_symmetric() {
        let points = [
            PARIS,
            LONDON,
            GeoPoint::new(-33.8688, 151.2093),
            GeoPoint::new(40.7128, -74.0060),
            GeoPoint::new(0.0, 179.9),
            GeoPoint::new(0.0, -179.9),
        ];

        for a in points {
            for b in points {
                let ab = haversine_km(a, b);
                let ba = haversine_km(b, a);
                assert!((ab - ba).abs() < 1e-9, "{a:?} {b:?}: {ab} vs {ba}");
            }
        }
    }

    #[test]
    fn test_zero_for_same_point() {
        assert_eq!(haversine_km(PARIS, PARIS), 0.0);
        assert_eq!(haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_non_negative_and_bounded() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        let d = haversine_km(GeoPoint::new(10.0, 20.0), GeoPoint::new(-10.0, -160.0));
        assert!(d >= 0.0);
        assert!(d <= half_circumference + 1e-6);
    }

    #[test]
    fn test_antipodal_points() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - half_circumference).abs() < 1e-6, "got {d}");

        let d = haversine_km(GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0));
        assert!((d - half_circumference).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn test_one_degree_of_longitude_on_equator() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        let expected = EARTH_RADIUS_KM * 1f64.to_radians();
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn test_repeat_calls_are_bit_identical() {
        let first = haversine_km(PARIS, LONDON);
        for _ in 0..10 {
            assert_eq!(haversine_km(PARIS, LONDON).to_bits(), first.to_bits());
        }
    }
}
