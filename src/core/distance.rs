/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two possibly-unknown positions
///
/// A missing coordinate on either side means the distance is unknown, which
/// is `None` rather than zero: the ranking step must not mistake "we don't
/// know where this owner is" for "this owner is right here".
#[inline]
pub fn optional_distance(
    from: Option<(f64, f64)>,
    to: Option<(f64, f64)>,
) -> Option<f64> {
    let (lat1, lon1) = from?;
    let (lat2, lon2) = to?;
    Some(haversine_distance(lat1, lon1, lat2, lon2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_identical_points() {
        let d = haversine_distance(52.52, 13.405, 52.52, 13.405);
        assert!(d.abs() < 1e-9, "Identical points should be 0 km, got {}", d);
    }

    #[test]
    fn test_haversine_london_paris() {
        // Distance from London to Paris (approximately 344 km)
        let distance = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_haversine_antipodal() {
        // Antipodal points are half the circumference apart, ~20015 km
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!((distance - std::f64::consts::PI * 6371.0).abs() < 1.0);
    }

    #[test]
    fn test_optional_distance_missing_side() {
        assert_eq!(optional_distance(None, Some((1.0, 2.0))), None);
        assert_eq!(optional_distance(Some((1.0, 2.0)), None), None);
        assert_eq!(optional_distance(None, None), None);

        let d = optional_distance(Some((51.5074, -0.1278)), Some((48.8566, 2.3522)));
        assert!(d.is_some());
    }
}
