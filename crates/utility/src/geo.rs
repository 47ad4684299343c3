pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometers, on a sphere of Earth's mean radius.
///
/// Uses the spherical law of cosines with the cosine term clamped to
/// [-1.0, 1.0]: rounding can push it just past 1 for coincident points,
/// where `acos` has no value.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);
    let delta_lon_rad = to_radians(longitude_2) - to_radians(longitude_1);

    let cosine = lat1_rad.cos() * lat2_rad.cos() * delta_lon_rad.cos()
        + lat1_rad.sin() * lat2_rad.sin();

    EARTH_RADIUS_KM * cosine.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_have_zero_distance() {
        let distance = haversine_distance(19.4326077, -99.133208, 19.4326077, -99.133208);

        assert!(distance.is_finite());
        assert!(distance.abs() < 1e-3);
    }

    #[test]
    fn one_degree_of_longitude_on_the_equator() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 1.0);

        // One degree of arc on a 6371 km sphere.
        assert!((distance - 111.195).abs() < 0.01);
    }

    #[test]
    fn distance_across_mexico_city_center() {
        let distance = haversine_distance(19.4326, -99.1332, 19.5, -99.2);

        assert!(distance > 10.0);
        assert!(distance < 10.5);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_distance(19.4326, -99.1332, 19.3556767, -99.1626267);
        let back = haversine_distance(19.3556767, -99.1626267, 19.4326, -99.1332);

        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn antipodal_points_stay_in_acos_domain() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);

        assert!(distance.is_finite());
        assert!((distance - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }
}
