//! Spherical Web Mercator (EPSG:3857), the projection of the map tiles.

/// Sphere radius used by Web Mercator, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitudes beyond this do not fit the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Project longitude/latitude in degrees to (easting, northing) in meters.
///
/// Returns `None` for non-finite input or coordinates outside the valid range.
pub fn to_web_mercator(lon: f64, lat: f64) -> Option<(f64, f64)> {
    if !lon.is_finite() || !lat.is_finite() || lon.abs() > 180.0 || lat.abs() > 90.0 {
        return None;
    }
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let easting = EARTH_RADIUS_M * lon.to_radians();
    let northing =
        EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    Some((easting, northing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let (e, n) = to_web_mercator(0.0, 0.0).unwrap();
        assert!(e.abs() < 1e-6);
        assert!(n.abs() < 1e-6);
    }

    #[test]
    fn test_antimeridian_easting() {
        let (e, _) = to_web_mercator(180.0, 0.0).unwrap();
        assert!((e - 20_037_508.342_789_244).abs() < 1e-3);
    }

    #[test]
    fn test_max_latitude_is_square() {
        let (_, n) = to_web_mercator(0.0, 90.0).unwrap();
        assert!((n - 20_037_508.342_789_244).abs() < 1.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(to_web_mercator(181.0, 0.0).is_none());
        assert!(to_web_mercator(0.0, f64::NAN).is_none());
    }
}
