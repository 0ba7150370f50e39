//! Longitude/latitude surface mapping.
//!
//! The terrain variant built on this module treats the flattened map as a
//! Mercator-like parameterization: `lon = x / R`, `lat = 2·atan(exp(y / R)) - π/2`.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;

/// A point on the sphere surface with its orientation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    /// World-space position on the sphere.
    pub position: DVec3,
    /// Outward unit normal.
    pub normal: DVec3,
    /// Unit tangent, following the local east direction.
    pub tangent: DVec3,
}

/// Convert longitude/latitude to a surface point on a sphere of radius `radius`
/// centered at `center`.
///
/// The basis uses `y` toward `lon = 0` on the equator and `z` toward the
/// north pole, matching the inverse mapping in
/// [`lon_lat_from_point_on_sphere`].
#[must_use]
pub fn position_on_sphere(lon: f64, lat: f64, radius: f64, center: DVec3) -> SurfacePoint {
    let cos_lat = lat.cos();

    let ps = DVec3::new(
        radius * cos_lat * lon.sin(),
        radius * cos_lat * lon.cos(),
        radius * lat.sin(),
    );

    let normal = ps.normalize();

    // East direction; degenerate exactly at the poles where the normal is
    // parallel to the z axis.
    let mut tangent = normal.cross(DVec3::Z);
    if tangent.length_squared() < f64::EPSILON {
        tangent = DVec3::X;
    } else {
        tangent = tangent.normalize();
    }

    SurfacePoint {
        position: ps + center,
        normal,
        tangent,
    }
}

/// Map a flattened surface coordinate to the sphere.
///
/// `x` runs along the equator and `y` along the Mercator vertical, both in
/// the same linear units as `radius`.
#[must_use]
pub fn position_on_sphere_from_surface(
    x: f64,
    y: f64,
    radius: f64,
    center: DVec3,
) -> SurfacePoint {
    let lon = x / radius;
    let lat = 2.0 * (y / radius).exp().atan() - FRAC_PI_2;
    position_on_sphere(lon, lat, radius, center)
}

/// Recover longitude/latitude from a point on the sphere surface.
///
/// Inverse of [`position_on_sphere`]; the origin of both angles is shifted
/// by π/2 to match the surface parameterization. Longitude is resolved into
/// the correct half-plane from the sign of the x coordinate.
#[must_use]
pub fn lon_lat_from_point_on_sphere(center: DVec3, radius: f64, point: DVec3) -> (f64, f64) {
    let p = point - center;

    let lat = (-p.z / radius).clamp(-1.0, 1.0).acos() - FRAC_PI_2;

    let lon = if p.x == 0.0 && p.y == 0.0 {
        // Directly on the z axis: longitude is undefined, pick 0.
        0.0
    } else {
        let mut lon = (-p.y / p.x).atan() - FRAC_PI_2;
        if p.x >= 0.0 {
            lon += PI;
        }
        lon
    };

    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;
    const RADIUS: f64 = 6_360_000.0;

    #[test]
    fn test_surface_point_lies_on_sphere() {
        let center = DVec3::new(0.0, -RADIUS, 0.0);
        for ix in -5..=5 {
            for iy in -5..=5 {
                let x = ix as f64 * 100_000.0;
                let y = iy as f64 * 100_000.0;
                let sp = position_on_sphere_from_surface(x, y, RADIUS, center);
                let dist = (sp.position - center).length();
                assert!(
                    (dist - RADIUS).abs() < EPSILON * RADIUS,
                    "surface point off the sphere at ({x}, {y}): {dist}"
                );
            }
        }
    }

    #[test]
    fn test_normal_is_unit_and_radial() {
        let center = DVec3::new(1000.0, 2000.0, 3000.0);
        let sp = position_on_sphere(0.4, -0.3, RADIUS, center);
        assert!((sp.normal.length() - 1.0).abs() < EPSILON);
        let radial = (sp.position - center).normalize();
        assert!((sp.normal - radial).length() < EPSILON);
    }

    #[test]
    fn test_tangent_is_unit_and_orthogonal_to_normal() {
        let sp = position_on_sphere(0.7, 0.2, RADIUS, DVec3::ZERO);
        assert!((sp.tangent.length() - 1.0).abs() < EPSILON);
        assert!(sp.normal.dot(sp.tangent).abs() < EPSILON);
    }

    #[test]
    fn test_tangent_defined_at_pole() {
        let sp = position_on_sphere(0.0, FRAC_PI_2, RADIUS, DVec3::ZERO);
        assert!((sp.tangent.length() - 1.0).abs() < EPSILON);
        assert!(sp.tangent.is_finite());
    }

    #[test]
    fn test_lon_lat_round_trip() {
        let center = DVec3::new(0.0, -RADIUS, 0.0);
        let samples = [
            (0.0, 0.0),
            (0.3, 0.2),
            (-0.3, 0.2),
            (0.8, -0.5),
            (-1.2, 0.9),
            (1.2, -0.9),
        ];
        for (lon, lat) in samples {
            let sp = position_on_sphere(lon, lat, RADIUS, center);
            let (lon2, lat2) = lon_lat_from_point_on_sphere(center, RADIUS, sp.position);
            assert!(
                (lon - lon2).abs() < 1e-9,
                "lon round trip failed: {lon} -> {lon2}"
            );
            assert!(
                (lat - lat2).abs() < 1e-9,
                "lat round trip failed: {lat} -> {lat2}"
            );
        }
    }

    #[test]
    fn test_lon_lat_at_north_pole_is_defined() {
        let (lon, lat) =
            lon_lat_from_point_on_sphere(DVec3::ZERO, RADIUS, DVec3::new(0.0, 0.0, RADIUS));
        assert_eq!(lon, 0.0);
        assert!((lat - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_mercator_vertical_is_monotonic() {
        let center = DVec3::ZERO;
        let mut prev_lat = f64::NEG_INFINITY;
        for iy in -10..=10 {
            let y = iy as f64 * 500_000.0;
            let sp = position_on_sphere_from_surface(0.0, y, RADIUS, center);
            let lat = (sp.position.z / RADIUS).clamp(-1.0, 1.0).asin();
            assert!(lat > prev_lat, "latitude must grow with map y");
            prev_lat = lat;
        }
    }
}
