//! Closed-form ray/sphere intersection.

use glam::DVec3;

/// A successful ray/sphere intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Intersection point in world space.
    pub point: DVec3,
    /// Distance from the ray origin to the intersection.
    pub distance: f64,
    /// Outward unit normal of the sphere at the intersection.
    pub normal: DVec3,
}

/// Intersect the ray `origin + t * direction` with a sphere.
///
/// `direction` does not need to be normalized; near-zero directions return
/// `None` instead of producing NaNs downstream. When the origin is inside
/// the sphere the exit point (the larger root) is returned, which is what
/// lets the LOD driver cast from the viewer through the planet center.
/// Returns `None` when the ray misses or the sphere lies entirely behind
/// the origin.
#[must_use]
pub fn intersect_ray_sphere(
    origin: DVec3,
    direction: DVec3,
    center: DVec3,
    radius: f64,
) -> Option<RayHit> {
    let len_sq = direction.length_squared();
    if len_sq < f64::EPSILON {
        return None;
    }
    let dir = direction / len_sq.sqrt();

    let m = origin - center;
    let b = m.dot(dir);
    let c = m.length_squared() - radius * radius;

    // Origin outside the sphere and pointing away from it.
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let mut t = -b - sqrt_d;
    if t < 0.0 {
        // Origin inside the sphere: take the exit point.
        t = -b + sqrt_d;
    }
    if t < 0.0 {
        return None;
    }

    let point = origin + dir * t;
    Some(RayHit {
        point,
        distance: t,
        normal: (point - center) / radius,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_ray_from_outside_hits_near_surface() {
        let hit = intersect_ray_sphere(
            DVec3::new(0.0, 10.0, 0.0),
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::ZERO,
            2.0,
        )
        .expect("ray pointing at the sphere must hit");
        assert!((hit.distance - 8.0).abs() < EPSILON);
        assert!((hit.point - DVec3::new(0.0, 2.0, 0.0)).length() < EPSILON);
        assert!((hit.normal - DVec3::Y).length() < EPSILON);
    }

    #[test]
    fn test_ray_from_inside_returns_exit_point() {
        let hit = intersect_ray_sphere(
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::ZERO,
            2.0,
        )
        .expect("ray from inside must exit the sphere");
        assert!((hit.distance - 3.0).abs() < EPSILON);
        assert!((hit.point - DVec3::new(0.0, -2.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_unnormalized_direction_gives_same_hit_point() {
        let a = intersect_ray_sphere(
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::ZERO,
            1.0,
        )
        .unwrap();
        let b = intersect_ray_sphere(
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(-100.0, 0.0, 0.0),
            DVec3::ZERO,
            1.0,
        )
        .unwrap();
        assert!((a.point - b.point).length() < EPSILON);
        assert!((a.distance - b.distance).abs() < EPSILON);
    }

    #[test]
    fn test_sphere_behind_origin_misses() {
        let hit = intersect_ray_sphere(
            DVec3::new(0.0, 10.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_ray_missing_sphere_returns_none() {
        let hit = intersect_ray_sphere(
            DVec3::new(0.0, 10.0, 5.0),
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_degenerate_direction_returns_none() {
        let hit = intersect_ray_sphere(
            DVec3::new(0.0, 10.0, 0.0),
            DVec3::ZERO,
            DVec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_viewer_through_planet_center_at_planet_scale() {
        // The driver's once-per-frame query: viewer above the surface, ray
        // toward the planet center. The hit must be the point directly below.
        let radius = 6_360_000.0;
        let center = DVec3::new(0.0, -radius, 0.0);
        let viewer = DVec3::new(0.0, 12_000.0, 0.0);
        let hit = intersect_ray_sphere(viewer, center - viewer, center, radius)
            .expect("ray through the planet center must hit the surface");
        assert!((hit.distance - 12_000.0).abs() < 1e-6);
        assert!((hit.normal - DVec3::Y).length() < 1e-9);
    }
}
