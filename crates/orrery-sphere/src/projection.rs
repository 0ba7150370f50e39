//! Warped cube-to-sphere projection and bilinear patch interpolation.

use glam::DVec3;

/// Project a point on a cube-face parameterization onto the sphere surface.
///
/// The input is normalized by `radius`, warped with the per-axis quadratic
/// correction
///
/// ```text
/// sx = x * sqrt(1 - y²/2 - z²/2 + y²z²/3)
/// sy = y * sqrt(1 - x²/2 - z²/2 + x²z²/3)
/// sz = z * sqrt(1 - x²/2 - y²/2 + x²y²/3)
/// ```
///
/// then scaled back by `radius` and offset by `center`. The warp distributes
/// area far more evenly across a face than naive normalization, which keeps
/// terrain-patch cell sizes comparable near face edges and centers. The
/// result always lands exactly on the sphere: `|out - center| == radius`.
#[must_use]
pub fn cube_to_sphere(cube: DVec3, radius: f64, center: DVec3) -> DVec3 {
    let c = cube / radius;
    let x2 = c.x * c.x;
    let y2 = c.y * c.y;
    let z2 = c.z * c.z;

    let sphere = DVec3::new(
        c.x * (1.0 - y2 * 0.5 - z2 * 0.5 + y2 * z2 / 3.0).sqrt(),
        c.y * (1.0 - z2 * 0.5 - x2 * 0.5 + z2 * x2 / 3.0).sqrt(),
        c.z * (1.0 - x2 * 0.5 - y2 * 0.5 + x2 * y2 / 3.0).sqrt(),
    );

    sphere * radius + center
}

/// Bilinear interpolation across four corner points.
///
/// Corner order in `(u, v)` space: `a = (0,0)`, `b = (1,0)`, `c = (1,1)`,
/// `d = (0,1)`. Used to approximate a patch's curved surface with a bilinear
/// blend of its sphere-projected corners when precomputing displacement
/// fields.
#[must_use]
pub fn quad_lerp(a: DVec3, b: DVec3, c: DVec3, d: DVec3, u: f64, v: f64) -> DVec3 {
    let top = a.lerp(b, u);
    let bottom = d.lerp(c, u);
    top.lerp(bottom, v)
}
