//! View-frustum culling in double precision.
//!
//! The terrain driver tests patch bounding boxes at planetary coordinates,
//! where f32 plane math visibly misclassifies near the horizon, so the
//! planes stay in f64 end to end.

use glam::{DMat4, DVec3, DVec4};

/// A view frustum as six inward-pointing planes.
#[derive(Clone, Debug)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far. Each `DVec4(a, b, c, d)` holds
    /// the unit inward normal `(a, b, c)` and signed distance `d`.
    planes: [DVec4; 6],
}

impl Frustum {
    /// Extract planes from a combined view-projection matrix using the
    /// Gribb-Hartmann row method.
    #[must_use]
    pub fn from_view_projection(vp: &DMat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [
            rows[3] + rows[0], // left
            rows[3] - rows[0], // right
            rows[3] + rows[1], // bottom
            rows[3] - rows[1], // top
            rows[3] + rows[2], // near
            rows[3] - rows[2], // far
        ];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 1e-12 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    /// A frustum that accepts every box; used by headless callers that have
    /// no camera.
    #[must_use]
    pub fn accept_all() -> Self {
        // Planes at infinite distance on every side.
        let far = DVec4::new(0.0, 1.0, 0.0, f64::MAX);
        Self { planes: [far; 6] }
    }

    /// Conservative intersection test between the frustum and an
    /// axis-aligned box given as center plus half-extents.
    ///
    /// `false` means definitely outside (skip the draw); `true` means the
    /// box may be visible. No partial/clipped classification is made.
    #[must_use]
    pub fn contains_aligned_bounding_box(&self, center: DVec3, half_extents: DVec3) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();
            let d = plane.w;

            // Projection radius of the box onto the plane normal.
            let effective_radius = half_extents.x * normal.x.abs()
                + half_extents.y * normal.y.abs()
                + half_extents.z * normal.z.abs();

            if normal.dot(center) + d < -effective_radius {
                return false;
            }
        }
        true
    }
}
