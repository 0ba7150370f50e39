//! Displacement-field precompute.
//!
//! The vertex shader positions each grid vertex by bilinearly blending a
//! patch's four sphere-projected corners, then adds a per-texel displacement
//! that corrects the blend back onto the true sphere. One field is
//! precomputed per detail level at startup; every patch of that level shares
//! it because the correction depends only on the quad's size, not its place
//! on the map.

use glam::DVec3;
use orrery_quadtree::Quad;
use orrery_sphere::{cube_to_sphere, quad_lerp};

/// Texel data for one detail level: two `grid_dim × grid_dim` RGBA32F
/// layers, displacement first, then the normal layer reserved for a height
/// source.
///
/// Layout matches [`TextureFormat::Rgba32Float`] with `layers = 2`: texel
/// `(x, y)` of layer `l` starts at `l·dim·dim·4 + (y·dim + x)·4`.
///
/// [`TextureFormat::Rgba32Float`]: orrery_render::TextureFormat::Rgba32Float
#[must_use]
pub fn displacement_field(quad: &Quad, grid_dim: u32, radius: f64, center: DVec3) -> Vec<f32> {
    let dim = grid_dim as usize;
    let layer = dim * dim * 4;
    let mut data = vec![0.0f32; layer * 2];

    //  0 <----u----> 1
    //  a ----------- b    0
    //  |             |    |
    //  |    *(u,v)   |    v
    //  |             |    |
    //  d ----------- c    1
    let hx = quad.half_size.x;
    let hy = quad.half_size.y;
    let a = cube_to_sphere(DVec3::new(quad.center.x - hx, radius, quad.center.y + hy), radius, center);
    let b = cube_to_sphere(DVec3::new(quad.center.x + hx, radius, quad.center.y + hy), radius, center);
    let c = cube_to_sphere(DVec3::new(quad.center.x + hx, radius, quad.center.y - hy), radius, center);
    let d = cube_to_sphere(DVec3::new(quad.center.x - hx, radius, quad.center.y - hy), radius, center);

    let step = hx * 2.0 / f64::from(grid_dim);
    let mut surface_y = quad.center.y + f64::from(grid_dim) / 2.0 * step;
    for y in 0..dim {
        let mut surface_x = quad.center.x - f64::from(grid_dim) / 2.0 * step;
        for x in 0..dim {
            let u = x as f64 / f64::from(grid_dim - 1);
            let v = y as f64 / f64::from(grid_dim - 1);

            let blended = quad_lerp(a, b, c, d, u, v);
            let on_sphere =
                cube_to_sphere(DVec3::new(surface_x, radius, surface_y), radius, center);
            let displacement = on_sphere - blended;

            let i = (y * dim + x) * 4;
            data[i] = displacement.x as f32;
            data[i + 1] = displacement.y as f32;
            data[i + 2] = displacement.z as f32;
            data[i + 3] = 1.0;
            data[layer + i + 3] = 1.0;

            surface_x += step;
        }
        surface_y -= step;
    }

    data
}
