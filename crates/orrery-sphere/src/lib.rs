//! Spherical projection math for the planet surface.
//!
//! Pure functions mapping flattened surface coordinates onto the sphere and
//! back: the warped cube-to-sphere projection, a Mercator-style
//! longitude/latitude mapping, bilinear patch interpolation, and the
//! ray/sphere intersection used to find the viewer's footprint.

mod projection;
mod ray;
mod surface;

pub use projection::{cube_to_sphere, quad_lerp};
pub use ray::{intersect_ray_sphere, RayHit};
pub use surface::{
    lon_lat_from_point_on_sphere, position_on_sphere, position_on_sphere_from_surface,
    SurfacePoint,
};
