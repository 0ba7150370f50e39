//! Mapping viewer distance to a refinement level.

/// A refinement level paired with the quad size reached at that level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelDesc {
    /// Subdivisions below the root.
    pub level: u32,
    /// Quad side length at `level`, in map units.
    pub area_size: f64,
}

/// Halve `area_size` until it no longer exceeds `distance`, counting levels.
///
/// The result is the depth at which quads become smaller than the viewer's
/// distance from the surface, capped at `max_level`. A negative distance is
/// treated as its magnitude.
#[must_use]
pub fn level_from_distance(distance: f64, area_size: f64, max_level: u32) -> LevelDesc {
    let distance = distance.abs();
    let mut desc = LevelDesc {
        level: 0,
        area_size,
    };
    while desc.area_size > distance && desc.level < max_level {
        desc.area_size /= 2.0;
        desc.level += 1;
    }
    desc
}
