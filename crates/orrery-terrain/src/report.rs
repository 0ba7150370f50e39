//! Per-frame diagnostics.

/// What one frame of the LOD driver did, returned by
/// [`PlanetTerrain::render`](crate::PlanetTerrain::render).
///
/// Replaces ad-hoc global debug state with a value the caller owns; the demo
/// logs it, tests assert on it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Refinement level chosen from the viewer height.
    pub lod_level: u32,
    /// Viewer altitude above the sphere surface, meters.
    pub height: f64,
    /// Longitude of the viewer's surface footpoint, radians.
    pub lon: f64,
    /// Latitude of the viewer's surface footpoint, radians.
    pub lat: f64,
    /// Footpoint longitude scaled to map units.
    pub map_x: f64,
    /// Footpoint latitude scaled to map units.
    pub map_y: f64,
    /// Leaves drawn this frame.
    pub nodes_rendered: usize,
    /// Leaves visited but rejected by the frustum.
    pub nodes_culled: usize,
}
