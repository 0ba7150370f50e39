//! The planet terrain driver.

use glam::DVec3;
use orrery_config::Config;
use orrery_quadtree::{Circle, Point, Quad, TerrainQuadTree};
use orrery_render::{
    Frustum, GridMesh, MeshHandle, PrimitiveType, RenderDevice, RenderError, ShaderHandle,
    TextureFormat, TextureHandle, Transform, UniformValue,
};
use orrery_sphere::{
    cube_to_sphere, intersect_ray_sphere, lon_lat_from_point_on_sphere,
    position_on_sphere_from_surface,
};
use tracing::{debug, trace, warn};

use crate::displacement::displacement_field;
use crate::level::level_from_distance;
use crate::report::FrameReport;

/// Vertex stage: bilinear corner blend plus the per-level displacement
/// correction, oriented by the patch rotation.
const TERRAIN_VERTEX_SHADER: &str = r#"
struct PatchUniforms {
    quad_a: vec3<f32>,
    quad_b: vec3<f32>,
    quad_c: vec3<f32>,
    quad_d: vec3<f32>,
    rotation_matrix: mat3x3<f32>,
    grid_center: vec3<f32>,
    grid_uv_quad_size: vec3<f32>,
    planet_center: vec3<f32>,
    planet_radius: f32,
    planet_lon: f32,
    planet_lat: f32,
    grid_stride: f32,
    grid_cols: f32,
    grid_rows: f32,
    curvature: f32,
};
@group(0) @binding(0) var<uniform> patch: PatchUniforms;
@group(0) @binding(1) var quad_data: texture_2d_array<f32>;

struct VertexIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn main(in: VertexIn) -> VertexOut {
    let top = mix(patch.quad_a, patch.quad_b, in.uv.x);
    let bottom = mix(patch.quad_d, patch.quad_c, in.uv.x);
    let blended = mix(top, bottom, in.uv.y);

    let texel = vec2<i32>(in.uv * (vec2<f32>(patch.grid_cols, patch.grid_rows) - 1.0));
    let displacement = textureLoad(quad_data, texel, 0, 0).xyz;
    let flat_position = patch.grid_center
        + patch.rotation_matrix * (in.position * patch.grid_stride);

    var out: VertexOut;
    out.clip_position = vec4<f32>(
        mix(flat_position, blended + displacement, patch.curvature), 1.0);
    out.world_normal = patch.rotation_matrix * in.normal;
    out.uv = in.uv;
    return out;
}
"#;

/// Pixel stage: height-tinted surface shading.
const TERRAIN_PIXEL_SHADER: &str = r#"
@fragment
fn main(@location(0) world_normal: vec3<f32>, @location(1) uv: vec2<f32>)
    -> @location(0) vec4<f32> {
    let light = normalize(vec3<f32>(0.4, 0.8, 0.45));
    let diffuse = max(dot(normalize(world_normal), light), 0.05);
    return vec4<f32>(vec3<f32>(0.35, 0.42, 0.3) * diffuse, 1.0);
}
"#;

/// Patches deeper than this are small enough to draw flat, skipping the
/// corner-blend correction in the shader. At Earth scale a depth-11 quad is
/// ~12 km across with centimeter-level sagitta.
const CURVATURE_FLAT_DEPTH: u32 = 10;

/// Floor for the per-frame visit radius so grazing altitudes still render a
/// neighborhood of patches.
const MIN_VISIT_RADIUS: f64 = 1000.0;

/// Per-frame LOD driver for one planet surface.
///
/// Owns the quadtree over the flattened map, the shared grid mesh, and the
/// per-level displacement textures. Call [`set_viewer`](Self::set_viewer),
/// then [`update`](Self::update), then [`render`](Self::render) once per
/// frame.
pub struct PlanetTerrain {
    qtree: TerrainQuadTree,
    grid: GridMesh,
    grid_mesh: MeshHandle,
    shader: ShaderHandle,
    quad_data_textures: Vec<TextureHandle>,
    transform: Transform,
    viewer: DVec3,
    planet_center: DVec3,
    planet_radius: f64,
    detail_levels: u32,
    overlap_cells: u32,
    lod_level: u32,
}

impl PlanetTerrain {
    /// Build the driver and its GPU resources.
    ///
    /// Compiles the terrain shader, uploads the shared grid mesh, and
    /// precomputes one displacement texture per detail level. Any device
    /// failure here is fatal for the terrain layer and is returned as-is.
    pub fn new(device: &mut dyn RenderDevice, config: &Config) -> Result<Self, RenderError> {
        let planet_radius = config.planet.radius;
        let planet_center = DVec3::from_array(config.planet.center);
        let dim = config.lod.grid_dimension;
        // At least one level so there is always a displacement texture.
        let detail_levels = config.lod.detail_levels.max(1);

        let qtree = TerrainQuadTree::new(Quad::new(
            Point::new(0.0, 0.0),
            Point::new(planet_radius, planet_radius),
        ));

        let shader = device.create_shader_program(TERRAIN_VERTEX_SHADER, TERRAIN_PIXEL_SHADER)?;

        let grid = GridMesh::new(dim, dim, 1.0);
        let grid_mesh = device.create_mesh(grid.vertices(), grid.indices())?;

        // One displacement field per level, each for a quad half the size of
        // the previous. Every same-depth leaf shares the level's field.
        let mut quad_data_textures = Vec::with_capacity(detail_levels as usize);
        let mut quad = Quad::new(
            Point::new(0.0, 0.0),
            Point::new(qtree.width() / 2.0, qtree.height() / 2.0),
        );
        for _ in 0..detail_levels {
            let texture = device.create_render_texture(dim, dim, 2, TextureFormat::Rgba32Float)?;
            let data = displacement_field(&quad, dim, planet_radius, planet_center);
            device.upload_texture_data(texture, &data);
            quad_data_textures.push(texture);

            quad = Quad::new(
                quad.center,
                Point::new(quad.half_size.x / 2.0, quad.half_size.y / 2.0),
            );
        }

        debug!(
            radius = planet_radius,
            detail_levels,
            grid_dimension = dim,
            "terrain driver initialized"
        );

        Ok(Self {
            qtree,
            grid,
            grid_mesh,
            shader,
            quad_data_textures,
            transform: Transform::new(),
            viewer: DVec3::ZERO,
            planet_center,
            planet_radius,
            detail_levels,
            overlap_cells: config.lod.overlap_cells(),
            lod_level: 0,
        })
    }

    /// Move the viewer. Takes effect on the next [`update`](Self::update).
    pub fn set_viewer(&mut self, position: DVec3) {
        self.viewer = position;
    }

    /// Viewer altitude above the sphere surface.
    #[must_use]
    pub fn height_above_surface(&self) -> f64 {
        ((self.planet_center - self.viewer).length() - self.planet_radius).abs()
    }

    /// Rebuild the frame's refinement around the viewer.
    ///
    /// Collapses the whole tree, then divides a staircase of concentric
    /// rings: full depth in a tight disc around the viewer, one level less
    /// at twice the radius, and so on outward. Refinement never persists
    /// across frames.
    pub fn update(&mut self) {
        self.qtree.collapse();

        let height = self.height_above_surface();
        let desc = level_from_distance(height, self.qtree.width(), self.detail_levels);
        self.lod_level = desc.level;
        trace!(level = desc.level, height, "frame refinement level");

        let circle = Circle::new(
            Point::new(self.viewer.x, self.viewer.z),
            desc.area_size * 1.2,
        );
        self.qtree.divide_region(&circle, desc.level);
        self.qtree
            .divide_region(&(circle * 2.0), desc.level.saturating_sub(1));
        self.qtree
            .divide_region(&(circle * 4.0), desc.level.saturating_sub(2));
        self.qtree
            .divide_region(&(circle * 8.0), desc.level.saturating_sub(3));
        self.qtree
            .divide_region(&(circle * 32.0), desc.level.saturating_sub(4));
    }

    /// Render every leaf in the viewer's footprint, one shared-grid draw
    /// per patch, and report what happened.
    pub fn render(&mut self, device: &mut dyn RenderDevice, frustum: &Frustum) -> FrameReport {
        let center_relative = self.planet_center - self.viewer;
        let height = self.height_above_surface();

        let mut report = FrameReport {
            lod_level: self.lod_level,
            height,
            ..FrameReport::default()
        };

        // A viewer exactly at the planet center has no surface footpoint.
        let Some(hit) = intersect_ray_sphere(
            self.viewer,
            center_relative,
            self.planet_center,
            self.planet_radius,
        ) else {
            warn!("viewer has no surface footpoint, skipping terrain frame");
            return report;
        };

        let (lon, lat) =
            lon_lat_from_point_on_sphere(self.planet_center, self.planet_radius, hit.point);
        report.lon = lon;
        report.lat = lat;
        report.map_x = lon * self.planet_radius;
        report.map_y = lat * self.planet_radius;

        device.set_uniform(
            self.shader,
            "planet_center",
            UniformValue::Vec3(center_relative.as_vec3()),
        );
        device.set_uniform(
            self.shader,
            "planet_radius",
            UniformValue::Float(self.planet_radius as f32),
        );
        device.set_uniform(self.shader, "planet_lon", UniformValue::Float(lon as f32));
        device.set_uniform(self.shader, "planet_lat", UniformValue::Float(lat as f32));

        let visit_circle = Circle::new(
            Point::new(report.map_x, report.map_y),
            (height * 32.0).max(MIN_VISIT_RADIUS),
        );

        for node in self.qtree.leaves_in(&visit_circle) {
            let quad = node.quad();
            let detail = node.depth().saturating_sub(1).min(self.detail_levels - 1) as usize;

            let a = self.warp_corner(quad.center.x - quad.half_size.x, quad.center.y + quad.half_size.y);
            let b = self.warp_corner(quad.center.x + quad.half_size.x, quad.center.y + quad.half_size.y);
            let c = self.warp_corner(quad.center.x + quad.half_size.x, quad.center.y - quad.half_size.y);
            let d = self.warp_corner(quad.center.x - quad.half_size.x, quad.center.y - quad.half_size.y);

            let surface = position_on_sphere_from_surface(
                quad.center.x,
                quad.center.y,
                self.planet_radius,
                self.planet_center,
            );

            // Conservative world-space bounds over the warped corners and
            // the patch's surface center.
            let mut min = a;
            let mut max = a;
            for p in [b, c, d, surface.position] {
                min = min.min(p);
                max = max.max(p);
            }
            let box_center = (min + max) * 0.5;
            let half_extents = (max - min) * 0.5;

            if !frustum.contains_aligned_bounding_box(box_center, half_extents) {
                report.nodes_culled += 1;
                continue;
            }

            device.set_uniform(
                self.shader,
                "quad_a",
                UniformValue::Vec3((a - self.viewer).as_vec3()),
            );
            device.set_uniform(
                self.shader,
                "quad_b",
                UniformValue::Vec3((b - self.viewer).as_vec3()),
            );
            device.set_uniform(
                self.shader,
                "quad_c",
                UniformValue::Vec3((c - self.viewer).as_vec3()),
            );
            device.set_uniform(
                self.shader,
                "quad_d",
                UniformValue::Vec3((d - self.viewer).as_vec3()),
            );

            self.transform.set_position(surface.position);
            self.transform.set_direction(surface.normal, DVec3::X);
            device.set_uniform(
                self.shader,
                "rotation_matrix",
                UniformValue::Mat3(self.transform.rotation().as_mat3()),
            );

            let scale = (quad.width()
                / f64::from(
                    self.grid.width() - self.grid.stride() * self.overlap_cells as f32,
                )) as f32;
            self.transform
                .set_scale(glam::Vec3::new(scale, scale, 1.0));

            device.set_uniform(
                self.shader,
                "grid_stride",
                UniformValue::Float(self.grid.stride() * scale),
            );
            device.set_uniform(
                self.shader,
                "grid_cols",
                UniformValue::Float(self.grid.cols() as f32),
            );
            device.set_uniform(
                self.shader,
                "grid_rows",
                UniformValue::Float(self.grid.rows() as f32),
            );
            device.set_uniform(
                self.shader,
                "grid_uv_quad_size",
                UniformValue::Vec3(glam::Vec3::new(scale * 0.1, scale * 0.1, 0.0)),
            );
            device.set_uniform(
                self.shader,
                "grid_center",
                UniformValue::Vec3(self.transform.position().as_vec3()),
            );

            // Deep leaves are flat-approximated; the corner blend only pays
            // for itself on patches wide enough to show curvature.
            let curvature = if node.depth() > CURVATURE_FLAT_DEPTH {
                0.0
            } else {
                1.0
            };
            device.set_uniform(self.shader, "curvature", UniformValue::Float(curvature));
            device.set_uniform(
                self.shader,
                "quad_data",
                UniformValue::Texture(self.quad_data_textures[detail]),
            );

            device.draw(
                PrimitiveType::TriangleList,
                self.shader,
                self.grid_mesh,
                &self.transform,
            );
            report.nodes_rendered += 1;
        }

        debug!(
            lod_level = report.lod_level,
            height = report.height,
            rendered = report.nodes_rendered,
            culled = report.nodes_culled,
            "terrain frame"
        );

        report
    }

    fn warp_corner(&self, x: f64, y: f64) -> DVec3 {
        cube_to_sphere(
            DVec3::new(x, self.planet_radius, y),
            self.planet_radius,
            self.planet_center,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_render::RecordingDevice;

    const RADIUS: f64 = 6_360_000.0;

    fn test_config() -> Config {
        let mut config = Config::default();
        // Keep the displacement precompute light for tests.
        config.lod.grid_dimension = 17;
        config.lod.detail_levels = 6;
        config
    }

    fn terrain(device: &mut RecordingDevice) -> PlanetTerrain {
        PlanetTerrain::new(device, &test_config()).unwrap()
    }

    #[test]
    fn test_construction_creates_gpu_resources() {
        let mut device = RecordingDevice::new();
        let terrain = terrain(&mut device);

        assert_eq!(device.shader_count(), 1);
        assert_eq!(
            device.mesh_sizes(terrain.grid_mesh),
            Some((17 * 17, 16 * 16 * 6))
        );
        assert_eq!(terrain.quad_data_textures.len(), 6);
        for &texture in &terrain.quad_data_textures {
            assert_eq!(device.texture_dimensions(texture), Some((17, 17, 2)));
            assert_eq!(device.texture_data(texture).unwrap().len(), 17 * 17 * 4 * 2);
        }
    }

    #[test]
    fn test_update_refines_more_when_closer() {
        let mut device = RecordingDevice::new();
        let mut terrain = terrain(&mut device);

        terrain.set_viewer(DVec3::new(0.0, 2.0 * RADIUS, 0.0));
        terrain.update();
        let far_leaves = terrain.qtree.leaves().len();

        terrain.set_viewer(DVec3::new(0.0, 100.0, 0.0));
        terrain.update();
        let near_leaves = terrain.qtree.leaves().len();

        assert!(near_leaves > far_leaves, "{near_leaves} vs {far_leaves}");
        assert_eq!(terrain.lod_level, 6);
    }

    #[test]
    fn test_update_does_not_accumulate_across_frames() {
        let mut device = RecordingDevice::new();
        let mut terrain = terrain(&mut device);

        terrain.set_viewer(DVec3::new(0.0, 500.0, 0.0));
        terrain.update();
        let first = terrain.qtree.leaves().len();
        terrain.update();
        let second = terrain.qtree.leaves().len();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_draws_visited_leaves() {
        let mut device = RecordingDevice::new();
        let mut terrain = terrain(&mut device);

        terrain.set_viewer(DVec3::new(0.0, 1000.0, 0.0));
        terrain.update();
        let report = terrain.render(&mut device, &Frustum::accept_all());

        assert!(report.nodes_rendered > 0);
        assert_eq!(report.nodes_culled, 0);
        assert_eq!(device.draw_count(), report.nodes_rendered);
        assert!((report.height - 1000.0).abs() < 1e-6);
        // Straight above the map origin the footpoint sits at lon = lat = 0.
        assert!(report.lon.abs() < 1e-9);
        assert!(report.lat.abs() < 1e-9);
        assert!(report.map_x.abs() < 1e-3);
        assert!(report.map_y.abs() < 1e-3);
    }

    #[test]
    fn test_render_sets_patch_uniforms() {
        let mut device = RecordingDevice::new();
        let mut terrain = terrain(&mut device);

        terrain.set_viewer(DVec3::new(0.0, 1000.0, 0.0));
        terrain.update();
        let _ = terrain.render(&mut device, &Frustum::accept_all());

        let shader = terrain.shader;
        assert_eq!(
            device.uniform(shader, "planet_radius"),
            Some(&UniformValue::Float(RADIUS as f32))
        );
        for name in ["quad_a", "quad_b", "quad_c", "quad_d", "rotation_matrix", "quad_data"] {
            assert!(device.uniform(shader, name).is_some(), "missing {name}");
        }
        // With six detail levels every leaf sits well above the flat-depth
        // threshold, so full curvature applies everywhere.
        assert_eq!(
            device.uniform(shader, "curvature"),
            Some(&UniformValue::Float(1.0))
        );
    }

    #[test]
    fn test_viewer_at_planet_center_renders_nothing() {
        let mut device = RecordingDevice::new();
        let mut terrain = terrain(&mut device);

        terrain.set_viewer(DVec3::from_array(test_config().planet.center));
        terrain.update();
        let report = terrain.render(&mut device, &Frustum::accept_all());

        assert_eq!(report.nodes_rendered, 0);
        assert_eq!(device.draw_count(), 0);
    }

    #[test]
    fn test_frustum_rejects_patches_behind_the_camera() {
        let mut device = RecordingDevice::new();
        let mut terrain = terrain(&mut device);

        terrain.set_viewer(DVec3::new(0.0, 1000.0, 0.0));
        terrain.update();

        // Looking straight up, away from the planet: every patch lies
        // behind the near plane.
        let view = glam::DMat4::look_to_rh(
            DVec3::new(0.0, 1000.0, 0.0),
            DVec3::Y,
            DVec3::Z,
        );
        let proj = glam::DMat4::perspective_rh(1.2, 1.0, 0.1, 1.0e9);
        let frustum = Frustum::from_view_projection(&(proj * view));

        let report = terrain.render(&mut device, &frustum);
        assert_eq!(report.nodes_rendered, 0);
        assert!(report.nodes_culled > 0);
        assert_eq!(device.draw_count(), 0);
    }

    #[test]
    fn test_report_level_matches_altitude_band() {
        let mut device = RecordingDevice::new();
        let mut terrain = terrain(&mut device);

        // Half the root width away: exactly one halving fits.
        terrain.set_viewer(DVec3::new(0.0, RADIUS, 0.0));
        terrain.update();
        let report = terrain.render(&mut device, &Frustum::accept_all());
        assert_eq!(report.lod_level, 1);
    }
}
