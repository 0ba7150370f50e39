//! The shared planar grid mesh.
//!
//! One immutable `cols × rows` triangulated grid is built at startup and
//! reused for every terrain patch in a frame: the driver re-positions,
//! re-orients, and re-scales it per leaf instead of rebuilding geometry.

use bytemuck::{Pod, Zeroable};

/// Vertex layout of the grid mesh.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    /// Position in grid-local space (XZ plane, y = 0).
    pub position: [f32; 3],
    /// Flat up normal; the shader displaces it per patch.
    pub normal: [f32; 3],
    /// Texture coordinate in `[0, 1]²`.
    pub uv: [f32; 2],
}

/// An immutable regular triangulated square grid.
///
/// Vertices are centered on the origin in the XZ plane with `stride`
/// spacing. Mutation happens only by whole-object re-creation.
#[derive(Clone, Debug)]
pub struct GridMesh {
    vertices: Vec<GridVertex>,
    indices: Vec<u32>,
    cols: u32,
    rows: u32,
    stride: f32,
}

impl GridMesh {
    /// Build a `cols × rows` vertex grid with two triangles per cell.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is smaller than 2 (no cell to triangulate).
    #[must_use]
    pub fn new(cols: u32, rows: u32, stride: f32) -> Self {
        assert!(cols >= 2 && rows >= 2, "grid needs at least one cell, got {cols}x{rows}");

        let mut vertices = Vec::with_capacity((cols * rows) as usize);
        for y in 0..rows {
            let v = y as f32 / (rows - 1) as f32;
            let pz = (y as i64 - i64::from(rows / 2)) as f32 * stride;
            for x in 0..cols {
                let u = x as f32 / (cols - 1) as f32;
                let px = (x as i64 - i64::from(cols / 2)) as f32 * stride;
                vertices.push(GridVertex {
                    position: [px, 0.0, pz],
                    normal: [0.0, 1.0, 0.0],
                    uv: [u, v],
                });
            }
        }

        let mut indices = Vec::with_capacity(((cols - 1) * (rows - 1) * 6) as usize);
        for r in 0..rows - 1 {
            for c in 0..cols - 1 {
                let i0 = r * cols + c;
                let i1 = r * cols + c + 1;
                let i2 = (r + 1) * cols + c;
                let i3 = (r + 1) * cols + c + 1;
                indices.extend_from_slice(&[i0, i1, i2, i2, i1, i3]);
            }
        }

        Self {
            vertices,
            indices,
            cols,
            rows,
            stride,
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[GridVertex] {
        &self.vertices
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Spacing between adjacent vertices.
    #[must_use]
    pub fn stride(&self) -> f32 {
        self.stride
    }

    /// Span of the vertex lattice along x, in grid-local units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.stride * (self.cols - 1) as f32
    }
}
